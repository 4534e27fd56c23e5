//! Process-wide template registry.
//!
//! The slot is written once, normally at startup, and read by every later
//! [`execute`] call. A second initialization is a startup-ordering bug and
//! panics instead of replacing the installed registry.
//!
//! New code should prefer building a [`TemplateRegistry`] value and passing it
//! by reference; this module exists for call sites that need a global.

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::info;

use super::error::{ParseError, RenderError};
use super::options::RegistryOptions;
use super::registry::TemplateRegistry;

static REGISTRY: OnceCell<TemplateRegistry> = OnceCell::new();

const ALREADY_INITIALIZED: &str = "template registry already initialized; parse can be called only once";

/// Parse the templates matched by `pattern` and install them process-wide.
///
/// # Panics
///
/// Panics if a registry is already installed.
pub fn parse(pattern: &str) -> Result<(), ParseError> {
    parse_with(pattern, &RegistryOptions::default())
}

pub fn parse_with(pattern: &str, options: &RegistryOptions) -> Result<(), ParseError> {
    if REGISTRY.get().is_some() {
        panic!("{ALREADY_INITIALIZED}");
    }
    let registry = TemplateRegistry::parse_with(pattern, options)?;
    install(registry);
    Ok(())
}

/// Install an already built registry.
///
/// # Panics
///
/// Panics if a registry is already installed, including when another thread
/// won a concurrent install.
pub fn install(registry: TemplateRegistry) -> &'static TemplateRegistry {
    match REGISTRY.try_insert(registry) {
        Ok(installed) => {
            info!(templates = installed.len(), "Installed process-wide template registry");
            installed
        }
        Err(_) => panic!("{ALREADY_INITIALIZED}"),
    }
}

/// Render the named template from the process-wide registry
pub fn execute<S: Serialize>(name: &str, data: S) -> Result<String, RenderError> {
    registry()
        .ok_or(RenderError::Uninitialized)?
        .render(name, data)
}

pub fn registry() -> Option<&'static TemplateRegistry> {
    REGISTRY.get()
}

pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}
