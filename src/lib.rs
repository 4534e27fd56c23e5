//! Parse a glob of templates once, then render them by name.
//!
//! ```no_run
//! use script_registry::{TemplateRegistry, Vars};
//!
//! let registry = TemplateRegistry::parse("scripts/*.tmpl")?;
//! let mut vars = Vars::new();
//! vars.insert("Who".to_string(), "Bob".into());
//! let script = registry.render("greet.tmpl", &vars)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For call sites that need a process-wide registry, see [`templating::global`]
//! and the panicking helpers in [`templating::must`].

pub mod error_utils;
pub mod templating;

pub use templating::global::{execute, parse};
pub use templating::must::{must_execute, must_parse};
pub use templating::{ParseError, RegistryOptions, RenderError, TemplateRegistry, Vars};
