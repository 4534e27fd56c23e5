//! Engine options for a template registry

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Deserialize;
use std::path::Path;

/// How templates treat values missing from the render data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedMode {
    /// Any use of a missing value is a render error
    #[default]
    Strict,
    /// Missing values render as empty strings
    Lenient,
    /// Like lenient, but attribute access on missing values is also allowed
    Chainable,
}

impl From<UndefinedMode> for UndefinedBehavior {
    fn from(mode: UndefinedMode) -> Self {
        match mode {
            UndefinedMode::Strict => UndefinedBehavior::Strict,
            UndefinedMode::Lenient => UndefinedBehavior::Lenient,
            UndefinedMode::Chainable => UndefinedBehavior::Chainable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryOptions {
    pub undefined: UndefinedMode,
    pub keep_trailing_newline: bool,
    pub html_escape: bool,
    pub trim_blocks: bool,
    pub lstrip_blocks: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            undefined: UndefinedMode::Strict,
            keep_trailing_newline: true,
            html_escape: false,
            trim_blocks: false,
            lstrip_blocks: false,
        }
    }
}

impl RegistryOptions {
    /// Load options from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file means all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply these options to a MiniJinja environment
    pub(crate) fn configure(&self, env: &mut Environment<'static>) {
        env.set_undefined_behavior(self.undefined.into());
        env.set_keep_trailing_newline(self.keep_trailing_newline);
        env.set_trim_blocks(self.trim_blocks);
        env.set_lstrip_blocks(self.lstrip_blocks);

        if self.html_escape {
            env.set_auto_escape_callback(minijinja::default_auto_escape_callback);
        } else {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }
    }
}
