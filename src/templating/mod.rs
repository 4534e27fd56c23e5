pub mod discovery;
pub mod error;
pub mod global;
pub mod must;
pub mod options;
pub mod registry;
pub mod variables;

use std::collections::BTreeMap;

/// Convenience map for supplying values to templates
pub type Vars = BTreeMap<String, serde_json::Value>;

pub use error::{ParseError, RenderError, TemplateError};
pub use options::{RegistryOptions, UndefinedMode};
pub use registry::TemplateRegistry;
pub use variables::VariableResolver;
