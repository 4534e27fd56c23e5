mod check;
mod list;
mod render;

use miette::Result;
use script_registry::RegistryOptions;
use std::path::Path;

pub use check::{CheckArgs, check_command};
pub use list::{ListArgs, list_command};
pub use render::{RenderArgs, render_command};

pub fn load_options(path: Option<&Path>) -> Result<RegistryOptions> {
    match path {
        Some(path) => RegistryOptions::from_file(path).map_err(|e| miette::miette!("{e:#}")),
        None => Ok(RegistryOptions::default()),
    }
}
