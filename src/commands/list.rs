use clap::Args;
use miette::Result;
use script_registry::{RegistryOptions, TemplateRegistry};

/// Arguments for the `script-registry list` subcommand.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Glob pattern selecting the template files
    #[arg(short = 't', long = "templates")]
    pub templates: String,

    /// Also print the file each template was read from
    #[arg(long)]
    pub paths: bool,
}

pub fn list_command(args: ListArgs, options: &RegistryOptions) -> Result<()> {
    let registry = TemplateRegistry::parse_with(&args.templates, options)?;

    for (name, path) in registry.sources() {
        if args.paths {
            println!("{name}\t{}", path.display());
        } else {
            println!("{name}");
        }
    }

    Ok(())
}
