use clap::Args;
use colored::Colorize;
use miette::Result;
use script_registry::{RegistryOptions, TemplateRegistry};

/// Arguments for the `script-registry check` subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Glob pattern selecting the template files
    #[arg(short = 't', long = "templates")]
    pub templates: String,
}

pub fn check_command(args: CheckArgs, options: &RegistryOptions) -> Result<()> {
    let registry = TemplateRegistry::parse_with(&args.templates, options)?;

    let noun = if registry.len() == 1 { "template" } else { "templates" };
    println!(
        "{} {} {noun} parsed from {}",
        "✓".green(),
        registry.len(),
        args.templates
    );
    Ok(())
}
