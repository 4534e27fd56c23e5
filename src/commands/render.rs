use clap::Args;
use miette::Result;
use script_registry::RegistryOptions;
use script_registry::templating::VariableResolver;
use script_registry::templating::global;
use script_registry::templating::variables::parse_var_assignment;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the `script-registry render` subcommand.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Name of the template to render (its file name)
    pub name: String,

    /// Glob pattern selecting the template files
    #[arg(short = 't', long = "templates")]
    pub templates: String,

    /// YAML or JSON file with the data passed to the template
    #[arg(short = 'd', long = "data")]
    pub data: Option<PathBuf>,

    /// Set a template variable (name=value), overrides the data file and SCRIPT_VAR_* env vars
    #[arg(long = "var", value_parser = parse_var_assignment)]
    pub vars: Vec<(String, String)>,
}

pub fn render_command(args: RenderArgs, options: &RegistryOptions) -> Result<()> {
    let mut resolver = VariableResolver::new();
    if let Some(path) = &args.data {
        resolver
            .add_data_file(path)
            .map_err(|e| miette::miette!("{e:#}"))?;
    }
    resolver.add_env_vars();
    resolver.add_cli_vars(&args.vars);

    global::parse_with(&args.templates, options)?;
    let rendered = global::execute(&args.name, resolver.get_variables())?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| miette::miette!("Failed to write output: {e}"))?;
    Ok(())
}
