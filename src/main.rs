use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

mod commands;

use commands::{CheckArgs, ListArgs, RenderArgs};

#[derive(Parser)]
#[command(
    name = "script-registry",
    about = "Parse a glob of script templates once and render them by name",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry options file (YAML)
    #[arg(short, long, global = true, env = "SCRIPT_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one template to stdout
    Render(RenderArgs),

    /// List the template names a pattern produces
    List(ListArgs),

    /// Parse templates and report errors without rendering
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = commands::load_options(cli.config.as_deref())?;

    match cli.command {
        Commands::Render(args) => commands::render_command(args, &options),
        Commands::List(args) => commands::list_command(args, &options),
        Commands::Check(args) => commands::check_command(args, &options),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("script_registry=warn"),
        1 => EnvFilter::new("script_registry=info"),
        _ => EnvFilter::new("script_registry=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
