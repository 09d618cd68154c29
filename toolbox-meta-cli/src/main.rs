//! tbmeta - XML metadata for ArcGIS python toolboxes.
//!
//! Commands:
//! - `tbmeta generate <manifest>`: Write the toolbox and tool `.pyt.xml` files
//! - `tbmeta show <manifest> [--tool NAME]`: Print one document to stdout
//! - `tbmeta schema [toolbox|tool]`: Print the effective schema mapping
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tbmeta::generate::{self, GenerateArgs, Selection};
use tbmeta::{schema, show};
use tbmeta::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("tbmeta=debug,toolbox_meta=debug,toolbox_meta_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(dispatch_command(cli));
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> i32 {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Generate {
            manifest,
            overwrite,
            toolbox_only,
            tools_only,
            output_dir,
        } => {
            let args = GenerateArgs {
                manifest,
                overwrite,
                selection: Selection::from_flags(toolbox_only, tools_only),
                output_dir,
            };
            result_to_exit(generate::run_generate(&args, config))
        }
        Commands::Show { manifest, tool } => {
            result_to_exit(show::run_show(&manifest, tool.as_deref(), config))
        }
        Commands::Schema { kind } => result_to_exit(schema::run_schema(kind, config)),
    }
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
