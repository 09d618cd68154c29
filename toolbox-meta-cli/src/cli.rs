//! CLI definition for the `tbmeta` command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Which document schema to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// The `<toolbox>.pyt.xml` document
    Toolbox,
    /// The per-tool `<toolbox>.<tool>.pyt.xml` documents
    Tool,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaKind::Toolbox => write!(f, "toolbox"),
            SchemaKind::Tool => write!(f, "tool"),
        }
    }
}

/// tbmeta - metadata sidecars for ArcGIS python toolboxes
///
/// Reads a toolbox manifest and writes the item-description XML files ArcGIS
/// shows for the toolbox and each of its tools.
#[derive(Parser, Debug)]
#[command(name = "tbmeta")]
#[command(version)]
#[command(about = "Generate XML metadata for ArcGIS python toolboxes")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file merged above the discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write metadata files next to the toolbox
    Generate {
        /// Toolbox manifest (.yaml, .yml or .json)
        manifest: PathBuf,
        /// Replace metadata files that already exist
        #[arg(long)]
        overwrite: bool,
        /// Only write the toolbox document
        #[arg(long, conflicts_with = "tools_only")]
        toolbox_only: bool,
        /// Only write the tool documents
        #[arg(long)]
        tools_only: bool,
        /// Write into this directory instead of the toolbox's
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Print a metadata document to stdout
    Show {
        /// Toolbox manifest (.yaml, .yml or .json)
        manifest: PathBuf,
        /// Show this tool's document instead of the toolbox document
        #[arg(short, long, value_name = "NAME")]
        tool: Option<String>,
    },
    /// Print the effective schema mapping as YAML
    Schema {
        #[arg(value_enum, default_value_t = SchemaKind::Toolbox)]
        kind: SchemaKind,
    },
}
