//! `tbmeta` - command-line front end for `toolbox-meta`.
//!
//! Each subcommand lives in its own module and returns `anyhow::Result`;
//! `main.rs` turns the result into an exit code.

use std::path::Path;

use anyhow::Context;
use toolbox_meta::{Generator, GeneratorOptions, ToolboxManifest};
use toolbox_meta_config::{ConfigProvider, MetaConfig};

pub mod cli;
pub mod generate;
pub mod schema;
pub mod show;

pub use cli::{Cli, Commands, SchemaKind};

/// Load configuration, with `explicit` merged above the discovered files
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<MetaConfig> {
    let mut provider = ConfigProvider::new();
    if let Some(path) = explicit {
        provider = provider.with_file(path);
    }
    provider.load().context("failed to load configuration")
}

/// Read a manifest and prepare a generator for it
pub fn load_generator(manifest: &Path, options: GeneratorOptions) -> anyhow::Result<Generator> {
    let manifest = ToolboxManifest::load(manifest)
        .with_context(|| format!("failed to load manifest {}", manifest.display()))?;
    Ok(Generator::builder(manifest).options(options).build()?)
}
