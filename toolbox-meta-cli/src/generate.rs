//! `tbmeta generate`

use std::path::{Path, PathBuf};

use toolbox_meta::WriteReport;
use tracing::debug;

use crate::{load_config, load_generator};

/// Which documents `generate` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    ToolboxOnly,
    ToolsOnly,
}

impl Selection {
    pub fn from_flags(toolbox_only: bool, tools_only: bool) -> Self {
        match (toolbox_only, tools_only) {
            (true, _) => Selection::ToolboxOnly,
            (_, true) => Selection::ToolsOnly,
            _ => Selection::All,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub manifest: PathBuf,
    pub overwrite: bool,
    pub selection: Selection,
    pub output_dir: Option<PathBuf>,
}

/// Write the selected documents and report each file on stdout
pub fn run_generate(args: &GenerateArgs, config_file: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_file)?;
    let overwrite = args.overwrite || config.overwrite;

    let mut options = config.generator_options();
    if let Some(dir) = &args.output_dir {
        options = options.with_output_dir(dir);
    }

    let generator = load_generator(&args.manifest, options)?;
    debug!(selection = ?args.selection, overwrite, "Generating metadata");

    let report = match args.selection {
        Selection::All => generator.write_all(overwrite)?,
        Selection::ToolboxOnly => WriteReport::write([generator.toolbox_document()?], overwrite)?,
        Selection::ToolsOnly => WriteReport::write(generator.tool_documents()?, overwrite)?,
    };

    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("Skipped {} (already exists, use --overwrite)", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(Selection::from_flags(false, false), Selection::All);
        assert_eq!(Selection::from_flags(true, false), Selection::ToolboxOnly);
        assert_eq!(Selection::from_flags(false, true), Selection::ToolsOnly);
    }
}
