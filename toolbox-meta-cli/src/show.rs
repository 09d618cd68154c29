//! `tbmeta show`

use std::path::Path;

use crate::{load_config, load_generator};

/// Render the toolbox document, or `tool`'s document, as indented XML
pub fn render(manifest: &Path, tool: Option<&str>, config_file: Option<&Path>) -> anyhow::Result<String> {
    let config = load_config(config_file)?;
    let generator = load_generator(manifest, config.generator_options())?;
    let document = match tool {
        Some(name) => generator.tool_document(name)?,
        None => generator.toolbox_document()?,
    };
    Ok(document.to_xml(true)?)
}

pub fn run_show(manifest: &Path, tool: Option<&str>, config_file: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", render(manifest, tool, config_file)?);
    Ok(())
}
