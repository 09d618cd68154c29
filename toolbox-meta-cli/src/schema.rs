//! `tbmeta schema`

use std::path::Path;

use crate::{load_config, SchemaKind};

/// The configured schema for `kind`, serialized as YAML
pub fn render(kind: SchemaKind, config_file: Option<&Path>) -> anyhow::Result<String> {
    let options = load_config(config_file)?.generator_options();
    let schema = match kind {
        SchemaKind::Toolbox => &options.toolbox_schema,
        SchemaKind::Tool => &options.tool_schema,
    };
    Ok(serde_yaml::to_string(schema)?)
}

pub fn run_schema(kind: SchemaKind, config_file: Option<&Path>) -> anyhow::Result<()> {
    print!("{}", render(kind, config_file)?);
    Ok(())
}
