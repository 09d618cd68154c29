//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use toolbox_meta::{
    AttributeOverrides, Contact, DateFormat, GeneratorOptions, MetadataTree, SchemaMapping,
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT,
};

use crate::{ConfigError, ConfigResult};

/// Settings for metadata generation.
///
/// Every field has a default, so configuration files only need the keys they
/// change. Custom schemas are sequences of `{name, parent}` records:
///
/// ```yaml
/// tool_schema:
///   - name: metadata
///   - name: tool
///     parent: metadata
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Replace existing sidecar files
    pub overwrite: bool,
    pub date_format: String,
    pub time_format: String,
    pub help_path: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub contact: Contact,
    pub toolbox_schema: Option<SchemaMapping>,
    pub tool_schema: Option<SchemaMapping>,
    pub toolbox_attributes: Option<AttributeOverrides>,
    pub tool_attributes: Option<AttributeOverrides>,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            help_path: None,
            output_dir: None,
            contact: Contact::default(),
            toolbox_schema: None,
            tool_schema: None,
            toolbox_attributes: None,
            tool_attributes: None,
        }
    }
}

impl MetaConfig {
    /// Reject settings that would only fail later, during generation
    pub fn validate(&self) -> ConfigResult<()> {
        DateFormat::parse(&self.date_format)
            .map_err(|e| ConfigError::invalid_value("date_format", e))?;
        DateFormat::parse(&self.time_format)
            .map_err(|e| ConfigError::invalid_value("time_format", e))?;

        for (key, schema) in [
            ("toolbox_schema", &self.toolbox_schema),
            ("tool_schema", &self.tool_schema),
        ] {
            if let Some(schema) = schema {
                MetadataTree::build(schema, &AttributeOverrides::new())
                    .map_err(|e| ConfigError::invalid_value(key, e))?;
            }
        }
        Ok(())
    }

    /// Generation options with unset values taken from the library defaults
    pub fn generator_options(&self) -> GeneratorOptions {
        let defaults = GeneratorOptions::default();
        GeneratorOptions {
            toolbox_schema: self
                .toolbox_schema
                .clone()
                .unwrap_or(defaults.toolbox_schema),
            tool_schema: self.tool_schema.clone().unwrap_or(defaults.tool_schema),
            toolbox_attributes: self
                .toolbox_attributes
                .clone()
                .unwrap_or(defaults.toolbox_attributes),
            tool_attributes: self
                .tool_attributes
                .clone()
                .unwrap_or(defaults.tool_attributes),
            date_format: self.date_format.clone(),
            time_format: self.time_format.clone(),
            help_path: self.help_path.clone(),
            contact: self.contact.clone(),
            generator_name: defaults.generator_name,
            output_dir: self.output_dir.clone(),
        }
    }
}
