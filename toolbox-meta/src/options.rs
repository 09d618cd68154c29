//! Generation settings.

use std::path::PathBuf;

use crate::credits::Contact;
use crate::dates::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use crate::schema::{AttributeOverrides, SchemaMapping};

/// Name recorded in the generated usage-limit disclaimer.
pub const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");

/// Everything about document generation that is not read from the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub toolbox_schema: SchemaMapping,
    pub tool_schema: SchemaMapping,
    pub toolbox_attributes: AttributeOverrides,
    pub tool_attributes: AttributeOverrides,
    /// strftime pattern for `CreaDate`, `ModDate` and `mdDateSt`.
    pub date_format: String,
    /// strftime pattern for `CreaTime` and `ModTime`.
    pub time_format: String,
    /// Value of `arcToolboxHelpPath`, left empty when unset.
    pub help_path: Option<String>,
    pub contact: Contact,
    pub generator_name: String,
    /// Directory for the sidecar files instead of the toolbox's directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            toolbox_schema: SchemaMapping::default_toolbox(),
            tool_schema: SchemaMapping::default_tool(),
            toolbox_attributes: AttributeOverrides::default_document(),
            tool_attributes: AttributeOverrides::default_document(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            help_path: None,
            contact: Contact::default(),
            generator_name: GENERATOR_NAME.to_string(),
            output_dir: None,
        }
    }
}

impl GeneratorOptions {
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_help_path(mut self, help_path: impl Into<String>) -> Self {
        self.help_path = Some(help_path.into());
        self
    }

    pub fn with_toolbox_schema(mut self, schema: SchemaMapping) -> Self {
        self.toolbox_schema = schema;
        self
    }

    pub fn with_tool_schema(mut self, schema: SchemaMapping) -> Self {
        self.tool_schema = schema;
        self
    }
}
