//! Error types for metadata generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Structural problems with a schema mapping.
///
/// These are fatal to building the tree for that document: no partial tree
/// is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A child entry names a parent that has not been declared earlier
    #[error("unknown parent '{parent}' referenced by node '{node}'")]
    UnknownParent { node: String, parent: String },

    /// No entry without a parent
    #[error("schema has no root node")]
    MissingRoot,

    /// More than one entry without a parent
    #[error("schema declares a second root '{node}' (root is '{root}')")]
    MultipleRoots { node: String, root: String },

    /// The same node name appears twice
    #[error("duplicate node name '{node}' in schema")]
    DuplicateNode { node: String },
}

/// Errors that can occur while loading manifests and generating documents
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Schema mapping is malformed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Manifest content is invalid
    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Manifest format is not recognised from the file extension
    #[error("unsupported manifest format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Tool not present in the manifest
    #[error("tool not found in toolbox: {name}")]
    ToolNotFound { name: String },

    /// A node required by document generation is missing from the schema
    #[error("schema for {document} has no '{node}' node")]
    MissingNode { document: String, node: String },

    /// A date or time format string is not a valid strftime pattern
    #[error("invalid date/time format: {format}")]
    InvalidDateFormat { format: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Serialized XML was not valid UTF-8
    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl MetadataError {
    /// Create an invalid manifest error
    pub fn invalid_manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetadataError::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parent_display() {
        let err = SchemaError::UnknownParent {
            node: "child".into(),
            parent: "missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown parent 'missing' referenced by node 'child'"
        );
    }

    #[test]
    fn test_schema_error_converts() {
        let err: MetadataError = SchemaError::MissingRoot.into();
        assert!(matches!(err, MetadataError::Schema(SchemaError::MissingRoot)));
        assert!(err.to_string().contains("no root"));
    }

    #[test]
    fn test_invalid_manifest_display() {
        let err = MetadataError::invalid_manifest("tools.yaml", "toolbox name is empty");
        assert!(err.to_string().contains("tools.yaml"));
        assert!(err.to_string().contains("toolbox name is empty"));
    }
}
