//! Toolbox manifests.
//!
//! A manifest describes a python toolbox and its tools: the attributes a
//! toolbox or tool class would carry (`alias`, `label`, `description`, any
//! schema node name, ...) plus each tool's parameters. Manifests are YAML or
//! JSON.
//!
//! # Format
//! ```yaml
//! name: Hydrology
//! alias: hydro
//! description: Watershed tools
//! tools:
//!   - name: FillSinks
//!     label: Fill Sinks
//!     category: Surface
//!     parameters:
//!       - name: in_dem
//!         displayName: Input DEM
//!         datatype: Raster Layer
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::source::{display_value, FieldSource};

/// Extension of python toolbox files.
pub const TOOLBOX_EXTENSION: &str = "pyt";

/// A toolbox and its tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolboxManifest {
    /// Toolbox name; defaults to the manifest file stem.
    #[serde(default)]
    pub name: String,

    /// Path of the `.pyt` file the metadata describes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbox_path: Option<PathBuf>,

    #[serde(default)]
    pub tools: Vec<ToolManifest>,

    /// Every other toolbox attribute.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One tool of a toolbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolManifest {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,

    /// Every other tool attribute.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A tool parameter, named the way geoprocessing parameters are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default = "default_datatype")]
    pub datatype: String,

    #[serde(default = "default_parameter_type")]
    pub parameter_type: String,

    #[serde(default = "default_direction")]
    pub direction: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_dependencies: Vec<String>,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ParameterFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_reference: Option<String>,
}

fn default_datatype() -> String {
    "String".to_string()
}

fn default_parameter_type() -> String {
    "Required".to_string()
}

fn default_direction() -> String {
    "Input".to_string()
}

/// Allowed-value filter of a parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParameterFilter {
    /// `ValueList`, `Range`, or any other filter type.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub list: Vec<Value>,
}

/// A code sample shown in tool help.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptExample {
    pub title: String,
    pub para: String,
    pub code: String,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            datatype: default_datatype(),
            parameter_type: default_parameter_type(),
            direction: default_direction(),
            parameter_dependencies: Vec::new(),
            value: None,
            filter: None,
            dialog_reference: None,
            python_reference: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }

    pub fn with_filter(mut self, kind: impl Into<String>, list: Vec<Value>) -> Self {
        self.filter = Some(ParameterFilter {
            kind: kind.into(),
            list,
        });
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Label shown in tool dialogs; the name when no display name is set.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Default value as display text, `None` when unset or empty.
    pub fn default_text(&self) -> Option<String> {
        self.value
            .as_ref()
            .map(display_value)
            .filter(|text| !text.is_empty())
    }
}

impl ToolManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set a free-form attribute.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }
}

impl ToolboxManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set a free-form attribute.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_tool(mut self, tool: ToolManifest) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_toolbox_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.toolbox_path = Some(path.into());
        self
    }

    /// Parse a manifest from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a manifest file, choosing the format from its extension.
    ///
    /// A missing `name` defaults to the file stem (without a trailing
    /// `.pyt`), and a missing `toolbox_path` to `<name>.pyt` next to the
    /// manifest. Relative toolbox paths resolve against the manifest's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path)?;
        let mut manifest = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => {
                return Err(MetadataError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        }
        .map_err(|e| MetadataError::invalid_manifest(path, e.to_string()))?;

        if manifest.name.is_empty() {
            manifest.name = toolbox_name_from(path).ok_or_else(|| {
                MetadataError::invalid_manifest(path, "cannot derive toolbox name from file name")
            })?;
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.toolbox_path = Some(match manifest.toolbox_path.take() {
            Some(p) if p.is_relative() => base.join(p),
            Some(p) => p,
            None => base.join(format!("{}.{}", manifest.name, TOOLBOX_EXTENSION)),
        });

        manifest.validate(path)?;
        debug!(
            manifest = %path.display(),
            toolbox = %manifest.name,
            tools = manifest.tools.len(),
            "loaded toolbox manifest"
        );
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MetadataError::invalid_manifest(path, "toolbox name is empty"));
        }
        for (i, tool) in self.tools.iter().enumerate() {
            if tool.name.trim().is_empty() {
                return Err(MetadataError::invalid_manifest(
                    path,
                    format!("tool #{} has no name", i + 1),
                ));
            }
            if self.tools[..i].iter().any(|t| t.name == tool.name) {
                return Err(MetadataError::invalid_manifest(
                    path,
                    format!("tool '{}' is declared twice", tool.name),
                ));
            }
        }
        Ok(())
    }

    /// The `.pyt` path; `<name>.pyt` in the working directory when unset.
    pub fn toolbox_path(&self) -> PathBuf {
        self.toolbox_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", self.name, TOOLBOX_EXTENSION)))
    }

    /// Name ArcGIS knows the toolbox by: the `.pyt` file stem, falling back
    /// to `name` when the path has no usable stem.
    ///
    /// Sidecar file names are keyed on this, so a `name` that differs from
    /// the file stem never leads to files ArcGIS cannot find.
    pub fn toolbox_name(&self) -> String {
        toolbox_name_from(&self.toolbox_path()).unwrap_or_else(|| self.name.clone())
    }

    pub fn tool(&self, name: &str) -> Result<&ToolManifest> {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| MetadataError::ToolNotFound {
                name: name.to_string(),
            })
    }
}

/// `Hydrology.pyt.yaml` → `Hydrology`, `tools.json` → `tools`.
fn toolbox_name_from(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let stem = stem
        .strip_suffix(&format!(".{TOOLBOX_EXTENSION}"))
        .unwrap_or(stem);
    (!stem.is_empty()).then(|| stem.to_string())
}

impl FieldSource for ToolboxManifest {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

impl FieldSource for ToolManifest {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}
