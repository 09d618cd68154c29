//! Schema mappings and attribute overrides.
//!
//! A [`SchemaMapping`] is the ordered list of `(node, parent)` declarations
//! that shapes a metadata document. Parents must be declared before their
//! children and exactly one entry has no parent: the root. The mapping is a
//! plain value passed into [`MetadataTree::build`](crate::MetadataTree::build),
//! so callers can target a different document shape by supplying their own.
//!
//! The default toolbox and tool schemas follow the Esri ArcGIS item
//! description layout that ArcGIS reads from `.pyt.xml` sidecar files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root element name shared by the default schemas.
pub const ROOT_NODE: &str = "metadata";

/// `formatName` for toolbox documents.
pub const TOOLBOX_FORMAT_NAME: &str = "ArcToolbox Toolbox";
/// `formatName` for tool documents.
pub const TOOL_FORMAT_NAME: &str = "ArcToolbox Tool";
/// `ArcGISFormat` value.
pub const ARCGIS_FORMAT: &str = "1.0";
/// `SyncOnce` value.
pub const SYNC_ONCE: &str = "TRUE";
/// `minScale` value.
pub const MIN_SCALE: &str = "150000000";
/// `maxScale` value.
pub const MAX_SCALE: &str = "5000";
/// `ArcGISProfile` value.
pub const ARCGIS_PROFILE: &str = "ItemDescription";

/// One `(node, parent)` declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Ordered parent/child declarations defining a document's element tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SchemaMapping {
    entries: Vec<SchemaEntry>,
}

impl SchemaMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the parentless root entry.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.entries.push(SchemaEntry {
            name: name.into(),
            parent: None,
        });
        self
    }

    /// Declare a child of an earlier entry.
    pub fn child(mut self, name: impl Into<String>, parent: impl Into<String>) -> Self {
        self.entries.push(SchemaEntry {
            name: name.into(),
            parent: Some(parent.into()),
        });
        self
    }

    /// Build a mapping from `(name, parent)` pairs in order.
    pub fn from_pairs<I, N, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, Option<P>)>,
        N: Into<String>,
        P: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, parent)| SchemaEntry {
                name: name.into(),
                parent: parent.map(Into::into),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// The default schema for toolbox documents.
    pub fn default_toolbox() -> Self {
        Self::new()
            .root(ROOT_NODE)
            .esri_section()
            .child("ArcGISProfile", "Esri")
            .child("toolbox", ROOT_NODE)
            .child("arcToolboxHelpPath", "toolbox")
            .child("dataIdInfo", ROOT_NODE)
            .child("idCitation", "dataIdInfo")
            .child("resTitle", "idCitation")
            .child("idPurp", "dataIdInfo")
            .child("searchKeys", "dataIdInfo")
            .child("idAbs", "dataIdInfo")
            .child("idCredit", "dataIdInfo")
            .constraints_and_distribution()
    }

    /// The default schema for tool documents.
    pub fn default_tool() -> Self {
        Self::new()
            .root(ROOT_NODE)
            .esri_section()
            .child("tool", ROOT_NODE)
            .child("arcToolboxHelpPath", "tool")
            .child("summary", "tool")
            .child("usage", "tool")
            .child("scriptExamples", "tool")
            .child("parameters", "tool")
            .child("dataIdInfo", ROOT_NODE)
            .child("idCitation", "dataIdInfo")
            .child("resTitle", "idCitation")
            .child("idCredit", "dataIdInfo")
            .child("searchKeys", "dataIdInfo")
            .constraints_and_distribution()
    }

    fn esri_section(self) -> Self {
        self.child("Esri", ROOT_NODE)
            .child("CreaDate", "Esri")
            .child("CreaTime", "Esri")
            .child("ArcGISFormat", "Esri")
            .child("SyncOnce", "Esri")
            .child("ModDate", "Esri")
            .child("ModTime", "Esri")
            .child("scaleRange", "Esri")
            .child("minScale", "scaleRange")
            .child("maxScale", "scaleRange")
    }

    fn constraints_and_distribution(self) -> Self {
        self.child("resConst", "dataIdInfo")
            .child("Consts", "resConst")
            .child("useLimit", "Consts")
            .child("distInfo", ROOT_NODE)
            .child("distributor", "distInfo")
            .child("distorFormat", "distributor")
            .child("formatName", "distorFormat")
            .child("mdHrLv", ROOT_NODE)
            .child("ScopeCd", "mdHrLv")
            .child("mdDateSt", ROOT_NODE)
    }
}

/// Per-node XML attributes applied while the tree is built.
///
/// Entries for names that are not in the schema are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AttributeOverrides(IndexMap<String, IndexMap<String, String>>);

impl AttributeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute on a node, replacing an earlier value.
    pub fn set(&mut self, node: impl Into<String>, attr: impl Into<String>, value: impl Into<String>) {
        self.0
            .entry(node.into())
            .or_default()
            .insert(attr.into(), value.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, node: impl Into<String>, attr: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(node, attr, value);
        self
    }

    pub fn get(&self, node: &str) -> Option<&IndexMap<String, String>> {
        self.0.get(node)
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.0.contains_key(node)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, String>)> {
        self.0.iter()
    }

    /// The attributes every default document carries.
    pub fn default_document() -> Self {
        Self::new()
            .with(ROOT_NODE, "xml:lang", "en")
            .with("ScopeCd", "value", "005")
            .with("mdDateSt", "Sync", "TRUE")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_of<'a>(schema: &'a SchemaMapping, name: &str) -> Option<&'a str> {
        schema
            .entries()
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.parent.as_deref())
    }

    #[test]
    fn test_default_toolbox_schema_shape() {
        let schema = SchemaMapping::default_toolbox();
        assert_eq!(schema.len(), 31);
        assert_eq!(schema.entries()[0].name, "metadata");
        assert!(schema.entries()[0].parent.is_none());
        assert_eq!(parent_of(&schema, "arcToolboxHelpPath"), Some("toolbox"));
        assert_eq!(parent_of(&schema, "useLimit"), Some("Consts"));
        assert!(!schema.contains("tool"));
    }

    #[test]
    fn test_default_tool_schema_shape() {
        let schema = SchemaMapping::default_tool();
        assert_eq!(schema.len(), 32);
        assert_eq!(parent_of(&schema, "arcToolboxHelpPath"), Some("tool"));
        assert_eq!(parent_of(&schema, "parameters"), Some("tool"));
        assert!(!schema.contains("toolbox"));
        assert!(!schema.contains("idAbs"));
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let schema = SchemaMapping::from_pairs([
            ("root", None),
            ("b", Some("root")),
            ("a", Some("root")),
        ]);
        let names: Vec<_> = schema.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["root", "b", "a"]);
    }

    #[test]
    fn test_schema_yaml_roundtrip_preserves_order() {
        let yaml = "- name: root\n- name: z\n  parent: root\n- name: a\n  parent: z\n";
        let schema: SchemaMapping = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            schema,
            SchemaMapping::new().root("root").child("z", "root").child("a", "z")
        );
    }

    #[test]
    fn test_attribute_overrides_set_replaces() {
        let mut attrs = AttributeOverrides::default_document();
        attrs.set("metadata", "xml:lang", "fr");
        assert_eq!(attrs.get("metadata").unwrap()["xml:lang"], "fr");
        assert_eq!(attrs.get("ScopeCd").unwrap()["value"], "005");
        assert!(!attrs.contains_node("tool"));
    }
}
