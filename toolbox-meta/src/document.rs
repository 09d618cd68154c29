//! Toolbox and tool document generation.
//!
//! A [`Generator`] turns a [`ToolboxManifest`] into one toolbox document and
//! one document per tool. Each document is a fresh [`MetadataTree`] filled in
//! priority order with `overwrite = false`:
//!
//! | document | sources, highest priority first |
//! |----------|---------------------------------|
//! | toolbox  | toolbox manifest, toolbox defaults |
//! | tool     | tool manifest, toolbox manifest, tool defaults, toolbox defaults |
//!
//! Repeated elements (`keyword`, `scriptExample`, `param`) are appended after
//! back-fill as unindexed children.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::dates::FileDates;
use crate::defaults::{dialog_reference, python_reference, ToolDefaults, ToolboxDefaults};
use crate::error::{MetadataError, Result};
use crate::fill::fill;
use crate::keywords::{DefaultKeywordPolicy, KeywordPolicy};
use crate::manifest::{ToolManifest, ToolboxManifest};
use crate::options::GeneratorOptions;
use crate::schema::AttributeOverrides;
use crate::text::to_markup;
use crate::tree::{MetadataTree, NodeId};
use crate::xml::{to_xml_string, write_document};

/// Which document a [`Document`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Toolbox,
    Tool(String),
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Toolbox => write!(f, "toolbox"),
            DocumentKind::Tool(name) => write!(f, "tool {name}"),
        }
    }
}

/// A generated metadata document and where it belongs on disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub tree: MetadataTree,
}

impl Document {
    pub fn to_xml(&self, pretty: bool) -> Result<String> {
        to_xml_string(&self.tree, pretty)
    }

    /// Write the document to [`Document::path`]; see [`write_document`].
    pub fn write(&self, overwrite: bool) -> Result<bool> {
        write_document(&self.path, &self.tree, overwrite)
    }
}

/// Files written and skipped by [`Generator::write_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl WriteReport {
    /// Write `documents` in order, recording which files were skipped.
    pub fn write(documents: impl IntoIterator<Item = Document>, overwrite: bool) -> Result<Self> {
        let mut report = Self::default();
        for document in documents {
            if document.write(overwrite)? {
                report.written.push(document.path);
            } else {
                report.skipped.push(document.path);
            }
        }
        Ok(report)
    }
}

/// Generates the metadata documents of one toolbox.
pub struct Generator {
    manifest: ToolboxManifest,
    options: GeneratorOptions,
    toolbox_defaults: ToolboxDefaults,
    tool_defaults: Vec<ToolDefaults>,
    policy: Box<dyn KeywordPolicy>,
}

/// Builder for [`Generator`].
pub struct GeneratorBuilder {
    manifest: ToolboxManifest,
    options: GeneratorOptions,
    file_dates: Option<FileDates>,
    policy: Box<dyn KeywordPolicy>,
}

impl GeneratorBuilder {
    pub fn options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Use these dates instead of probing the toolbox file.
    pub fn file_dates(mut self, dates: FileDates) -> Self {
        self.file_dates = Some(dates);
        self
    }

    pub fn keyword_policy(mut self, policy: impl KeywordPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Compute the default-value sources for the toolbox and every tool.
    ///
    /// When no dates were given and the toolbox file cannot be read, the
    /// current time is used.
    pub fn build(self) -> Result<Generator> {
        let dates = match self.file_dates {
            Some(dates) => dates,
            None => {
                let path = self.manifest.toolbox_path();
                FileDates::probe(&path).unwrap_or_else(|e| {
                    warn!(path = %path.display(), error = %e, "cannot read toolbox dates, using current time");
                    FileDates::now()
                })
            }
        };

        let toolbox_defaults =
            ToolboxDefaults::new(&self.manifest, &self.options, &dates, self.policy.as_ref())?;
        let tool_defaults = self
            .manifest
            .tools
            .iter()
            .map(|tool| ToolDefaults::new(tool, &toolbox_defaults, self.policy.as_ref()))
            .collect();

        Ok(Generator {
            manifest: self.manifest,
            options: self.options,
            toolbox_defaults,
            tool_defaults,
            policy: self.policy,
        })
    }
}

impl Generator {
    pub fn builder(manifest: ToolboxManifest) -> GeneratorBuilder {
        GeneratorBuilder {
            manifest,
            options: GeneratorOptions::default(),
            file_dates: None,
            policy: Box::new(DefaultKeywordPolicy),
        }
    }

    pub fn manifest(&self) -> &ToolboxManifest {
        &self.manifest
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn output_dir(&self) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .manifest
                .toolbox_path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    /// `<toolbox path>.xml`, or the same file name inside the output directory.
    pub fn toolbox_document_path(&self) -> PathBuf {
        let toolbox_path = self.manifest.toolbox_path();
        let file_name = match toolbox_path.file_name() {
            Some(name) => format!("{}.xml", name.to_string_lossy()),
            None => format!("{}.pyt.xml", self.toolbox_defaults.name()),
        };
        self.output_dir().join(file_name)
    }

    /// `<toolbox file stem>.<tool name>.pyt.xml` in the output directory.
    pub fn tool_document_path(&self, tool_name: &str) -> PathBuf {
        self.output_dir()
            .join(format!("{}.{}.pyt.xml", self.toolbox_defaults.name(), tool_name))
    }

    /// Toolbox keywords merged with every tool's keywords.
    pub fn aggregated_keywords(&self) -> Vec<String> {
        let mut all: Vec<&str> = self
            .toolbox_defaults
            .keywords()
            .iter()
            .map(String::as_str)
            .collect();
        for tool in &self.tool_defaults {
            all.extend(tool.keywords().iter().map(String::as_str));
        }
        let joined = all.join(" ");
        self.policy.keywords(&[joined.as_str()])
    }

    pub fn toolbox_document(&self) -> Result<Document> {
        let mut attributes = self.options.toolbox_attributes.clone();
        if !attributes.contains_node("toolbox") {
            attributes.set("toolbox", "name", self.toolbox_defaults.name());
            attributes.set("toolbox", "alias", self.toolbox_defaults.alias());
        }

        let mut tree = MetadataTree::build(&self.options.toolbox_schema, &attributes)?;
        fill(&self.manifest, &mut tree, false);
        fill(&self.toolbox_defaults, &mut tree, false);

        let keywords = self.aggregated_keywords();
        append_keywords(&mut tree, &DocumentKind::Toolbox, &keywords)?;

        let path = self.toolbox_document_path();
        debug!(path = %path.display(), nodes = tree.len(), "built toolbox document");
        Ok(Document {
            kind: DocumentKind::Toolbox,
            path,
            tree,
        })
    }

    pub fn tool_document(&self, name: &str) -> Result<Document> {
        let index = self
            .manifest
            .tools
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| MetadataError::ToolNotFound {
                name: name.to_string(),
            })?;
        self.build_tool_document(&self.manifest.tools[index], &self.tool_defaults[index])
    }

    pub fn tool_documents(&self) -> Result<Vec<Document>> {
        self.manifest
            .tools
            .iter()
            .zip(&self.tool_defaults)
            .map(|(tool, defaults)| self.build_tool_document(tool, defaults))
            .collect()
    }

    /// Every tool document followed by the toolbox document.
    pub fn documents(&self) -> Result<Vec<Document>> {
        let mut documents = self.tool_documents()?;
        documents.push(self.toolbox_document()?);
        Ok(documents)
    }

    /// Write every document, skipping existing files unless `overwrite`.
    pub fn write_all(&self, overwrite: bool) -> Result<WriteReport> {
        let report = WriteReport::write(self.documents()?, overwrite)?;
        info!(
            toolbox = %self.toolbox_defaults.name(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "metadata generation complete"
        );
        Ok(report)
    }

    fn tool_attributes(&self, tool: &ToolManifest, defaults: &ToolDefaults) -> AttributeOverrides {
        let mut attributes = self.options.tool_attributes.clone();
        if !attributes.contains_node("tool") {
            attributes.set("tool", "xmlns", "");
            attributes.set("tool", "name", tool.name.as_str());
            attributes.set("tool", "displayname", defaults.label());
            attributes.set("tool", "toolboxalias", self.toolbox_defaults.alias());
        }
        attributes
    }

    fn build_tool_document(&self, tool: &ToolManifest, defaults: &ToolDefaults) -> Result<Document> {
        let kind = DocumentKind::Tool(tool.name.clone());
        let attributes = self.tool_attributes(tool, defaults);

        let mut tree = MetadataTree::build(&self.options.tool_schema, &attributes)?;
        fill(tool, &mut tree, false);
        fill(&self.manifest, &mut tree, false);
        fill(defaults, &mut tree, false);
        fill(&self.toolbox_defaults, &mut tree, false);

        append_keywords(&mut tree, &kind, defaults.keywords())?;

        let examples = defaults.script_examples();
        if !examples.is_empty() {
            let parent = require(&tree, &kind, "scriptExamples")?;
            for example in examples {
                let node = tree.append_child(parent, "scriptExample");
                tree.append_text_child(node, "title", example.title.as_str());
                tree.append_text_child(node, "para", to_markup(&example.para));
                tree.append_text_child(node, "code", example.code.as_str());
            }
        }

        if !tool.parameters.is_empty() {
            let parent = require(&tree, &kind, "parameters")?;
            for parameter in &tool.parameters {
                let node = tree.append_child(parent, "param");
                tree.set_attribute(node, "type", parameter.parameter_type.as_str());
                tree.set_attribute(node, "datatype", parameter.datatype.as_str());
                tree.set_attribute(node, "name", parameter.name.as_str());
                tree.set_attribute(node, "displayname", parameter.label());
                tree.set_attribute(node, "direction", parameter.direction.as_str());
                tree.append_text_child(node, "dialogReference", dialog_reference(parameter));
                tree.append_text_child(node, "pythonReference", python_reference(parameter));
            }
        }

        let path = self.tool_document_path(&tool.name);
        debug!(tool = %tool.name, path = %path.display(), nodes = tree.len(), "built tool document");
        Ok(Document { kind, path, tree })
    }
}

fn require(tree: &MetadataTree, kind: &DocumentKind, node: &str) -> Result<NodeId> {
    tree.get(node).ok_or_else(|| MetadataError::MissingNode {
        document: kind.to_string(),
        node: node.to_string(),
    })
}

fn append_keywords(tree: &mut MetadataTree, kind: &DocumentKind, keywords: &[String]) -> Result<()> {
    if keywords.is_empty() {
        return Ok(());
    }
    let parent = require(tree, kind, "searchKeys")?;
    for keyword in keywords {
        tree.append_text_child(parent, "keyword", keyword.as_str());
    }
    Ok(())
}
