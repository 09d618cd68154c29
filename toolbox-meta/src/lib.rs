//! XML metadata sidecars for ArcGIS python toolboxes
//!
//! `toolbox-meta` builds the `.pyt.xml` item-description documents ArcGIS reads
//! next to a python toolbox: one for the toolbox and one per tool. Toolbox and
//! tool attributes come from a manifest; anything the manifest leaves out is
//! filled with generated defaults.
//!
//! # Architecture
//!
//! - **Tree builder**: a [`SchemaMapping`] of `(node, parent)` declarations plus
//!   [`AttributeOverrides`] becomes a [`MetadataTree`] with a name index
//! - **Back-fill**: [`fill`] copies string fields of a [`FieldSource`] onto
//!   matching nodes; repeated passes with `overwrite = false` layer sources,
//!   first writer wins
//! - **Text normalizer**: indented multi-line values become `<span>` markup
//!   joined by `<br></br>` ([`text::normalize`])
//! - **Documents**: [`Generator`] runs the passes in priority order and
//!   writes the results with an overwrite-or-skip rule
//!
//! # Example
//!
//! ```
//! use toolbox_meta::{FileDates, Generator, ToolManifest, ToolboxManifest};
//!
//! let manifest = ToolboxManifest::new("Hydrology")
//!     .with_field("alias", "hydro")
//!     .with_tool(ToolManifest::new("FillSinks").with_field("label", "Fill Sinks"));
//!
//! let generator = Generator::builder(manifest)
//!     .file_dates(FileDates::now())
//!     .build()?;
//! let document = generator.tool_document("FillSinks")?;
//! assert_eq!(document.tree.text_of("resTitle"), Some("hydro.(Uncategorized)"));
//! # Ok::<(), toolbox_meta::MetadataError>(())
//! ```

pub mod credits;
pub mod dates;
pub mod defaults;
pub mod document;
pub mod error;
pub mod fill;
pub mod keywords;
pub mod manifest;
pub mod options;
pub mod schema;
pub mod source;
pub mod text;
pub mod tree;
pub mod xml;

pub use credits::Contact;
pub use dates::{DateFormat, FileDates, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
pub use defaults::{ToolDefaults, ToolboxDefaults};
pub use document::{Document, DocumentKind, Generator, GeneratorBuilder, WriteReport};
pub use error::{MetadataError, Result, SchemaError};
pub use fill::fill;
pub use keywords::{DefaultKeywordPolicy, KeywordPolicy};
pub use manifest::{ParameterDefinition, ParameterFilter, ScriptExample, ToolManifest, ToolboxManifest};
pub use options::{GeneratorOptions, GENERATOR_NAME};
pub use schema::{AttributeOverrides, SchemaEntry, SchemaMapping};
pub use source::FieldSource;
pub use tree::{MetadataTree, Node, NodeId};
pub use xml::{to_xml_string, write_document};
