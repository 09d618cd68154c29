//! XML serialization of metadata trees and sidecar file output.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, info};

use crate::error::Result;
use crate::tree::{MetadataTree, NodeId};

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// `text` without the characters XML 1.0 cannot represent.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    debug!("dropping characters not allowed in XML 1.0");
    Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
}

/// Serialize a tree as a UTF-8 XML document.
///
/// Text and attribute values are escaped, so markup produced by the text
/// normalizer is stored as character data. Control characters XML 1.0 does
/// not allow are dropped. Elements with neither text nor children are
/// written as empty elements.
pub fn to_xml_string(tree: &MetadataTree, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, tree, tree.root())?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, tree: &MetadataTree, id: NodeId) -> Result<()> {
    let node = tree.node(id);
    let mut start = BytesStart::new(node.name());
    for (name, value) in node.attributes() {
        start.push_attribute((name.as_str(), &*xml_safe(value)));
    }

    let text = node.text().filter(|t| !t.is_empty());
    if text.is_none() && node.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
    }
    for child in node.children() {
        write_element(writer, tree, *child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name())))?;
    Ok(())
}

/// Write a tree to `path`.
///
/// An existing file is left untouched unless `overwrite` is set. Returns
/// whether the file was written.
pub fn write_document(path: &Path, tree: &MetadataTree, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        debug!(path = %path.display(), "metadata exists, skipping");
        return Ok(false);
    }
    let xml = to_xml_string(tree, false)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, xml)?;
    info!(path = %path.display(), "wrote metadata");
    Ok(true)
}
