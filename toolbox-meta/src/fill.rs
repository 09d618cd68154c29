//! Attribute back-fill.
//!
//! Node text is filled from a [`FieldSource`] by matching node names to field
//! names. Calling [`fill`] repeatedly with `overwrite = false` layers sources:
//! the first source to supply a non-empty string for a node wins, so callers
//! pass sources from most specific to most generic.

use serde_json::Value;
use tracing::{debug, trace};

use crate::source::FieldSource;
use crate::text;
use crate::tree::MetadataTree;

/// Text a source offers for a node, or `None` when nothing is assignable.
///
/// Absent fields resolve to the empty string, which is never assigned.
/// Non-string values are skipped.
fn resolve<S: FieldSource + ?Sized>(source: &S, name: &str) -> Option<String> {
    if !source.has_field(name) {
        return Some(String::new());
    }
    match source.get_field(name) {
        Some(Value::String(value)) => Some(text::normalize(&value)),
        Some(other) => {
            trace!(field = %name, kind = value_kind(&other), "non-string field skipped");
            None
        }
        None => Some(String::new()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fill schema node text from `source`.
///
/// For each indexed node whose name is a string field of `source`, the value
/// (converted to display markup when it is an indented multi-line block) is
/// assigned if the node has no text yet, or always when `overwrite` is set.
/// Empty values never replace anything. The same tree is returned so passes
/// can be chained.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use toolbox_meta::{fill, AttributeOverrides, MetadataTree, SchemaMapping};
///
/// let schema = SchemaMapping::new().root("root").child("x", "root");
/// let mut tree = MetadataTree::build(&schema, &AttributeOverrides::new())?;
///
/// fill(&json!({"x": "foo"}), &mut tree, false);
/// fill(&json!({"x": "bar"}), &mut tree, false);
/// assert_eq!(tree.text_of("x"), Some("foo"));
///
/// fill(&json!({"x": "bar"}), &mut tree, true);
/// assert_eq!(tree.text_of("x"), Some("bar"));
/// # Ok::<(), toolbox_meta::SchemaError>(())
/// ```
pub fn fill<'t, S: FieldSource + ?Sized>(
    source: &S,
    tree: &'t mut MetadataTree,
    overwrite: bool,
) -> &'t mut MetadataTree {
    let mut assigned = 0usize;
    {
        let (index, nodes) = tree.index_and_nodes_mut();
        for (name, id) in index {
            let Some(value) = resolve(source, name) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let node = &mut nodes[id.index()];
            if node.has_empty_text() || overwrite {
                node.set_text(value);
                assigned += 1;
            }
        }
    }
    debug!(assigned, overwrite, "back-fill pass complete");
    tree
}

impl MetadataTree {
    /// Method form of [`fill`].
    pub fn fill_from<S: FieldSource + ?Sized>(&mut self, source: &S, overwrite: bool) -> &mut Self {
        fill(source, self, overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeOverrides, SchemaMapping};
    use serde_json::json;

    fn tree() -> MetadataTree {
        let schema = SchemaMapping::new()
            .root("root")
            .child("x", "root")
            .child("y", "root");
        MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap()
    }

    #[test]
    fn test_first_writer_wins() {
        let mut t = tree();
        fill(&json!({"x": "foo"}), &mut t, false);
        fill(&json!({"x": "bar", "y": "late"}), &mut t, false);
        assert_eq!(t.text_of("x"), Some("foo"));
        assert_eq!(t.text_of("y"), Some("late"));
    }

    #[test]
    fn test_reverse_order_and_overwrite() {
        let a = json!({"x": "foo"});
        let b = json!({"x": "bar"});

        let mut reversed = tree();
        fill(&b, &mut reversed, false);
        fill(&a, &mut reversed, false);
        assert_eq!(reversed.text_of("x"), Some("bar"));

        let mut forced = tree();
        fill(&a, &mut forced, false);
        fill(&b, &mut forced, true);
        assert_eq!(forced.text_of("x"), Some("bar"));
    }

    #[test]
    fn test_idempotent_without_overwrite() {
        let source = json!({"x": "  one\n  two", "y": "flat"});
        let mut once = tree();
        fill(&source, &mut once, false);
        let mut twice = once.clone();
        fill(&source, &mut twice, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_string_values_skipped() {
        let mut t = tree();
        fill(&json!({"x": 42, "y": ["a"]}), &mut t, true);
        assert!(t.get_node("x").unwrap().has_empty_text());
        assert!(t.get_node("y").unwrap().has_empty_text());
    }

    #[test]
    fn test_empty_string_does_not_overwrite() {
        let mut t = tree();
        fill(&json!({"x": "keep"}), &mut t, false);
        fill(&json!({"x": ""}), &mut t, true);
        assert_eq!(t.text_of("x"), Some("keep"));
    }

    #[test]
    fn test_multiline_block_converted() {
        let mut t = tree();
        fill(&json!({"x": "  line1\n  line2"}), &mut t, false);
        assert_eq!(
            t.text_of("x"),
            Some("<span>line1</span><br></br><span>line2</span>")
        );
    }

    #[test]
    fn test_appended_nodes_untouched() {
        let mut t = tree();
        let root = t.root();
        let extra = t.append_child(root, "x");
        t.fill_from(&json!({"x": "v"}), false);
        assert_eq!(t.text_of("x"), Some("v"));
        assert!(t.node(extra).has_empty_text());
    }
}
