//! Metadata element tree.
//!
//! Nodes live in an arena owned by [`MetadataTree`] and refer to each other by
//! [`NodeId`]. Because a parent must be declared before its children, the
//! tree is acyclic by construction.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::SchemaError;
use crate::schema::{AttributeOverrides, SchemaMapping};

/// Handle to a node inside a [`MetadataTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A named element with ordered attributes, optional text and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True when the node carries no text or only an empty string.
    pub fn has_empty_text(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

/// A rooted element tree built from a [`SchemaMapping`].
///
/// Every schema node is reachable by name through the index; elements added
/// later with [`append_child`](Self::append_child) are not indexed, since
/// repeated elements such as `keyword` share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTree {
    nodes: Vec<Node>,
    root: NodeId,
    index: IndexMap<String, NodeId>,
}

impl MetadataTree {
    /// Build a tree from a schema mapping and per-node attribute overrides.
    ///
    /// Entries are processed in order: each becomes the last child of its
    /// already-declared parent, then receives any attributes registered for
    /// its name. Overrides naming nodes outside the schema are ignored.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::UnknownParent`] if a parent has not been declared yet
    /// * [`SchemaError::MultipleRoots`] if more than one entry has no parent
    /// * [`SchemaError::DuplicateNode`] if a name is declared twice
    /// * [`SchemaError::MissingRoot`] if no entry is parentless
    ///
    /// # Examples
    ///
    /// ```
    /// use toolbox_meta::{AttributeOverrides, MetadataTree, SchemaMapping};
    ///
    /// let schema = SchemaMapping::new().root("root").child("child", "root");
    /// let attrs = AttributeOverrides::new().with("root", "lang", "en");
    /// let tree = MetadataTree::build(&schema, &attrs)?;
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.node(tree.root()).attribute("lang"), Some("en"));
    /// # Ok::<(), toolbox_meta::SchemaError>(())
    /// ```
    pub fn build(
        schema: &SchemaMapping,
        attributes: &AttributeOverrides,
    ) -> Result<Self, SchemaError> {
        let mut nodes: Vec<Node> = Vec::with_capacity(schema.len());
        let mut index: IndexMap<String, NodeId> = IndexMap::with_capacity(schema.len());
        let mut root: Option<NodeId> = None;

        for entry in schema.entries() {
            if index.contains_key(&entry.name) {
                return Err(SchemaError::DuplicateNode {
                    node: entry.name.clone(),
                });
            }

            let id = NodeId(nodes.len());
            match &entry.parent {
                None => {
                    if let Some(existing) = root {
                        return Err(SchemaError::MultipleRoots {
                            node: entry.name.clone(),
                            root: nodes[existing.0].name.clone(),
                        });
                    }
                    nodes.push(Node::new(&entry.name, None));
                    root = Some(id);
                }
                Some(parent_name) => {
                    let parent = *index.get(parent_name).ok_or_else(|| {
                        SchemaError::UnknownParent {
                            node: entry.name.clone(),
                            parent: parent_name.clone(),
                        }
                    })?;
                    nodes.push(Node::new(&entry.name, Some(parent)));
                    nodes[parent.0].children.push(id);
                }
            }

            if let Some(attrs) = attributes.get(&entry.name) {
                let node = &mut nodes[id.0];
                for (attr, value) in attrs {
                    node.attributes.insert(attr.clone(), value.clone());
                }
            }

            index.insert(entry.name.clone(), id);
            trace!(node = %entry.name, parent = ?entry.parent, "schema node created");
        }

        let root = root.ok_or(SchemaError::MissingRoot)?;

        for (name, _) in attributes.iter() {
            if !index.contains_key(name) {
                debug!(node = %name, "attribute override ignored: node not in schema");
            }
        }

        Ok(Self { nodes, root, index })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this tree. Use
    /// [`try_node`](Self::try_node) for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Borrow a node by id, or `None` if the id does not belong to this tree.
    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Look up a schema node by name.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Look up a schema node by name and borrow it.
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.get(name).map(|id| self.node(id))
    }

    /// The name → node index covering every schema entry, in schema order.
    pub fn index(&self) -> &IndexMap<String, NodeId> {
        &self.index
    }

    /// Total number of nodes, including appended ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text of a schema node, if it has any.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.get_node(name).and_then(Node::text)
    }

    /// Replace the text of a node.
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this tree.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].set_text(text);
    }

    /// Set an attribute on a node, replacing an earlier value.
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this tree.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0].attributes.insert(name.into(), value.into());
    }

    /// Append an unindexed element as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` was not handed out by this tree. The tree is left
    /// unchanged in that case.
    pub fn append_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node::new(name, Some(parent)));
        id
    }

    /// Append an unindexed element carrying text.
    pub fn append_text_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> NodeId {
        let id = self.append_child(parent, name);
        self.set_text(id, text);
        id
    }

    /// Node ids in depth-first document order starting at the root.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Split borrow used by back-fill: the index alongside mutable nodes.
    pub(crate) fn index_and_nodes_mut(&mut self) -> (&IndexMap<String, NodeId>, &mut [Node]) {
        (&self.index, &mut self.nodes)
    }
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &MetadataTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.node(*id).name().to_string()).collect()
    }

    #[test]
    fn test_build_mirrors_schema_edges() {
        let schema = SchemaMapping::default_toolbox();
        let tree = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap();

        assert_eq!(tree.len(), schema.len());
        assert_eq!(tree.index().len(), schema.len());
        for entry in schema.entries() {
            let node = tree.get_node(&entry.name).unwrap();
            let parent = node.parent().map(|p| tree.node(p).name().to_string());
            assert_eq!(parent, entry.parent, "parent of {}", entry.name);
        }
    }

    #[test]
    fn test_children_in_insertion_order() {
        let schema = SchemaMapping::new()
            .root("root")
            .child("b", "root")
            .child("a", "root")
            .child("c", "root");
        let tree = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap();
        let root = tree.node(tree.root());
        assert_eq!(names(&tree, root.children()), ["b", "a", "c"]);
    }

    #[test]
    fn test_forward_reference_fails() {
        let schema = SchemaMapping::new()
            .root("root")
            .child("grandchild", "child")
            .child("child", "root");
        let err = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownParent {
                node: "grandchild".into(),
                parent: "child".into()
            }
        );
    }

    #[test]
    fn test_missing_root_fails() {
        let empty = SchemaMapping::new();
        assert_eq!(
            MetadataTree::build(&empty, &AttributeOverrides::new()).unwrap_err(),
            SchemaError::MissingRoot
        );
    }

    #[test]
    fn test_second_root_fails() {
        let schema = SchemaMapping::new().root("a").root("b");
        let err = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap_err();
        assert!(matches!(err, SchemaError::MultipleRoots { ref node, ref root } if node == "b" && root == "a"));
    }

    #[test]
    fn test_duplicate_name_fails() {
        let schema = SchemaMapping::new().root("a").child("b", "a").child("b", "a");
        let err = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateNode { node: "b".into() });
    }

    #[test]
    fn test_attributes_applied_only_to_schema_nodes() {
        let schema = SchemaMapping::new().root("root").child("child", "root");
        let attrs = AttributeOverrides::new()
            .with("root", "lang", "en")
            .with("child", "value", "005")
            .with("ghost", "x", "y");
        let tree = MetadataTree::build(&schema, &attrs).unwrap();

        assert_eq!(tree.node(tree.root()).attribute("lang"), Some("en"));
        assert_eq!(tree.get_node("child").unwrap().attribute("value"), Some("005"));
        assert!(tree.get("ghost").is_none());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_append_child_not_indexed() {
        let schema = SchemaMapping::new().root("root").child("searchKeys", "root");
        let mut tree = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap();
        let keys = tree.get("searchKeys").unwrap();
        tree.append_text_child(keys, "keyword", "ROADS");
        tree.append_text_child(keys, "keyword", "Hydrology");

        assert_eq!(tree.len(), 4);
        assert!(tree.get("keyword").is_none());
        let texts: Vec<_> = tree
            .node(keys)
            .children()
            .iter()
            .map(|id| tree.node(*id).text().unwrap())
            .collect();
        assert_eq!(texts, ["ROADS", "Hydrology"]);
    }

    #[test]
    fn test_walk_is_document_order() {
        let schema = SchemaMapping::new()
            .root("r")
            .child("a", "r")
            .child("a1", "a")
            .child("b", "r")
            .child("a2", "a");
        let tree = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap();
        assert_eq!(names(&tree, &tree.walk()), ["r", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_has_empty_text() {
        let schema = SchemaMapping::new().root("r");
        let mut tree = MetadataTree::build(&schema, &AttributeOverrides::new()).unwrap();
        let root = tree.root();
        assert!(tree.node(root).has_empty_text());
        tree.set_text(root, "");
        assert!(tree.node(root).has_empty_text());
        tree.set_text(root, "x");
        assert!(!tree.node(root).has_empty_text());
    }

    #[test]
    fn test_foreign_node_id() {
        let big = MetadataTree::build(&SchemaMapping::default_tool(), &AttributeOverrides::new()).unwrap();
        let small = MetadataTree::build(&SchemaMapping::new().root("r"), &AttributeOverrides::new()).unwrap();
        let foreign = big.get("summary").unwrap();

        assert!(small.try_node(foreign).is_none());
        assert_eq!(small.try_node(small.root()).map(Node::name), Some("r"));
    }

    #[test]
    #[should_panic]
    fn test_append_child_foreign_parent_panics() {
        let big = MetadataTree::build(&SchemaMapping::default_tool(), &AttributeOverrides::new()).unwrap();
        let mut small = MetadataTree::build(&SchemaMapping::new().root("r"), &AttributeOverrides::new()).unwrap();
        small.append_child(big.get("summary").unwrap(), "keyword");
    }
}
