//! Node tree for the Thicket markup parser.
//!
//! This crate provides the arena-based tree the parser builds into.
//!
//! # Design
//!
//! All nodes live in one contiguous vector and refer to each other through
//! [`NodeId`] indices. A parent owns the ordered list of its children; the
//! child's `parent` field is a plain index kept for upward lookup, so the
//! tree has no reference cycles and no borrow checker friction while it is
//! being built.
//!
//! Index 0 is always the synthetic [`NodeKind::Fragment`] root.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// Keys are case-sensitive and unique; a repeated attribute overwrites the
/// earlier value.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic fragment root is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One node of the tree.
///
/// The parent link is informational only: ownership runs strictly from a
/// parent's `children` list downwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What kind of node this is, with the data that kind carries.
    pub kind: NodeKind,

    /// The node this one was attached to, or `None` for the root and for
    /// nodes allocated but never attached.
    pub parent: Option<NodeId>,

    /// Children in the order they were scanned.
    pub children: Vec<NodeId>,
}

/// The five node kinds, each carrying only the data it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic container for top-level nodes. Never appears in input.
    Fragment,
    /// A tag with its attributes. Children hang off the owning [`Node`].
    Element(ElementData),
    /// A run of text, stored exactly as scanned.
    Text(String),
    /// The raw text between `<!--` and `-->`, byte for byte.
    Comment(String),
    /// The trimmed content following the doctype keyword.
    Doctype(String),
}

impl NodeKind {
    /// Short lowercase name of the kind (`"element"`, `"text"`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::Doctype(_) => "doctype",
        }
    }
}

/// Element-specific data.
///
/// The tag name is stored verbatim; no case folding happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name as written in the input.
    pub tag_name: String,
    /// Attribute name to value. Boolean attributes map to `""`.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a tag name and attribute map.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the attribute `name` is present (with any value, including
    /// the empty value of a boolean attribute).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// Arena-based tree with O(1) node access.
///
/// `NodeId::ROOT` is created by [`DomTree::new`] and holds a
/// [`NodeKind::Fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the fragment root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Fragment,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a tree made by [`DomTree::new`]; present for API
    /// symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new, unattached node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent` and record the parent
    /// link.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in scan order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Number of nodes below `id` (not counting `id` itself).
    #[must_use]
    pub fn descendant_count(&self, id: NodeId) -> usize {
        let mut pending: Vec<NodeId> = self.children(id).to_vec();
        let mut count = 0;
        while let Some(next) = pending.pop() {
            count += 1;
            pending.extend_from_slice(self.children(next));
        }
        count
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get the comment body if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get the declaration content if this node is a doctype.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Doctype(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// A finished parse: the arena plus the node callers should treat as the
/// root.
///
/// The root is the fragment's only child when there is exactly one
/// top-level node, and the fragment itself otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    tree: DomTree,
    root: NodeId,
}

impl Document {
    /// Wrap a finished tree, unwrapping the fragment root when it has
    /// exactly one child.
    #[must_use]
    pub fn from_tree(tree: DomTree) -> Self {
        let root = match tree.children(NodeId::ROOT) {
            [only] => *only,
            _ => NodeId::ROOT,
        };
        Self { tree, root }
    }

    /// The underlying arena.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The selected root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The selected root node itself.
    ///
    /// # Panics
    ///
    /// Never in practice: the root ID always comes from this document's
    /// own tree.
    #[must_use]
    pub fn root_node(&self) -> &Node {
        &self.tree.nodes[self.root.0]
    }

    /// Whether the root is the synthetic fragment (zero or several
    /// top-level nodes).
    #[must_use]
    pub fn is_fragment(&self) -> bool {
        self.root == NodeId::ROOT
    }

    /// Split into the arena and the root ID.
    #[must_use]
    pub fn into_parts(self) -> (DomTree, NodeId) {
        (self.tree, self.root)
    }
}
