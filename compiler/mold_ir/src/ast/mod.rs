//! The node arena.

use crate::{Node, NodeId, NodeKind};

/// A parsed document: an arena of nodes plus the id of the top node.
///
/// Slot 0 always holds the `Empty` root sentinel, whose parent is itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    top: NodeId,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: vec![Node {
                kind: NodeKind::Empty,
                parent: NodeId::ROOT,
            }],
            top: NodeId::ROOT,
        }
    }

    /// Reserve a slot under `parent`. The slot is `Empty` until
    /// [`Ast::set_kind`] fills it, which lets children be parsed with the
    /// new id as their parent.
    pub fn reserve(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            kind: NodeKind::Empty,
            parent,
        });
        id
    }

    /// Allocate a finished node.
    pub fn alloc(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.reserve(parent);
        self.set_kind(id, kind);
        id
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        debug_assert!(!id.is_root(), "the root sentinel is immutable");
        self.nodes[id.index()].kind = kind;
    }

    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(!id.is_root(), "the root sentinel is immutable");
        self.nodes[id.index()].parent = parent;
    }

    pub fn set_top(&mut self, id: NodeId) {
        self.top = id;
    }

    /// The document's top node.
    #[inline]
    pub fn top(&self) -> NodeId {
        self.top
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].parent
    }

    /// Number of slots, including the root sentinel.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root sentinel exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// `from` and each of its lexical ancestors, stopping before the root
    /// sentinel.
    pub fn scopes(&self, from: NodeId) -> Scopes<'_> {
        Scopes {
            ast: self,
            next: Some(from).filter(|id| !id.is_root()),
        }
    }
}

/// Iterator over a node and its lexical ancestors. See [`Ast::scopes`].
pub struct Scopes<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Scopes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let parent = self.ast.parent(current);
        self.next = Some(parent).filter(|id| !id.is_root() && *id != current);
        Some(current)
    }
}
