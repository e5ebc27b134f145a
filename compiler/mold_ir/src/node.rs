//! Node ids and node kinds.

use std::fmt;

use mold_functions::Builtin;
use mold_value::Value;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::Path;

/// Index into an [`Ast`](crate::Ast).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The shared `Empty` sentinel every top-level node hangs from. Lexical
    /// lookups that reach it fail.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Function arguments; most applications take at most four.
pub type ApplyArgs = SmallVec<[NodeId; 4]>;

/// Bindings introduced by one `::let`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LetBindings {
    /// Plain names, resolved through the parent chain and evaluated on use.
    pub lexical: FxHashMap<String, NodeId>,
    /// `$`-prefixed names, evaluated in order on entry to the `::let`.
    pub dynamic: Vec<(String, NodeId)>,
}

/// Source or target of `::each <source> as <target>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopVar {
    /// `$name`: a dynamic variable. `$` alone names the positional
    /// arguments of the enclosing template call.
    Dynamic(String),
    /// `name`: a lexical binding.
    Lexical(String),
}

impl LoopVar {
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix('$') {
            Some(name) => LoopVar::Dynamic(name.to_string()),
            None => LoopVar::Lexical(text.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LoopVar::Dynamic(name) | LoopVar::Lexical(name) => name,
        }
    }
}

/// What a node does when evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The root sentinel. Also the kind of a slot that has been reserved
    /// but not yet filled.
    Empty,
    Constant(Value),
    /// A lexical reference: `::ref: name.a.b`.
    GetLet(Path),
    /// A dynamic reference: `::ref: $name.a.b`.
    GetDyn(Path),
    /// An OS variable reference: `::ref: HOME`.
    GetEnvVar(Path),
    Let {
        bindings: LetBindings,
        body: NodeId,
    },
    /// `body`, or `fallback` when `body` is empty or fails recoverably.
    Else {
        body: NodeId,
        fallback: NodeId,
    },
    /// Plain keys, in declaration order. Keys are interpolated.
    Object(Vec<(String, NodeId)>),
    Sequence(Vec<NodeId>),
    /// `::name: args` for a built-in function.
    Apply {
        function: &'static Builtin,
        args: ApplyArgs,
    },
    /// Fragments of one mapping, combined by structural merge.
    Merge(Vec<NodeId>),
    /// `::call name: { $arg: ... }`: a template call.
    Call {
        template: String,
        args: Vec<(String, NodeId)>,
    },
    Each {
        source: LoopVar,
        target: LoopVar,
        body: NodeId,
    },
    When {
        condition: NodeId,
        then: NodeId,
        otherwise: Option<NodeId>,
    },
    /// `(condition, action)` pairs tried in order.
    Case(Vec<(NodeId, NodeId)>),
    All(Vec<NodeId>),
    Any(Vec<NodeId>),
    /// A string (or a structure with string leaves) with `<<name>>`
    /// placeholders.
    Format(Value),
}

impl NodeKind {
    /// Directive name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Empty => "empty",
            NodeKind::Constant(_) => "constant",
            NodeKind::GetLet(_) | NodeKind::GetDyn(_) | NodeKind::GetEnvVar(_) => "::ref",
            NodeKind::Let { .. } => "::let",
            NodeKind::Else { .. } => "::else",
            NodeKind::Object(_) => "object",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Apply { function, .. } => function.name,
            NodeKind::Merge(_) => "merge",
            NodeKind::Call { .. } => "::call",
            NodeKind::Each { .. } => "::each",
            NodeKind::When { .. } => "::when",
            NodeKind::Case(_) => "::case",
            NodeKind::All(_) => "::all",
            NodeKind::Any(_) => "::any",
            NodeKind::Format(_) => "::format",
        }
    }
}

/// One arena slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: NodeId,
}
