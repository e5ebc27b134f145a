//! Mold IR - the directive tree produced by the parser.
//!
//! Nodes live in one arena ([`Ast`]) and are addressed by [`NodeId`]. Each
//! node records the id of its lexical parent: the enclosing node in the
//! document, not the runtime caller. Walking parent ids from a node up to
//! the shared [`NodeId::ROOT`] sentinel visits every enclosing `::let` and
//! `::each`, which is how lexically bound names are resolved.
//!
//! The tree is immutable once built, so one parsed document can be
//! evaluated from several threads at once.

mod ast;
mod node;
mod path;

pub use ast::{Ast, Scopes};
pub use node::{ApplyArgs, LetBindings, LoopVar, Node, NodeId, NodeKind};
pub use path::Path;
