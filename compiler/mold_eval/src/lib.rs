//! Mold Eval - evaluates a parsed document.
//!
//! The [`Interpreter`] walks an [`Ast`](mold_ir::Ast) against an
//! [`Environment`] of dynamic bindings and produces a plain
//! [`Value`](mold_value::Value). Lexical names are resolved by walking the
//! node's ancestors in the tree; dynamic names by walking the environment.
//!
//! The tree is never mutated during evaluation. Loop elements and call
//! arguments travel in the environment, so one tree can be evaluated from
//! several threads at once.

mod environment;
pub mod errors;
pub mod interpreter;
mod vars;

pub use environment::Environment;
pub use errors::{
    function_error, no_case_match, no_merge, type_mismatch, undefined_dynamic, undefined_env,
    undefined_lexical, EvalError, EvalErrorKind, EvalResult,
};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use vars::{MapVars, OsVars, VarProvider};
