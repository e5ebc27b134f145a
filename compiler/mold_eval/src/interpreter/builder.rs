//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::sync::Arc;

use mold_ir::Ast;
use mold_value::Value;

use super::Interpreter;
use crate::{OsVars, VarProvider};

/// Builder for [`Interpreter`].
///
/// Defaults: OS variables come from the process environment and a `select`
/// projection that finds nothing yields null.
pub struct InterpreterBuilder<'a> {
    ast: &'a Ast,
    vars: Option<Arc<dyn VarProvider>>,
    select_fallback: Value,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        InterpreterBuilder {
            ast,
            vars: None,
            select_fallback: Value::Null,
        }
    }

    /// Where `::ref: UPPER_CASE` reads from.
    #[must_use]
    pub fn vars(mut self, vars: impl VarProvider + 'static) -> Self {
        self.vars = Some(Arc::new(vars));
        self
    }

    /// Share a provider between several interpreters.
    #[must_use]
    pub fn shared_vars(mut self, vars: Arc<dyn VarProvider>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// The value of `name.missing.path` when the projection finds nothing.
    #[must_use]
    pub fn select_fallback(mut self, fallback: Value) -> Self {
        self.select_fallback = fallback;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            ast: self.ast,
            vars: self.vars.unwrap_or_else(|| Arc::new(OsVars)),
            select_fallback: self.select_fallback,
        }
    }
}
