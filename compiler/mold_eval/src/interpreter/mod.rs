//! Tree-walking interpreter.

mod builder;
mod interpolate;

use std::sync::Arc;

use mold_ir::{Ast, LoopVar, NodeId, NodeKind};
use mold_stack::ensure_sufficient_stack;
use mold_value::{Map, Segment, Value};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    function_error, no_case_match, no_merge, type_mismatch, undefined_dynamic, undefined_env,
    undefined_lexical, EvalResult, Environment, VarProvider,
};

pub use builder::InterpreterBuilder;

/// Evaluates one parsed document.
///
/// Holds only shared references and configuration, so a single interpreter
/// may serve any number of concurrent [`Interpreter::eval`] calls.
pub struct Interpreter<'a> {
    ast: &'a Ast,
    vars: Arc<dyn VarProvider>,
    select_fallback: Value,
}

impl<'a> Interpreter<'a> {
    /// An interpreter with default configuration.
    pub fn new(ast: &'a Ast) -> Self {
        InterpreterBuilder::new(ast).build()
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    /// Evaluate the whole document.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval(&self, env: &Environment) -> EvalResult {
        self.eval_node(self.ast.top(), env)
    }

    /// Evaluate the subtree rooted at `id`.
    pub fn eval_node(&self, id: NodeId, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(id, env))
    }

    fn eval_inner(&self, id: NodeId, env: &Environment) -> EvalResult {
        match self.ast.kind(id) {
            NodeKind::Empty => Ok(Value::Null),
            NodeKind::Constant(value) => Ok(value.clone()),
            NodeKind::GetLet(path) => {
                let value = self.lookup_lexical(id, &path.name, env)?;
                Ok(self.select_owned(value, &path.select))
            }
            NodeKind::GetDyn(path) => {
                let value = env
                    .get_dynamic(&path.name)
                    .ok_or_else(|| undefined_dynamic(&path.name))?;
                Ok(self.select(value, &path.select))
            }
            NodeKind::GetEnvVar(path) => {
                let value = self
                    .vars
                    .var(&path.name)
                    .ok_or_else(|| undefined_env(&path.name))?;
                Ok(self.select_owned(Value::String(value), &path.select))
            }
            NodeKind::Let { bindings, body } => {
                if bindings.dynamic.is_empty() {
                    return self.eval_node(*body, env);
                }
                let mut frame = FxHashMap::default();
                for (name, node) in &bindings.dynamic {
                    frame.insert(name.clone(), self.eval_node(*node, env)?);
                }
                self.eval_node(*body, &env.with_dynamic(frame))
            }
            NodeKind::Else { body, fallback } => match self.eval_node(*body, env) {
                Ok(value) if !value.is_empty() => Ok(value),
                Ok(_) => self.eval_node(*fallback, env),
                Err(error) if error.is_recoverable() => {
                    debug!(%error, "::else recovered");
                    self.eval_node(*fallback, env)
                }
                Err(error) => Err(error),
            },
            NodeKind::Object(children) => {
                let mut map = Map::with_capacity(children.len());
                for (key, child) in children {
                    let key = self.interpolate_str(id, key, env)?;
                    map.insert(key, self.eval_node(*child, env)?);
                }
                Ok(Value::Map(map))
            }
            NodeKind::Sequence(items) => items
                .iter()
                .map(|&item| self.eval_node(item, env))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            NodeKind::Apply { function, args } => {
                let values = args
                    .iter()
                    .map(|&arg| self.eval_node(arg, env))
                    .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
                function
                    .call(&values)
                    .map_err(|source| function_error(function.name, source))
            }
            NodeKind::Merge(fragments) => {
                let values = fragments
                    .iter()
                    .map(|&fragment| self.eval_node(fragment, env))
                    .collect::<Result<Vec<_>, _>>()?;
                mold_value::merge(values).map_err(|e| no_merge(e.left, e.right))
            }
            NodeKind::Call { template, args } => {
                let mut frame = FxHashMap::default();
                for (name, node) in args {
                    frame.insert(name.clone(), self.eval_node(*node, env)?);
                }
                let scope = env.with_dynamic(frame);
                trace!(template = %template, depth = scope.depth(), "::call");
                self.lookup_lexical(id, template, &scope).map_err(|error| {
                    if error.notes.is_empty() {
                        error.with_note(format!("in ::call {template}"))
                    } else {
                        error
                    }
                })
            }
            NodeKind::Each {
                source,
                target,
                body,
            } => self.eval_each(id, source, target, *body, env),
            NodeKind::When {
                condition,
                then,
                otherwise,
            } => {
                if !self.eval_node(*condition, env)?.is_empty() {
                    self.eval_node(*then, env)
                } else if let Some(otherwise) = otherwise {
                    self.eval_node(*otherwise, env)
                } else {
                    Ok(Value::Null)
                }
            }
            NodeKind::Case(arms) => {
                for &(condition, action) in arms {
                    if !self.eval_node(condition, env)?.is_empty() {
                        return self.eval_node(action, env);
                    }
                }
                Err(no_case_match())
            }
            NodeKind::All(items) => {
                for &item in items {
                    if self.eval_node(item, env)?.is_empty() {
                        return Ok(Value::Bool(false));
                    }
                }
                Ok(Value::Bool(true))
            }
            NodeKind::Any(items) => {
                for &item in items {
                    let value = self.eval_node(item, env)?;
                    if !value.is_empty() {
                        return Ok(value);
                    }
                }
                Ok(Value::Bool(false))
            }
            NodeKind::Format(value) => self.interpolate(id, value, env),
        }
    }

    fn eval_each(
        &self,
        id: NodeId,
        source: &LoopVar,
        target: &LoopVar,
        body: NodeId,
        env: &Environment,
    ) -> EvalResult {
        let items = match source {
            LoopVar::Dynamic(name) => env
                .get_dynamic(name)
                .cloned()
                .ok_or_else(|| undefined_dynamic(name))?,
            // The loop's own target must not shadow its source.
            LoopVar::Lexical(name) => self.lookup_lexical(self.ast.parent(id), name, env)?,
        };
        let items = match items {
            Value::Sequence(items) => items,
            Value::Null => Vec::new(),
            other => return Err(type_mismatch("sequence", other.type_name())),
        };

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let scope = match target {
                LoopVar::Dynamic(name) => env.with_var(name, item),
                LoopVar::Lexical(_) => env.with_element(id, item),
            };
            results.push(self.eval_node(body, &scope)?);
        }
        Ok(Value::Sequence(results))
    }

    /// Resolve a lexical name from `from` outwards and evaluate what it is
    /// bound to against `env`.
    ///
    /// `::let` bindings are evaluated afresh on every use, in the
    /// environment of the use site. `::each` targets yield the element the
    /// innermost iteration of that loop is visiting.
    pub(crate) fn lookup_lexical(&self, from: NodeId, name: &str, env: &Environment) -> EvalResult {
        for scope in self.ast.scopes(from) {
            match self.ast.kind(scope) {
                NodeKind::Let { bindings, .. } => {
                    if let Some(&node) = bindings.lexical.get(name) {
                        return self.eval_node(node, env);
                    }
                }
                NodeKind::Each {
                    target: LoopVar::Lexical(target),
                    ..
                } if target == name => {
                    if let Some(element) = env.element(scope) {
                        return Ok(element.clone());
                    }
                }
                _ => {}
            }
        }
        Err(undefined_lexical(name))
    }

    fn select(&self, value: &Value, path: &[Segment]) -> Value {
        value
            .select(path)
            .unwrap_or(&self.select_fallback)
            .clone()
    }

    fn select_owned(&self, value: Value, path: &[Segment]) -> Value {
        if path.is_empty() {
            value
        } else {
            self.select(&value, path)
        }
    }
}
