//! Directive dispatch.
//!
//! A mapping is examined in a fixed order:
//!
//! 1. `::include` documents are merged in.
//! 2. `::let` bindings are split off; the rest of the mapping is the body.
//! 3. Reserved key sets: `{::all}`, `{::any}`, `{::case}`,
//!    `{::when, ::then}` and `{::when, ::then, ::else}`. Any other use of
//!    `::all`, `::any`, `::when`, `::then` or `::case` is an error.
//! 4. `::else` wraps the rest of the mapping as its body.
//! 5. Every remaining key becomes a fragment: references, `::format`,
//!    `::verbatim`, `::call`, `::each`, function applications, and one
//!    object for the plain keys. `::ignore` is dropped. A single fragment
//!    stands alone; several are combined by structural merge.

use mold_ir::{ApplyArgs, Ast, LetBindings, LoopVar, NodeId, NodeKind, Path};
use mold_stack::ensure_sufficient_stack;
use mold_value::{Map, Segment, Value};

use crate::expr::{parse_expression, reference_kind};
use crate::names::check_name;
use crate::{ParseError, ParserOptions};

/// Nested `::include`s deeper than this are reported as a cycle.
const MAX_INCLUDE_DEPTH: usize = 32;

const RESERVED: [&str; 5] = ["::all", "::any", "::when", "::then", "::case"];

/// Builds one document's tree.
pub struct Parser<'o> {
    options: &'o ParserOptions,
    ast: Ast,
}

impl<'o> Parser<'o> {
    pub fn new(options: &'o ParserOptions) -> Self {
        Parser {
            options,
            ast: Ast::new(),
        }
    }

    /// Parse a whole document. A top-level scalar is taken literally;
    /// strings at the top are not interpolated.
    pub fn parse_document(mut self, document: Value) -> Result<Ast, ParseError> {
        let top = match document {
            Value::Map(_) | Value::Sequence(_) => self.parse_node(document, NodeId::ROOT)?,
            scalar => self.ast.alloc(NodeId::ROOT, NodeKind::Constant(scalar)),
        };
        self.ast.set_top(top);
        Ok(self.ast)
    }

    fn parse_node(&mut self, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_node_inner(value, parent))
    }

    fn parse_node_inner(&mut self, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        match value {
            Value::Map(map) => self.parse_map(map, parent),
            Value::Sequence(items) => self.parse_sequence(items, parent),
            Value::String(_) => Ok(self.ast.alloc(parent, NodeKind::Format(value))),
            scalar => Ok(self.ast.alloc(parent, NodeKind::Constant(scalar))),
        }
    }

    fn parse_sequence(&mut self, items: Vec<Value>, parent: NodeId) -> Result<NodeId, ParseError> {
        let id = self.ast.reserve(parent);
        let elements = items
            .into_iter()
            .map(|item| self.parse_node(item, id))
            .collect::<Result<Vec<_>, _>>()?;
        self.ast.set_kind(id, NodeKind::Sequence(elements));
        Ok(id)
    }

    fn parse_map(&mut self, mut map: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        self.resolve_includes(&mut map)?;

        if let Some(bindings) = map.shift_remove("::let") {
            return self.parse_let(bindings, map, parent);
        }

        if map.len() == 1 {
            if let Some(items) = map.shift_remove("::all") {
                return self.parse_all_any(items, parent, "::all");
            }
            if let Some(items) = map.shift_remove("::any") {
                return self.parse_all_any(items, parent, "::any");
            }
            if let Some(cases) = map.shift_remove("::case") {
                return self.parse_case(cases, parent);
            }
        }
        let is_conditional = map.contains_key("::when")
            && map.contains_key("::then")
            && (map.len() == 2 || (map.len() == 3 && map.contains_key("::else")));
        if is_conditional {
            return self.parse_when(map, parent);
        }
        if let Some(keyword) = RESERVED.into_iter().find(|k| map.contains_key(*k)) {
            return Err(ParseError::MisplacedKeyword { keyword });
        }

        if let Some(fallback) = map.shift_remove("::else") {
            return self.parse_else(fallback, map, parent);
        }

        self.parse_fragments(map, parent)
    }

    /// Merge each `::include`d document into `map`, repeating while the
    /// merged documents bring in further includes.
    fn resolve_includes(&self, map: &mut Map) -> Result<(), ParseError> {
        let mut depth = 0;
        while let Some(includes) = map.shift_remove("::include") {
            depth += 1;
            if depth > MAX_INCLUDE_DEPTH {
                return Err(ParseError::invalid("::include", "includes nest too deeply"));
            }
            let paths = match includes {
                Value::String(path) => vec![path],
                Value::Sequence(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(path) => Ok(path),
                        _ => Err(ParseError::invalid("::include", "paths must be strings")),
                    })
                    .collect::<Result<_, _>>()?,
                _ => {
                    return Err(ParseError::invalid(
                        "::include",
                        "expected a path or a list of paths",
                    ))
                }
            };
            let mut documents = vec![Value::Map(std::mem::take(map))];
            for path in &paths {
                documents.push(self.load_include(path)?);
            }
            match mold_value::merge(documents) {
                Ok(Value::Map(merged)) => *map = merged,
                Ok(_) => return Err(ParseError::invalid("::include", "included documents must be maps")),
                Err(e) => return Err(ParseError::include(&paths.join(", "), e)),
            }
        }
        Ok(())
    }

    /// Read an included document. Includes it brings in are rebased onto
    /// its directory so they resolve next to it.
    fn load_include(&self, path: &str) -> Result<Value, ParseError> {
        let text = self
            .options
            .resolver
            .read(self.options.base_dir.as_deref(), path)
            .map_err(|e| ParseError::include(path, e))?;
        tracing::debug!(path, "including document");
        let first = mold_doc::load_all(&text)
            .map_err(|e| ParseError::include(path, e))?
            .into_iter()
            .next();
        match first {
            Some(mut doc @ Value::Map(_)) => {
                if let Some(dir) = std::path::Path::new(path).parent() {
                    if !dir.as_os_str().is_empty() {
                        rebase_includes(&mut doc, dir);
                    }
                }
                Ok(doc)
            }
            Some(_) => Err(ParseError::include(path, "the document is not a map")),
            None => Err(ParseError::include(path, "the file holds no document")),
        }
    }

    fn parse_let(&mut self, bindings: Value, body: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        let id = self.ast.reserve(parent);
        let bindings = match bindings {
            Value::Map(bindings) => bindings,
            Value::Null => Map::new(),
            _ => return Err(ParseError::invalid("::let", "expected a mapping of names")),
        };
        let mut scope = LetBindings::default();
        for (key, value) in bindings {
            match key.strip_prefix('$').map(str::to_string) {
                Some(name) => {
                    check_name(&name)?;
                    let node = self.parse_node(value, id)?;
                    scope.dynamic.push((name, node));
                }
                None => {
                    check_name(&key)?;
                    let node = self.parse_node(value, id)?;
                    scope.lexical.insert(key, node);
                }
            }
        }
        let body = self.parse_map(body, id)?;
        self.ast.set_kind(
            id,
            NodeKind::Let {
                bindings: scope,
                body,
            },
        );
        Ok(id)
    }

    fn parse_else(&mut self, fallback: Value, body: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        let id = self.ast.reserve(parent);
        let body = self.parse_map(body, id)?;
        // Body and fallback share the Else node as parent, so both resolve
        // names from the scope the mapping sits in.
        let fallback = self.parse_node(fallback, id)?;
        self.ast.set_kind(id, NodeKind::Else { body, fallback });
        Ok(id)
    }

    fn parse_when(&mut self, mut map: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        let id = self.ast.reserve(parent);
        let condition = match map.shift_remove("::when") {
            Some(Value::String(expression)) => self.expression(&expression, id)?,
            Some(value) => self.parse_node(value, id)?,
            None => return Err(ParseError::invalid("::when", "missing condition")),
        };
        let then = map.shift_remove("::then").unwrap_or_default();
        let then = self.parse_node(then, id)?;
        let otherwise = match map.shift_remove("::else") {
            Some(value) => Some(self.parse_node(value, id)?),
            None => None,
        };
        self.ast.set_kind(
            id,
            NodeKind::When {
                condition,
                then,
                otherwise,
            },
        );
        Ok(id)
    }

    fn parse_case(&mut self, cases: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        let Value::Map(cases) = cases else {
            return Err(ParseError::invalid("::case", "expected a mapping of conditions"));
        };
        let id = self.ast.reserve(parent);
        let mut arms = Vec::with_capacity(cases.len());
        for (condition, action) in cases {
            let condition = if condition == "_" || condition == "..." {
                self.ast.alloc(id, NodeKind::Constant(Value::Bool(true)))
            } else {
                self.expression(&condition, id)?
            };
            let action = self.parse_node(action, id)?;
            arms.push((condition, action));
        }
        self.ast.set_kind(id, NodeKind::Case(arms));
        Ok(id)
    }

    fn parse_all_any(
        &mut self,
        items: Value,
        parent: NodeId,
        directive: &'static str,
    ) -> Result<NodeId, ParseError> {
        let Value::Sequence(items) = items else {
            return Err(ParseError::invalid(directive, "expected a list"));
        };
        let id = self.ast.reserve(parent);
        let nodes = items
            .into_iter()
            .map(|item| self.parse_node(item, id))
            .collect::<Result<Vec<_>, _>>()?;
        let kind = if directive == "::all" {
            NodeKind::All(nodes)
        } else {
            NodeKind::Any(nodes)
        };
        self.ast.set_kind(id, kind);
        Ok(id)
    }

    fn parse_fragments(&mut self, map: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        let mut fragments = Vec::new();
        let mut plain = Map::new();
        for (key, value) in map {
            if key.len() <= 2 || !key.starts_with("::") {
                plain.insert(key, value);
                continue;
            }
            let fragment = match key.as_str() {
                "::ignore" => continue,
                "::verbatim" => self.ast.alloc(parent, NodeKind::Constant(value)),
                "::format" => self.ast.alloc(parent, NodeKind::Format(value)),
                "::ref" | "::get" => self.parse_reference(value, parent)?,
                k if k.starts_with("::call") => self.parse_call(k, value, parent)?,
                k if k.starts_with("::each") => self.parse_each(k, value, parent)?,
                k => self.parse_application(k, value, parent)?,
            };
            fragments.push(fragment);
        }

        if fragments.is_empty() {
            return self.parse_object(plain, parent);
        }
        if !plain.is_empty() {
            fragments.push(self.parse_object(plain, parent)?);
        }
        if fragments.len() == 1 {
            return Ok(fragments[0]);
        }
        let id = self.ast.reserve(parent);
        for &fragment in &fragments {
            self.ast.set_parent(fragment, id);
        }
        self.ast.set_kind(id, NodeKind::Merge(fragments));
        Ok(id)
    }

    fn parse_object(&mut self, map: Map, parent: NodeId) -> Result<NodeId, ParseError> {
        let id = self.ast.reserve(parent);
        let children = map
            .into_iter()
            .map(|(key, value)| Ok((key, self.parse_node(value, id)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;
        self.ast.set_kind(id, NodeKind::Object(children));
        Ok(id)
    }

    /// `::ref: expression` or `::ref: [name, key, 0, ...]`.
    fn parse_reference(&mut self, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        match value {
            Value::String(expression) => self.expression(&expression, parent),
            Value::Sequence(parts) => {
                let mut parts = parts.into_iter();
                let Some(Value::String(name)) = parts.next() else {
                    return Err(ParseError::invalid("::ref", "a path starts with a name"));
                };
                let select = parts
                    .map(|part| match part {
                        Value::String(key) => Ok(Segment::Key(key)),
                        Value::Number(n) => n
                            .floor_usize()
                            .filter(|_| n.is_integer())
                            .map(Segment::Index)
                            .ok_or_else(|| ParseError::invalid("::ref", "indexes are non-negative integers")),
                        _ => Err(ParseError::invalid("::ref", "path segments are keys or indexes")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let path = Path::new(name).with_select(select);
                Ok(self.ast.alloc(parent, reference_kind(path)))
            }
            _ => Err(ParseError::invalid("::ref", "expected a path")),
        }
    }

    /// `::call: name`, or `::call name:` with a mapping of arguments, a list
    /// of positional arguments, or nothing.
    fn parse_call(&mut self, key: &str, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        let (template, value) = match (key, value) {
            ("::call", Value::String(name)) => (name, Value::Null),
            (key, value) => {
                let name = match key.split(' ').collect::<Vec<_>>()[..] {
                    [_, name] => name.to_string(),
                    _ => String::new(),
                };
                (name, value)
            }
        };
        check_name(&template)?;

        let id = self.ast.reserve(parent);
        let args = match value {
            Value::Sequence(items) => vec![(String::new(), self.parse_sequence(items, id)?)],
            Value::Map(named) => named
                .into_iter()
                .map(|(name, arg)| {
                    let name = name.strip_prefix('$').map_or_else(|| name.clone(), str::to_string);
                    Ok((name, self.parse_node(arg, id)?))
                })
                .collect::<Result<Vec<_>, ParseError>>()?,
            _ => Vec::new(),
        };
        self.ast.set_kind(id, NodeKind::Call { template, args });
        Ok(id)
    }

    /// `::each <source> as <target>: body`.
    fn parse_each(&mut self, key: &str, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        let malformed = || ParseError::MalformedEach {
            key: key.to_string(),
        };
        let [_, source, "as", target] = key.split(' ').collect::<Vec<_>>()[..] else {
            return Err(malformed());
        };
        let source = LoopVar::parse(source);
        let target = LoopVar::parse(target);
        if !source.name().is_empty() {
            check_name(source.name())?;
        }
        check_name(target.name())?;

        let id = self.ast.reserve(parent);
        let body = self.parse_node(value, id)?;
        self.ast.set_kind(
            id,
            NodeKind::Each {
                source,
                target,
                body,
            },
        );
        Ok(id)
    }

    /// `::name: args` for a built-in function. One trailing underscore is
    /// dropped so reserved words stay reachable (`::and_`).
    fn parse_application(&mut self, key: &str, value: Value, parent: NodeId) -> Result<NodeId, ParseError> {
        let name = &key[2..];
        let name = name.strip_suffix('_').unwrap_or(name);
        let function = self
            .options
            .registry
            .lookup(name)
            .ok_or_else(|| ParseError::UnknownFunction {
                name: name.to_string(),
            })?;

        let id = self.ast.reserve(parent);
        let args = match value {
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.parse_node(item, id))
                .collect::<Result<ApplyArgs, _>>()?,
            single => std::iter::once(self.parse_node(single, id)?).collect(),
        };
        self.ast.set_kind(id, NodeKind::Apply { function, args });
        Ok(id)
    }

    fn expression(&mut self, source: &str, parent: NodeId) -> Result<NodeId, ParseError> {
        parse_expression(source, parent, &mut self.ast, self.options.registry)
    }
}

/// Prefix relative `::include` paths anywhere in `value` with `dir`.
/// `::verbatim` content is left alone.
fn rebase_includes(value: &mut Value, dir: &std::path::Path) {
    ensure_sufficient_stack(|| match value {
        Value::Map(map) => {
            for (key, item) in map.iter_mut() {
                match key.as_str() {
                    "::verbatim" => {}
                    "::include" => match item {
                        Value::String(path) => rebase_path(path, dir),
                        Value::Sequence(paths) => {
                            for path in paths {
                                if let Value::String(path) = path {
                                    rebase_path(path, dir);
                                }
                            }
                        }
                        _ => {}
                    },
                    _ => rebase_includes(item, dir),
                }
            }
        }
        Value::Sequence(items) => {
            for item in items {
                rebase_includes(item, dir);
            }
        }
        _ => {}
    });
}

fn rebase_path(path: &mut String, dir: &std::path::Path) {
    if std::path::Path::new(path.as_str()).is_relative() {
        *path = dir.join(path.as_str()).to_string_lossy().into_owned();
    }
}

#[cfg(test)]
mod tests;
