//! Rendering configuration.

use std::fmt;
use std::sync::Arc;

use mold_doc::Format;
use mold_eval::{Environment, Interpreter, InterpreterBuilder, OsVars, VarProvider};
use mold_ir::Ast;
use mold_parse::ParserOptions;
use mold_value::{Map, Value};

/// How documents are parsed, evaluated and written.
///
/// `bindings` become the dynamic variables every document starts with, so
/// `name=value` on the command line is read as `<<$name>>`.
#[derive(Clone)]
pub struct RenderOptions {
    pub(crate) format: Format,
    pub(crate) bindings: Map,
    pub(crate) parser: ParserOptions,
    vars: Arc<dyn VarProvider>,
    select_fallback: Value,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            format: Format::default(),
            bindings: Map::new(),
            parser: ParserOptions::default(),
            vars: Arc::new(OsVars),
            select_fallback: Value::Null,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Bind a dynamic variable for every document.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn bindings<I, K>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.bindings
            .extend(bindings.into_iter().map(|(name, value)| (name.into(), value)));
        self
    }

    #[must_use]
    pub fn parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    /// Where `::ref: UPPER_CASE` reads from. Defaults to the process
    /// environment.
    #[must_use]
    pub fn vars(mut self, vars: impl VarProvider + 'static) -> Self {
        self.vars = Arc::new(vars);
        self
    }

    #[must_use]
    pub fn select_fallback(mut self, fallback: Value) -> Self {
        self.select_fallback = fallback;
        self
    }

    pub fn output_format(&self) -> Format {
        self.format
    }

    pub(crate) fn interpreter<'a>(&self, ast: &'a Ast) -> Interpreter<'a> {
        InterpreterBuilder::new(ast)
            .shared_vars(Arc::clone(&self.vars))
            .select_fallback(self.select_fallback.clone())
            .build()
    }

    pub(crate) fn environment(&self) -> Environment {
        Environment::from_bindings(self.bindings.clone())
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("format", &self.format)
            .field("bindings", &self.bindings)
            .field("parser", &self.parser)
            .field("select_fallback", &self.select_fallback)
            .finish_non_exhaustive()
    }
}
