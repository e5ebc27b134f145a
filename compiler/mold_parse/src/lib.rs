//! Mold Parse - turns a generic document into a directive tree.
//!
//! Input is a [`Value`] as produced by `mold_doc`; output is an
//! [`Ast`](mold_ir::Ast). Mappings are inspected for `::`-prefixed keys and
//! dispatched to the directive they name (see [`Parser`] for the order).
//! Function names are checked against the registry here, so an unknown
//! `::name` fails before anything is evaluated.

mod errors;
mod expr;
mod include;
mod names;
mod parser;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use mold_functions::Registry;
use mold_ir::Ast;
use mold_value::Value;

pub use errors::ParseError;
pub use include::{FsResolver, IncludeResolver, MemoryResolver};
pub use names::{check_name, is_env_name, NAME_PATTERN};
pub use parser::Parser;

/// Parser configuration.
#[derive(Clone)]
pub struct ParserOptions {
    pub(crate) registry: &'static Registry,
    pub(crate) resolver: Arc<dyn IncludeResolver>,
    pub(crate) base_dir: Option<PathBuf>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            registry: Registry::builtin(),
            resolver: Arc::new(FsResolver),
            base_dir: None,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `::include` reads documents from.
    #[must_use]
    pub fn resolver(mut self, resolver: impl IncludeResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Directory relative `::include` paths start from.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

/// Parse one document.
pub fn parse(document: Value, options: &ParserOptions) -> Result<Ast, ParseError> {
    Parser::new(options).parse_document(document)
}
