//! Mold Functions - the fixed library of named built-in functions.
//!
//! Every `::name` directive that is not a reserved keyword names one of the
//! functions in this crate. The parser resolves names against [`Registry`]
//! once, so an unknown name is reported before evaluation starts. At
//! evaluation time a function receives its arguments already evaluated, in
//! order, and returns one value or a [`FunctionError`].
//!
//! # Organization
//!
//! - `text`: case conversion, trimming, padding, splitting, hashing
//! - `numeric`: ranges, arithmetic, aggregation, conversion
//! - `compare`: equality, ordering, boolean connectives
//! - `collections`: length, selection, slicing, flattening, objects, merge

mod args;
mod collections;
mod compare;
mod errors;
mod numeric;
mod text;

use std::fmt;
use std::sync::OnceLock;

use mold_value::Value;
use rustc_hash::FxHashMap;

pub use errors::{FunctionError, FunctionResult};
pub use text::split_name;

/// A named built-in function.
pub struct Builtin {
    pub name: &'static str,
    call: fn(&[Value]) -> FunctionResult,
}

impl Builtin {
    const fn new(name: &'static str, call: fn(&[Value]) -> FunctionResult) -> Self {
        Builtin { name, call }
    }

    /// Apply the function to already evaluated arguments.
    #[inline]
    pub fn call(&self, args: &[Value]) -> FunctionResult {
        (self.call)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

static BUILTINS: &[Builtin] = &[
    // numeric
    Builtin::new("range_inclusive", numeric::range_inclusive),
    Builtin::new("range_exclusive", numeric::range_exclusive),
    Builtin::new("number", numeric::number),
    Builtin::new("sum", numeric::sum),
    Builtin::new("product", numeric::product),
    Builtin::new("add", numeric::add),
    Builtin::new("sub", numeric::sub),
    Builtin::new("mul", numeric::mul),
    Builtin::new("div", numeric::div),
    Builtin::new("neg", numeric::neg),
    // text
    Builtin::new("titlecase", text::titlecase),
    Builtin::new("kebabcase", text::kebabcase),
    Builtin::new("snakecase", text::snakecase),
    Builtin::new("camelcase", text::camelcase),
    Builtin::new("uppercase", text::uppercase),
    Builtin::new("lowercase", text::lowercase),
    Builtin::new("trim", text::trim),
    Builtin::new("trim_left", text::trim_left),
    Builtin::new("trim_right", text::trim_right),
    Builtin::new("pad_left", text::pad_left),
    Builtin::new("pad_right", text::pad_right),
    Builtin::new("explode", text::explode),
    Builtin::new("implode", text::implode),
    Builtin::new("str_replace", text::str_replace),
    Builtin::new("string", text::string),
    Builtin::new("sha256", text::sha256),
    // compare
    Builtin::new("eq", compare::eq),
    Builtin::new("neq", compare::neq),
    Builtin::new("lt", compare::lt),
    Builtin::new("gt", compare::gt),
    Builtin::new("lte", compare::lte),
    Builtin::new("gte", compare::gte),
    Builtin::new("and", compare::and),
    Builtin::new("or", compare::or),
    Builtin::new("not", compare::not),
    Builtin::new("boolean", compare::boolean),
    // collections
    Builtin::new("length", collections::length),
    Builtin::new("select", collections::select),
    Builtin::new("contains", collections::contains),
    Builtin::new("reverse", collections::reverse),
    Builtin::new("take", collections::take),
    Builtin::new("drop", collections::drop),
    Builtin::new("take_right", collections::take_right),
    Builtin::new("drop_right", collections::drop_right),
    Builtin::new("concat", collections::concat),
    Builtin::new("flatten", collections::flatten),
    Builtin::new("deepflatten", collections::deepflatten),
    Builtin::new("object", collections::object),
    Builtin::new("merge", collections::merge),
    Builtin::new("deepmerge", collections::deepmerge),
];

/// Name to function table.
pub struct Registry {
    functions: FxHashMap<&'static str, &'static Builtin>,
}

static BUILTIN_REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// The registry of every built-in function, built on first use.
    pub fn builtin() -> &'static Registry {
        BUILTIN_REGISTRY.get_or_init(|| Registry {
            functions: BUILTINS.iter().map(|b| (b.name, b)).collect(),
        })
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&'static Builtin> {
        self.functions.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Look up a built-in function by name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    Registry::builtin().lookup(name)
}

#[cfg(test)]
mod tests;
