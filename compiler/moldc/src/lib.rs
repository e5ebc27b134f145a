//! Mold - structured-data templates.
//!
//! A mold document is ordinary YAML or JSON whose `::`-prefixed keys are
//! directives: bindings, references, template calls, loops, conditionals
//! and built-in functions. Rendering a document resolves every directive
//! and yields plain data again.
//!
//! # Pipeline
//!
//! 1. `mold_doc` reads the text into one [`Value`] per document.
//! 2. `mold_parse` turns each document into a directive tree.
//! 3. `mold_eval` evaluates the tree against the external bindings.
//! 4. `mold_doc` writes the result as YAML or JSON.
//!
//! Documents of one input are independent: they render in parallel and
//! each succeeds or fails on its own.
//!
//! ```text
//! ::let:
//!   greet: hello <<$name>>
//! message:
//!   ::call greet:
//!     $name: world
//! ```

pub mod cli;
mod errors;
mod options;
mod render;

pub use errors::MoldError;
pub use mold_doc::Format;
pub use mold_eval::{MapVars, OsVars, VarProvider};
pub use mold_parse::{FsResolver, IncludeResolver, MemoryResolver, ParserOptions};
pub use mold_value::Value;
pub use options::RenderOptions;
pub use render::{load_file, load_str, parse_str, render_file, render_str};

/// Remove the leading whitespace shared by every non-blank line.
///
/// Lines holding only whitespace are emptied and do not count towards the
/// common prefix.
pub fn dedent(text: &str) -> String {
    let prefix = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(|common, indent| {
            let shared = common
                .char_indices()
                .zip(indent.chars())
                .find(|((_, a), b)| a != b)
                .map_or(common.len().min(indent.len()), |((at, _), _)| at);
            &common[..shared]
        })
        .unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line.strip_prefix(prefix).unwrap_or(line));
        }
    }
    out
}
