//! Text in, rendered documents out.
//!
//! Every entry point returns one result per document. A failure to read
//! or decode the whole input is reported as a single failed document.

use std::path::Path;

use mold_ir::Ast;
use mold_parse::ParserOptions;
use mold_value::Value;
use rayon::prelude::*;
use tracing::debug;

use crate::{dedent, MoldError, RenderOptions};

/// Parse every document of `text` without evaluating it.
pub fn parse_str(text: &str, options: &ParserOptions) -> Vec<Result<Ast, MoldError>> {
    match mold_doc::load_all(&dedent(text)) {
        Ok(documents) => documents
            .into_iter()
            .map(|document| Ok(mold_parse::parse(document, options)?))
            .collect(),
        Err(error) => vec![Err(error.into())],
    }
}

/// Evaluate every document of `text`. The text is dedented first so
/// indented literals can be passed directly.
pub fn load_str(text: &str, options: &RenderOptions) -> Vec<Result<Value, MoldError>> {
    evaluate_text(&dedent(text), options, &options.parser)
}

/// Evaluate every document of the file at `path`. Relative `::include`s
/// start from the file's directory.
pub fn load_file(path: &Path, options: &RenderOptions) -> Vec<Result<Value, MoldError>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) => {
            return vec![Err(MoldError::Io {
                path: path.to_path_buf(),
                source,
            })]
        }
    };
    let parser = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => options.parser.clone().base_dir(dir),
        _ => options.parser.clone(),
    };
    evaluate_text(&text, options, &parser)
}

/// Render every document of `text` in the configured format.
pub fn render_str(text: &str, options: &RenderOptions) -> Vec<Result<String, MoldError>> {
    write_all(load_str(text, options), options)
}

/// Render every document of the file at `path` in the configured format.
pub fn render_file(path: &Path, options: &RenderOptions) -> Vec<Result<String, MoldError>> {
    write_all(load_file(path, options), options)
}

fn evaluate_text(
    text: &str,
    options: &RenderOptions,
    parser: &ParserOptions,
) -> Vec<Result<Value, MoldError>> {
    let documents = match mold_doc::load_all(text) {
        Ok(documents) => documents,
        Err(error) => return vec![Err(error.into())],
    };
    debug!(documents = documents.len(), "rendering");
    documents
        .into_par_iter()
        .map(|document| evaluate(document, options, parser))
        .collect()
}

fn evaluate(
    document: Value,
    options: &RenderOptions,
    parser: &ParserOptions,
) -> Result<Value, MoldError> {
    let ast = mold_parse::parse(document, parser)?;
    let value = options.interpreter(&ast).eval(&options.environment())?;
    Ok(value)
}

fn write_all(
    values: Vec<Result<Value, MoldError>>,
    options: &RenderOptions,
) -> Vec<Result<String, MoldError>> {
    values
        .into_iter()
        .map(|value| value.map(|value| mold_doc::render(&value, options.format)))
        .collect()
}
