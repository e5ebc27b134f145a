//! Mold Doc - text documents in and out of the value model.
//!
//! Reading: [`load_all`] accepts a YAML stream (several `---` separated
//! documents) and falls back to a stream of concatenated JSON documents
//! when the text is not valid YAML. Plain YAML scalars resolve the way
//! YAML 1.1 loaders do, except that numbers become exact decimals.
//!
//! Writing: [`to_json`] produces one compact line per document and
//! [`to_yaml`] produces block-style YAML that reads back to the same value.

mod errors;
mod json;
mod yaml;

use mold_value::Value;

pub use errors::DocError;
pub use json::load_json_all;
pub use yaml::{load_yaml_all, to_yaml};

/// Output syntax for rendered documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Read every document in `text`, as YAML or else as JSON.
pub fn load_all(text: &str) -> Result<Vec<Value>, DocError> {
    match load_yaml_all(text) {
        Ok(docs) => Ok(docs),
        Err(yaml_err) => {
            tracing::debug!(error = %yaml_err, "not YAML, retrying as a JSON stream");
            load_json_all(text).map_err(|_| yaml_err)
        }
    }
}

/// Compact single-line JSON.
pub fn to_json(value: &Value) -> String {
    value.to_json()
}

/// Render `value` in `format`.
pub fn render(value: &Value, format: Format) -> String {
    match format {
        Format::Yaml => to_yaml(value),
        Format::Json => to_json(value),
    }
}
