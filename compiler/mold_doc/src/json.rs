//! Streams of concatenated JSON documents.

use std::str::FromStr;

use mold_value::{Decimal, Value};

use crate::DocError;

/// Read every JSON document in `text`. Documents may follow each other with
/// or without whitespace between them (`{}{}` is two documents).
pub fn load_json_all(text: &str) -> Result<Vec<Value>, DocError> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<serde_json::Value>()
        .map(|doc| {
            doc.map_err(|e| DocError::Json(e.to_string()))
                .and_then(from_json)
        })
        .collect()
}

fn from_json(value: serde_json::Value) -> Result<Value, DocError> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            let text = n.to_string();
            let number = Decimal::from_str(&text).map_err(|_| DocError::Number(text))?;
            Value::Number(number)
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| Ok((k, from_json(v)?)))
                .collect::<Result<_, DocError>>()?,
        ),
    })
}
