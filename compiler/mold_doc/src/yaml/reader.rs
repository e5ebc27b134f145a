//! YAML stream reader built on `saphyr-parser` events.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use mold_value::{Decimal, Map, Value};
use regex::Regex;
use rustc_hash::FxHashMap;
use saphyr_parser::{Event, Parser, ScalarStyle};

use crate::DocError;

/// A collection under construction.
enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Value>,
    },
    Mapping {
        anchor: usize,
        entries: Map,
        key: Option<String>,
    },
}

/// Assembles values from the event stream.
#[derive(Default)]
struct Builder {
    stack: Vec<Frame>,
    anchors: FxHashMap<usize, Value>,
    documents: Vec<Value>,
}

impl Builder {
    fn remember(&mut self, anchor: usize, value: &Value) {
        if anchor != 0 {
            self.anchors.insert(anchor, value.clone());
        }
    }

    /// Attach a finished value to the enclosing collection, or close the document.
    fn push(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.documents.push(value),
            Some(Frame::Sequence { items, .. }) => items.push(value),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => *key = Some(key_text(value)),
                Some(k) => {
                    entries.insert(k, value);
                }
            },
        }
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let (anchor, value) = match frame {
            Frame::Sequence { anchor, items } => (anchor, Value::Sequence(items)),
            Frame::Mapping {
                anchor, entries, ..
            } => (anchor, Value::Map(entries)),
        };
        self.remember(anchor, &value);
        self.push(value);
    }
}

/// Map keys are always strings; scalar keys keep their source spelling.
fn key_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_text().into_owned(),
    }
}

/// Read every document of a YAML stream.
pub fn load_yaml_all(text: &str) -> Result<Vec<Value>, DocError> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = Builder::default();

    while let Some(next) = parser.next_event() {
        let (event, _span) = next.map_err(|e| DocError::Yaml(e.to_string()))?;
        match event {
            Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart(..)
            | Event::DocumentEnd
            | Event::Nothing => {}
            Event::SequenceStart(anchor, _) => {
                builder.stack.push(Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(anchor, _) => {
                builder.stack.push(Frame::Mapping {
                    anchor,
                    entries: Map::new(),
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                builder.close();
            }
            Event::Scalar(text, style, anchor, _) => {
                let awaiting_key = matches!(
                    builder.stack.last(),
                    Some(Frame::Mapping { key: None, .. })
                );
                let plain_key =
                    awaiting_key && matches!(style, ScalarStyle::Plain) && !is_null(&text);
                let value = if plain_key {
                    // keys such as `yes` or `2020-01-01` stay as written
                    Value::String(text.into_owned())
                } else {
                    resolve_scalar(text, style)?
                };
                builder.remember(anchor, &value);
                builder.push(value);
            }
            Event::Alias(id) => {
                let value = builder
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or(DocError::UnknownAnchor)?;
                builder.push(value);
            }
        }
    }
    Ok(builder.documents)
}

// Literal patterns; compiling them cannot fail.
#[allow(clippy::expect_used)]
fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("literal pattern"))
}

pub(super) fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    pattern(&PATTERN, r"^[-+]?[0-9]+(\.[0-9]+)?([eE][-+][0-9]+)?$")
}

pub(super) fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    pattern(&PATTERN, r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$")
}

pub(super) fn is_null(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

pub(super) fn as_bool(text: &str) -> Option<bool> {
    match text {
        "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => Some(true),
        "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

/// Resolve a scalar the way a YAML 1.1 safe loader does, with exact decimals
/// in place of ints and floats. Quoted and block scalars are always strings.
fn resolve_scalar(text: Cow<'_, str>, style: ScalarStyle) -> Result<Value, DocError> {
    if !matches!(style, ScalarStyle::Plain) {
        return Ok(Value::String(text.into_owned()));
    }
    if is_null(&text) {
        return Ok(Value::Null);
    }
    if let Some(b) = as_bool(&text) {
        return Ok(Value::Bool(b));
    }
    if decimal_pattern().is_match(&text) {
        return Decimal::from_str(&text)
            .map(Value::Number)
            .map_err(|_| DocError::Number(text.into_owned()));
    }
    if date_pattern().is_match(&text) {
        if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            return Ok(Value::Date(date));
        }
    }
    Ok(Value::String(text.into_owned()))
}
