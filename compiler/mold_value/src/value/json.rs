//! Compact JSON text for values.
//!
//! Numbers are written from their exact decimal form and dates as ISO
//! strings. String escaping is delegated to `serde_json`.

use std::fmt::Write;

use super::Value;

impl Value {
    /// Render as single-line JSON without insignificant whitespace.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }

    fn write_json(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Value::String(s) => write_json_string(s, out),
            Value::Date(d) => write_json_string(&d.format("%Y-%m-%d").to_string(), out),
            Value::Sequence(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_json(out);
                }
                out.push(']');
            }
            Value::Map(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_json_string(key, out);
                    out.push(':');
                    value.write_json(out);
                }
                out.push('}');
            }
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    let _ = write!(out, "{}", serde_json::Value::from(s));
}
