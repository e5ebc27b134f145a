//! Block-style YAML output.
//!
//! Maps nest by two spaces, sequences under a map key are not indented
//! (`key:\n- a`), and the first entry of a collection inside a sequence item
//! shares the `- ` line. Multi-line strings become literal block scalars.
//! Strings that a loader would read back as something else are quoted.

use mold_value::{Map, Value};

use super::reader::{as_bool, date_pattern, decimal_pattern, is_null};

/// Render one document as block YAML, ending in a newline.
pub fn to_yaml(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Map(map) if !map.is_empty() => write_map(&mut out, map, 0, false),
        Value::Sequence(items) if !items.is_empty() => write_sequence(&mut out, items, 0, false),
        scalar => {
            write_scalar(&mut out, scalar, 0);
            out.push('\n');
        }
    }
    out
}

fn indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}

fn write_map(out: &mut String, map: &Map, level: usize, inline_first: bool) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !inline_first {
            indent(out, level);
        }
        write_string(out, key, level, true);
        out.push(':');
        match value {
            Value::Map(inner) if !inner.is_empty() => {
                out.push('\n');
                write_map(out, inner, level + 2, false);
            }
            Value::Sequence(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, level, false);
            }
            scalar => {
                out.push(' ');
                write_scalar(out, scalar, level);
                out.push('\n');
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], level: usize, inline_first: bool) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !inline_first {
            indent(out, level);
        }
        out.push_str("- ");
        match item {
            Value::Map(inner) if !inner.is_empty() => write_map(out, inner, level + 2, true),
            Value::Sequence(inner) if !inner.is_empty() => {
                write_sequence(out, inner, level + 2, true);
            }
            scalar => {
                write_scalar(out, scalar, level);
                out.push('\n');
            }
        }
    }
}

/// Write a scalar (or an empty collection) without the trailing newline.
/// Block scalar lines are indented two spaces past `level`.
fn write_scalar(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Date(d) => out.push_str(&d.format("%Y-%m-%d").to_string()),
        Value::String(s) => write_string(out, s, level, false),
        Value::Sequence(_) => out.push_str("[]"),
        Value::Map(_) => out.push_str("{}"),
    }
}

fn write_string(out: &mut String, s: &str, level: usize, is_key: bool) {
    if !is_key && fits_block(s) {
        write_block(out, s, level + 2);
    } else if needs_quotes(s) {
        out.push_str(&serde_json::Value::from(s).to_string());
    } else {
        out.push_str(s);
    }
}

fn fits_block(s: &str) -> bool {
    s.contains('\n')
        && !s.trim().is_empty()
        && !s.starts_with([' ', '\t', '\n'])
        && !s.chars().any(|c| c.is_control() && c != '\n')
}

/// Literal block scalar. `|-` strips, `|` keeps one and `|+` keeps every
/// trailing newline.
fn write_block(out: &mut String, s: &str, width: usize) {
    let body = s.trim_end_matches('\n');
    let trailing = s.len() - body.len();
    out.push('|');
    match trailing {
        0 => out.push('-'),
        1 => {}
        _ => out.push('+'),
    }
    for line in body.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            indent(out, width);
            out.push_str(line);
        }
    }
    for _ in 1..trailing {
        out.push('\n');
    }
}

/// Would the plain spelling of `s` be misread or fail to parse?
fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    if matches!(
        first,
        '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>'
            | '\'' | '"' | '%' | '@' | '`' | ' ' | '.' | '+'
    ) {
        return true;
    }
    if s.ends_with([' ', ':']) || s.contains(": ") || s.contains(" #") {
        return true;
    }
    if s.chars().any(char::is_control) {
        return true;
    }
    looks_like_scalar(s)
}

fn looks_like_scalar(s: &str) -> bool {
    is_null(s)
        || as_bool(s).is_some()
        || decimal_pattern().is_match(s)
        || date_pattern().is_match(s)
        || s.parse::<f64>().is_ok()
        || matches!(s, "=" | "<<")
        || (s.starts_with("0x") || s.starts_with("0o"))
}
