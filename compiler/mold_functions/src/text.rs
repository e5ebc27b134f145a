//! String functions.
//!
//! Arguments are taken in their text form (see `Value::to_text`), so
//! `::uppercase: 12` is `"12"`.

use std::borrow::Cow;

use mold_value::Value;
use sha2::{Digest, Sha256};

use crate::args::{arity, count, exact};
use crate::errors::conversion;
use crate::FunctionResult;

/// Split an identifier into lowercase words.
///
/// Words are separated by `-`, `_` and case transitions. A run of capitals
/// followed by a lowercase letter ends before the last capital, so
/// `XMLRpcParser_Main` splits into `xml`, `rpc`, `parser`, `main`.
pub fn split_name(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    for part in name.split(['-', '_']) {
        let mut current = String::new();
        let mut last_was_upper = false;
        for ch in part.chars() {
            if ch.is_uppercase() && !last_was_upper {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current).to_lowercase());
                }
            } else if ch.is_lowercase() && last_was_upper {
                if let Some(last) = current.pop() {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current).to_lowercase());
                    }
                    current.push(last);
                }
            }
            current.push(ch);
            last_was_upper = ch.is_uppercase();
        }
        if !current.is_empty() {
            words.push(current.to_lowercase());
        }
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn one_text<'a>(function: &'static str, args: &'a [Value]) -> Result<Cow<'a, str>, crate::FunctionError> {
    let [value] = exact(function, args)?;
    Ok(value.to_text())
}

pub(crate) fn titlecase(args: &[Value]) -> FunctionResult {
    let name = one_text("titlecase", args)?;
    Ok(Value::String(split_name(&name).iter().map(|w| capitalize(w)).collect()))
}

pub(crate) fn camelcase(args: &[Value]) -> FunctionResult {
    let name = one_text("camelcase", args)?;
    let mut out = String::new();
    for (i, word) in split_name(&name).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    Ok(Value::String(out))
}

pub(crate) fn kebabcase(args: &[Value]) -> FunctionResult {
    let name = one_text("kebabcase", args)?;
    Ok(Value::String(split_name(&name).join("-")))
}

pub(crate) fn snakecase(args: &[Value]) -> FunctionResult {
    let name = one_text("snakecase", args)?;
    Ok(Value::String(split_name(&name).join("_")))
}

pub(crate) fn uppercase(args: &[Value]) -> FunctionResult {
    Ok(Value::String(one_text("uppercase", args)?.to_uppercase()))
}

pub(crate) fn lowercase(args: &[Value]) -> FunctionResult {
    Ok(Value::String(one_text("lowercase", args)?.to_lowercase()))
}

#[derive(Clone, Copy)]
enum Side {
    Both,
    Left,
    Right,
}

/// `trim(value, chars = whitespace)`.
fn trim_side(function: &'static str, args: &[Value], side: Side) -> FunctionResult {
    arity(function, args, 1, 2, "1 or 2")?;
    let text = args[0].to_text();
    let trimmed = match args.get(1) {
        None | Some(Value::Null) => match side {
            Side::Both => text.trim(),
            Side::Left => text.trim_start(),
            Side::Right => text.trim_end(),
        },
        Some(chars) => {
            let set: Vec<char> = chars.to_text().chars().collect();
            let in_set = |c: char| set.contains(&c);
            match side {
                Side::Both => text.trim_matches(in_set),
                Side::Left => text.trim_start_matches(in_set),
                Side::Right => text.trim_end_matches(in_set),
            }
        }
    };
    Ok(Value::string(trimmed))
}

pub(crate) fn trim(args: &[Value]) -> FunctionResult {
    trim_side("trim", args, Side::Both)
}

pub(crate) fn trim_left(args: &[Value]) -> FunctionResult {
    trim_side("trim_left", args, Side::Left)
}

pub(crate) fn trim_right(args: &[Value]) -> FunctionResult {
    trim_side("trim_right", args, Side::Right)
}

/// `pad_left(value, fill, total)`: prefix `fill` until `value` is `total`
/// characters long.
fn pad(function: &'static str, args: &[Value], side: Side) -> FunctionResult {
    let [value, fill, total] = exact(function, args)?;
    let value = value.to_text();
    let fill = fill.to_text();
    let total = count(function, total)?;
    let missing = total.saturating_sub(value.chars().count());
    let padding = fill.repeat(missing);
    Ok(Value::String(match side {
        Side::Left => format!("{padding}{value}"),
        Side::Right | Side::Both => format!("{value}{padding}"),
    }))
}

pub(crate) fn pad_left(args: &[Value]) -> FunctionResult {
    pad("pad_left", args, Side::Left)
}

pub(crate) fn pad_right(args: &[Value]) -> FunctionResult {
    pad("pad_right", args, Side::Right)
}

/// `explode(value, separator)`.
pub(crate) fn explode(args: &[Value]) -> FunctionResult {
    let [value, separator] = exact("explode", args)?;
    let separator_text = separator.to_text();
    if separator_text.is_empty() {
        return Err(conversion("explode", separator, "separator"));
    }
    Ok(value
        .to_text()
        .split(&*separator_text)
        .map(Value::from)
        .collect())
}

/// `implode(separator, items)`.
pub(crate) fn implode(args: &[Value]) -> FunctionResult {
    let [separator, items] = exact("implode", args)?;
    let separator = separator.to_text();
    let joined = match items {
        Value::Sequence(items) => items
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(&*separator),
        Value::Null => String::new(),
        other => other.to_text().into_owned(),
    };
    Ok(Value::String(joined))
}

/// `str_replace(search, replace, subject)`.
pub(crate) fn str_replace(args: &[Value]) -> FunctionResult {
    let [search, replace, subject] = exact("str_replace", args)?;
    let search = search.to_text();
    let subject = subject.to_text();
    if search.is_empty() {
        return Ok(Value::string(subject));
    }
    Ok(Value::String(subject.replace(&*search, &replace.to_text())))
}

pub(crate) fn string(args: &[Value]) -> FunctionResult {
    Ok(Value::string(one_text("string", args)?))
}

/// Lowercase hex SHA-256 of the text form.
pub(crate) fn sha256(args: &[Value]) -> FunctionResult {
    let text = one_text("sha256", args)?;
    let digest = Sha256::digest(text.as_bytes());
    Ok(Value::String(format!("{digest:x}")))
}
