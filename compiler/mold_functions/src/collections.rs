//! Sequence, string and map functions.

use mold_value::{Map, Value};

use crate::args::{arity, count, exact, integer};
use crate::errors::{merge_conflict, missing_index, type_mismatch};
use crate::{FunctionError, FunctionResult};

pub(crate) fn length(args: &[Value]) -> FunctionResult {
    let [items] = exact("length", args)?;
    let len = match items {
        Value::Sequence(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(type_mismatch("length", "a sequence, map or string", other)),
    };
    Ok(Value::from(len_to_i64(len)))
}

fn len_to_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Resolve a possibly negative index against `len`.
fn position(function: &'static str, index: &Value, len: usize) -> Result<usize, FunctionError> {
    let ix = integer(function, index)?;
    let resolved = if ix < 0 { len_to_i64(len) + ix } else { ix };
    usize::try_from(resolved)
        .ok()
        .filter(|&ix| ix < len)
        .ok_or_else(|| missing_index(function, index))
}

/// Clamp a slice bound into `0..=len`, counting negatives from the end.
fn bound(function: &'static str, index: &Value, len: usize) -> Result<usize, FunctionError> {
    let ix = integer(function, index)?;
    let len_i = len_to_i64(len);
    let resolved = if ix < 0 { (len_i + ix).max(0) } else { ix.min(len_i) };
    Ok(usize::try_from(resolved).unwrap_or(0))
}

/// `select(items, ix)` picks one element or key; `select(items, start, end)`
/// takes the half-open slice of a sequence or string.
pub(crate) fn select(args: &[Value]) -> FunctionResult {
    arity("select", args, 2, 3, "2 or 3")?;
    let items = &args[0];
    let index = &args[1];
    if let Some(end) = args.get(2) {
        return match items {
            Value::Sequence(seq) => {
                let start = bound("select", index, seq.len())?;
                let end = bound("select", end, seq.len())?.max(start);
                Ok(Value::Sequence(seq[start..end].to_vec()))
            }
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                let start = bound("select", index, chars.len())?;
                let end = bound("select", end, chars.len())?.max(start);
                Ok(Value::String(chars[start..end].iter().collect()))
            }
            other => Err(type_mismatch("select", "a sequence or string", other)),
        };
    }
    match items {
        Value::Sequence(seq) => Ok(seq[position("select", index, seq.len())?].clone()),
        Value::String(s) => {
            let ix = position("select", index, s.chars().count())?;
            Ok(s.chars().nth(ix).map(String::from).map_or(Value::Null, Value::String))
        }
        Value::Map(map) => map
            .get(&*index.to_text())
            .cloned()
            .ok_or_else(|| missing_index("select", index)),
        other => Err(type_mismatch("select", "a sequence, map or string", other)),
    }
}

/// `contains(needle, haystack)`.
pub(crate) fn contains(args: &[Value]) -> FunctionResult {
    let [needle, haystack] = exact("contains", args)?;
    let found = match haystack {
        Value::Sequence(items) => items.contains(needle),
        Value::Map(map) => map.contains_key(&*needle.to_text()),
        Value::String(s) => s.contains(&*needle.to_text()),
        other => return Err(type_mismatch("contains", "a sequence, map or string", other)),
    };
    Ok(Value::Bool(found))
}

pub(crate) fn reverse(args: &[Value]) -> FunctionResult {
    let [items] = exact("reverse", args)?;
    match items {
        Value::Sequence(items) => Ok(items.iter().rev().cloned().collect()),
        other => Ok(Value::String(other.to_text().chars().rev().collect())),
    }
}

#[derive(Clone, Copy)]
enum Cut {
    Take,
    Drop,
    TakeRight,
    DropRight,
}

impl Cut {
    fn range(self, n: usize, len: usize) -> std::ops::Range<usize> {
        let n = n.min(len);
        match self {
            Cut::Take => 0..n,
            Cut::Drop => n..len,
            Cut::TakeRight => len - n..len,
            Cut::DropRight => 0..len - n,
        }
    }
}

/// `take(n, items)` and friends. Non-sequences are cut as text.
fn cut(function: &'static str, args: &[Value], how: Cut) -> FunctionResult {
    let [n, items] = exact(function, args)?;
    let n = count(function, n)?;
    match items {
        Value::Sequence(items) => Ok(Value::Sequence(items[how.range(n, items.len())].to_vec())),
        other => {
            let chars: Vec<char> = other.to_text().chars().collect();
            Ok(Value::String(chars[how.range(n, chars.len())].iter().collect()))
        }
    }
}

pub(crate) fn take(args: &[Value]) -> FunctionResult {
    cut("take", args, Cut::Take)
}

pub(crate) fn drop(args: &[Value]) -> FunctionResult {
    cut("drop", args, Cut::Drop)
}

pub(crate) fn take_right(args: &[Value]) -> FunctionResult {
    cut("take_right", args, Cut::TakeRight)
}

pub(crate) fn drop_right(args: &[Value]) -> FunctionResult {
    cut("drop_right", args, Cut::DropRight)
}

/// Concatenate sequences, or join the text of anything else.
pub(crate) fn concat(args: &[Value]) -> FunctionResult {
    if args.iter().all(|v| matches!(v, Value::Sequence(_))) {
        return Ok(args
            .iter()
            .filter_map(Value::as_sequence)
            .flatten()
            .cloned()
            .collect());
    }
    Ok(Value::String(args.iter().map(Value::to_text).collect()))
}

fn flatten_into(items: &[Value], deep: bool, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Sequence(inner) if deep => flatten_into(inner, true, out),
            Value::Sequence(inner) => out.extend(inner.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
}

fn flatten_with(function: &'static str, args: &[Value], deep: bool) -> FunctionResult {
    let [items] = exact(function, args)?;
    let Value::Sequence(items) = items else {
        return Err(type_mismatch(function, "a sequence", items));
    };
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, deep, &mut out);
    Ok(Value::Sequence(out))
}

pub(crate) fn flatten(args: &[Value]) -> FunctionResult {
    flatten_with("flatten", args, false)
}

pub(crate) fn deepflatten(args: &[Value]) -> FunctionResult {
    flatten_with("deepflatten", args, true)
}

/// `object(key, value)`: a one-entry map.
pub(crate) fn object(args: &[Value]) -> FunctionResult {
    let [key, value] = exact("object", args)?;
    let mut map = Map::with_capacity(1);
    map.insert(key.to_text().into_owned(), value.clone());
    Ok(Value::Map(map))
}

/// Fold maps into `target`. Nulls are skipped and sequences are merged
/// item by item. With `deep`, nested maps merge recursively instead of
/// being replaced.
fn merge_maps(
    function: &'static str,
    target: &mut Map,
    items: &[Value],
    deep: bool,
) -> Result<(), FunctionError> {
    for item in items {
        match item {
            Value::Null => {}
            Value::Sequence(inner) => merge_maps(function, target, inner, deep)?,
            Value::Map(map) => {
                for (key, value) in map {
                    match (target.get_mut(key), value) {
                        (Some(Value::Map(existing)), Value::Map(_)) if deep => {
                            merge_maps(function, existing, std::slice::from_ref(value), true)?;
                        }
                        _ => {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            other => return Err(merge_conflict(function, other)),
        }
    }
    Ok(())
}

pub(crate) fn merge(args: &[Value]) -> FunctionResult {
    let mut map = Map::new();
    merge_maps("merge", &mut map, args, false)?;
    Ok(Value::Map(map))
}

pub(crate) fn deepmerge(args: &[Value]) -> FunctionResult {
    let mut map = Map::new();
    merge_maps("deepmerge", &mut map, args, true)?;
    Ok(Value::Map(map))
}
