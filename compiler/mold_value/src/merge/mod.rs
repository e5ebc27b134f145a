//! Structural merge of fragments.
//!
//! When several directives share one mapping, each produces a fragment and
//! the fragments are combined here. Sequences concatenate. Maps union their
//! keys, and a key present in more than one map is combined by [`combine`].

use crate::{Map, Value};

/// No structural merge exists for the given fragments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no merge possible between {left} and {right}")]
pub struct MergeError {
    pub left: &'static str,
    pub right: &'static str,
}

/// Merge fragments left to right.
///
/// All sequences: concatenated in order. All maps: keys unioned in first
/// occurrence order. Any other mix fails. An empty input merges to an
/// empty sequence.
pub fn merge<I>(fragments: I) -> Result<Value, MergeError>
where
    I: IntoIterator<Item = Value>,
{
    let mut fragments = fragments.into_iter();
    let Some(first) = fragments.next() else {
        return Ok(Value::Sequence(Vec::new()));
    };
    match first {
        Value::Sequence(mut items) => {
            for fragment in fragments {
                match fragment {
                    Value::Sequence(more) => items.extend(more),
                    other => return Err(mismatch("sequence", &other)),
                }
            }
            Ok(Value::Sequence(items))
        }
        Value::Map(mut map) => {
            for fragment in fragments {
                match fragment {
                    Value::Map(more) => merge_into(&mut map, more),
                    other => return Err(mismatch("map", &other)),
                }
            }
            Ok(Value::Map(map))
        }
        other => Err(MergeError {
            left: other.type_name(),
            right: fragments.next().map_or("nothing", |v| v.type_name()),
        }),
    }
}

fn mismatch(left: &'static str, right: &Value) -> MergeError {
    MergeError {
        left,
        right: right.type_name(),
    }
}

fn merge_into(target: &mut Map, source: Map) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => combine(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Combine a key's existing value with a later one.
///
/// Two maps merge shallowly, later keys winning. A sequence grows by
/// extension (sequence) or by a single push (anything else). Any other
/// pair collects into a sequence, so `{a: 1}` and `{a: 2}` give
/// `{a: [1, 2]}`.
fn combine(existing: &mut Value, value: Value) {
    match (existing, value) {
        (Value::Map(map), Value::Map(more)) => map.extend(more),
        (Value::Sequence(items), Value::Sequence(more)) => items.extend(more),
        (Value::Sequence(items), value) => items.push(value),
        (existing, value) => {
            let first = std::mem::take(existing);
            *existing = match value {
                Value::Sequence(more) => std::iter::once(first).chain(more).collect(),
                value => Value::Sequence(vec![first, value]),
            };
        }
    }
}
