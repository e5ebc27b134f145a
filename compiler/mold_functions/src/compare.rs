//! Equality, ordering and boolean connectives.

use std::cmp::Ordering;

use mold_value::Value;

use crate::args::{arity, exact};
use crate::errors::type_mismatch;
use crate::{FunctionError, FunctionResult};

pub(crate) fn eq(args: &[Value]) -> FunctionResult {
    let [a, b] = exact("eq", args)?;
    Ok(Value::Bool(a == b))
}

pub(crate) fn neq(args: &[Value]) -> FunctionResult {
    let [a, b] = exact("neq", args)?;
    Ok(Value::Bool(a != b))
}

/// Order two values of the same kind. A number compared with a string
/// holding a decimal literal compares numerically.
fn order(function: &'static str, a: &Value, b: &Value) -> Result<Ordering, FunctionError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x.cmp(y)),
        (Value::Number(x), Value::String(s)) => s
            .trim()
            .parse()
            .map(|y| x.cmp(&y))
            .map_err(|_| type_mismatch(function, "a number", b)),
        (Value::String(s), Value::Number(y)) => s
            .trim()
            .parse::<mold_value::Decimal>()
            .map(|x| x.cmp(y))
            .map_err(|_| type_mismatch(function, "a number", a)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Number(_) | Value::String(_) | Value::Date(_) | Value::Bool(_), _) => {
            Err(type_mismatch(function, a.type_name(), b))
        }
        _ => Err(type_mismatch(function, "an ordered value", a)),
    }
}

fn compare(
    function: &'static str,
    args: &[Value],
    accept: fn(Ordering) -> bool,
) -> FunctionResult {
    let [a, b] = exact(function, args)?;
    Ok(Value::Bool(accept(order(function, a, b)?)))
}

pub(crate) fn lt(args: &[Value]) -> FunctionResult {
    compare("lt", args, Ordering::is_lt)
}

pub(crate) fn gt(args: &[Value]) -> FunctionResult {
    compare("gt", args, Ordering::is_gt)
}

pub(crate) fn lte(args: &[Value]) -> FunctionResult {
    compare("lte", args, Ordering::is_le)
}

pub(crate) fn gte(args: &[Value]) -> FunctionResult {
    compare("gte", args, Ordering::is_ge)
}

/// The first empty argument, or the last argument.
pub(crate) fn and(args: &[Value]) -> FunctionResult {
    arity("and", args, 1, usize::MAX, "at least 1")?;
    let chosen = args
        .iter()
        .find(|v| v.is_empty())
        .or_else(|| args.last());
    Ok(chosen.cloned().unwrap_or_default())
}

/// The first non-empty argument, or the last argument.
pub(crate) fn or(args: &[Value]) -> FunctionResult {
    arity("or", args, 1, usize::MAX, "at least 1")?;
    let chosen = args
        .iter()
        .find(|v| !v.is_empty())
        .or_else(|| args.last());
    Ok(chosen.cloned().unwrap_or_default())
}

pub(crate) fn not(args: &[Value]) -> FunctionResult {
    let [value] = exact("not", args)?;
    Ok(Value::Bool(value.is_empty()))
}

/// Truthiness: non-empty and, for numbers, non-zero.
pub(crate) fn boolean(args: &[Value]) -> FunctionResult {
    let [value] = exact("boolean", args)?;
    let truthy = match value {
        Value::Number(n) => !n.is_zero(),
        other => !other.is_empty(),
    };
    Ok(Value::Bool(truthy))
}
