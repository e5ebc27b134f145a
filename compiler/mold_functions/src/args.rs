//! Argument unpacking shared by the function modules.

use mold_value::{Decimal, Value};

use crate::errors::{conversion, type_mismatch};
use crate::FunctionError;

/// Check that `args` has between `min` and `max` entries.
pub(crate) fn arity(
    function: &'static str,
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<(), FunctionError> {
    if args.len() < min || args.len() > max {
        return Err(FunctionError::Arity {
            function,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Fixed-arity unpacking into an array of references.
pub(crate) fn exact<'a, const N: usize>(
    function: &'static str,
    args: &'a [Value],
) -> Result<[&'a Value; N], FunctionError> {
    let expected = match N {
        1 => "1",
        2 => "2",
        3 => "3",
        _ => "a fixed number of",
    };
    arity(function, args, N, N, expected)?;
    Ok(std::array::from_fn(|i| &args[i]))
}

/// Numeric view of a value: numbers as is, booleans as 0/1 and strings
/// holding a decimal literal.
pub(crate) fn number(function: &'static str, value: &Value) -> Result<Decimal, FunctionError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::Bool(b) => Ok(Decimal::from(i64::from(*b))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| conversion(function, value, "number")),
        _ => Err(type_mismatch(function, "a number", value)),
    }
}

/// Integral view of a value, rounding down.
pub(crate) fn integer(function: &'static str, value: &Value) -> Result<i64, FunctionError> {
    number(function, value)?
        .floor_i64()
        .ok_or_else(|| conversion(function, value, "integer"))
}

/// A count: a non-negative integer.
pub(crate) fn count(function: &'static str, value: &Value) -> Result<usize, FunctionError> {
    usize::try_from(integer(function, value)?.max(0))
        .map_err(|_| conversion(function, value, "count"))
}
