//! Ranges and exact arithmetic.

use mold_value::{Decimal, Value, DEFAULT_MIN_SCALE};

use crate::args::{arity, exact, integer, number as to_number};
use crate::errors::{arithmetic, conversion};
use crate::FunctionResult;

fn range(function: &'static str, args: &[Value], inclusive: bool) -> FunctionResult {
    let [from, to] = exact(function, args)?;
    let from = integer(function, from)?;
    let to = integer(function, to)?;
    let items: Vec<Value> = if inclusive {
        (from..=to).map(Value::from).collect()
    } else {
        (from..to).map(Value::from).collect()
    };
    Ok(Value::Sequence(items))
}

pub(crate) fn range_inclusive(args: &[Value]) -> FunctionResult {
    range("range_inclusive", args, true)
}

pub(crate) fn range_exclusive(args: &[Value]) -> FunctionResult {
    range("range_exclusive", args, false)
}

pub(crate) fn number(args: &[Value]) -> FunctionResult {
    let [value] = exact("number", args)?;
    to_number("number", value).map(Value::Number)
}

/// Operands of an aggregate: the arguments, or the items of a single
/// sequence argument.
fn operands(args: &[Value]) -> &[Value] {
    match args {
        [Value::Sequence(items)] => items,
        _ => args,
    }
}

pub(crate) fn sum(args: &[Value]) -> FunctionResult {
    operands(args)
        .iter()
        .try_fold(Decimal::zero(), |acc, v| Ok(&acc + &to_number("sum", v)?))
        .map(Value::Number)
}

pub(crate) fn product(args: &[Value]) -> FunctionResult {
    operands(args)
        .iter()
        .try_fold(Decimal::one(), |acc, v| Ok(&acc * &to_number("product", v)?))
        .map(Value::Number)
}

fn binary(
    function: &'static str,
    args: &[Value],
    op: fn(&Decimal, &Decimal) -> Decimal,
) -> FunctionResult {
    let [a, b] = exact(function, args)?;
    Ok(Value::Number(op(
        &to_number(function, a)?,
        &to_number(function, b)?,
    )))
}

pub(crate) fn add(args: &[Value]) -> FunctionResult {
    binary("add", args, |a, b| a + b)
}

pub(crate) fn sub(args: &[Value]) -> FunctionResult {
    binary("sub", args, |a, b| a - b)
}

pub(crate) fn mul(args: &[Value]) -> FunctionResult {
    binary("mul", args, |a, b| a * b)
}

pub(crate) fn neg(args: &[Value]) -> FunctionResult {
    let [a] = exact("neg", args)?;
    Ok(Value::Number(-&to_number("neg", a)?))
}

/// `div(a, b, maxscale = null, minscale = 17)`.
pub(crate) fn div(args: &[Value]) -> FunctionResult {
    arity("div", args, 2, 4, "2 to 4")?;
    let a = to_number("div", &args[0])?;
    let b = to_number("div", &args[1])?;
    let max_scale = match args.get(2) {
        None | Some(Value::Null) => None,
        Some(v) => Some(scale_bound(v)?),
    };
    let min_scale = match args.get(3) {
        None | Some(Value::Null) => DEFAULT_MIN_SCALE,
        Some(v) => scale_bound(v)?,
    };
    a.div(&b, max_scale, min_scale)
        .map(Value::Number)
        .map_err(|e| arithmetic("div", e))
}

fn scale_bound(value: &Value) -> Result<u32, crate::FunctionError> {
    u32::try_from(integer("div", value)?).map_err(|_| conversion("div", value, "scale"))
}
