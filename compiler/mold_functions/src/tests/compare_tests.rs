use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_equality_is_structural() {
    assert_eq!(call("eq", &[dec("1.0"), num(1)]).unwrap(), Value::Bool(true));
    assert_eq!(call("eq", &[s("1"), num(1)]).unwrap(), Value::Bool(false));
    assert_eq!(call("neq", &[num(1), num(2)]).unwrap(), Value::Bool(true));
}

#[test]
fn test_ordering() {
    assert_eq!(call("lt", &[num(1), dec("1.5")]).unwrap(), Value::Bool(true));
    assert_eq!(call("lte", &[num(2), num(2)]).unwrap(), Value::Bool(true));
    assert_eq!(call("gt", &[s("b"), s("a")]).unwrap(), Value::Bool(true));
    assert_eq!(call("gte", &[num(10), s("9")]).unwrap(), Value::Bool(true));
}

#[test]
fn test_ordering_type_mismatch() {
    let err = call("lt", &[num(1), seq(&[])]).unwrap_err();
    assert!(matches!(err, FunctionError::TypeMismatch { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_connectives_use_emptiness() {
    assert_eq!(call("and", &[num(0), s("x")]).unwrap(), s("x"));
    assert_eq!(call("and", &[s(""), s("x")]).unwrap(), s(""));
    assert_eq!(call("or", &[Value::Null, s("y")]).unwrap(), s("y"));
    assert_eq!(call("or", &[seq(&[]), Value::Bool(false)]).unwrap(), Value::Bool(false));
    assert_eq!(call("not", &[map(&[])]).unwrap(), Value::Bool(true));
    assert_eq!(call("boolean", &[num(0)]).unwrap(), Value::Bool(false));
    assert_eq!(call("boolean", &[s("0")]).unwrap(), Value::Bool(true));
}
