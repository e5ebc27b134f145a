//! Tests for the built-in function library.

use mold_value::{Decimal, Map, Value};
use pretty_assertions::assert_eq;

use super::*;

mod compare_tests;

fn call(name: &str, args: &[Value]) -> FunctionResult {
    lookup(name)
        .unwrap_or_else(|| panic!("no builtin named {name}"))
        .call(args)
}

fn num(n: i64) -> Value {
    Value::from(n)
}

fn dec(text: &str) -> Value {
    Value::Number(text.parse::<Decimal>().unwrap())
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn seq(items: &[Value]) -> Value {
    Value::Sequence(items.to_vec())
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<Map>(),
    )
}

#[test]
fn test_registry_lookup() {
    let registry = Registry::builtin();
    assert_eq!(registry.lookup("snakecase").map(|b| b.name), Some("snakecase"));
    assert!(registry.lookup("snake_case").is_none());
    assert!(registry.lookup("").is_none());
}

#[test]
fn test_registry_names_are_unique() {
    let names = Registry::builtin().names();
    assert_eq!(names.len(), BUILTINS.len());
    assert!(names.contains(&"div"));
    assert!(names.contains(&"deepmerge"));
}

#[test]
fn test_recoverable_classification() {
    let arity = call("add", &[num(1)]).unwrap_err();
    assert!(!arity.is_recoverable());

    let mismatch = call("add", &[num(1), seq(&[])]).unwrap_err();
    assert!(mismatch.is_recoverable());

    let zero = call("div", &[num(1), num(0)]).unwrap_err();
    assert!(zero.is_recoverable());
}
