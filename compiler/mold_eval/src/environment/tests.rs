use super::*;
use pretty_assertions::assert_eq;

fn num(n: i64) -> Value {
    Value::from(n)
}

#[test]
fn test_empty_environment() {
    let env = Environment::new();
    assert_eq!(env.get_dynamic("x"), None);
    assert_eq!(env.element(NodeId::new(3)), None);
    assert_eq!(env.depth(), 0);
}

#[test]
fn test_inner_frames_shadow_outer() {
    let outer = Environment::from_bindings([("x", num(1)), ("y", num(2))]);
    let inner = outer.with_var("x", num(10));

    assert_eq!(inner.get_dynamic("x"), Some(&num(10)));
    assert_eq!(inner.get_dynamic("y"), Some(&num(2)));
    assert_eq!(outer.get_dynamic("x"), Some(&num(1)));
}

#[test]
fn test_empty_frames_are_not_pushed() {
    let env = Environment::from_bindings([("x", num(1))]);
    let same = env.with_dynamic(FxHashMap::default());
    assert_eq!(same.depth(), 1);
}

#[test]
fn test_elements_are_keyed_by_node() {
    let first = NodeId::new(4);
    let second = NodeId::new(9);
    let env = Environment::new()
        .with_element(first, num(1))
        .with_var("x", num(0))
        .with_element(second, num(2));

    assert_eq!(env.element(first), Some(&num(1)));
    assert_eq!(env.element(second), Some(&num(2)));
    assert_eq!(env.get_dynamic("x"), Some(&num(0)));

    let nested = env.with_element(first, num(7));
    assert_eq!(nested.element(first), Some(&num(7)));
    assert_eq!(env.element(first), Some(&num(1)));
}

#[test]
fn test_environment_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Environment>();
}
