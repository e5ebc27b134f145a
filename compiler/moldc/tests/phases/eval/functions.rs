use moldc::{RenderOptions, Value};

use crate::common::{check, check_with};

#[test]
fn test_flatten() {
    let doc = "
        ::let:
            xs:
                - - 1
                - - 2
                - - 3
        xs:
            ::flatten:
                ::get: xs
    ";

    check("xs: [1, 2, 3]", doc);
}

#[test]
fn test_select_from_list() {
    let doc = "
        ::let:
            xs:
                - - 1
                - - 2
                - - 3
        xs:
            ::select:
                - ::get: xs
                - 1
    ";

    check("xs: [2]", doc);
}

#[test]
fn test_select_from_object() {
    let doc = "
        ::let:
            xs:
                foo: 1
                bar: 2
        xs:
            ::select:
                - ::get: xs
                - bar
    ";

    check("xs: 2", doc);
}

#[test]
fn test_select_range_from_list() {
    let doc = "
        ::let:
            xs:
                - 1
                - 2
                - 3
        xs:
            ::select:
                - ::get: xs
                - 0
                - 2
    ";

    check("xs: [1, 2]", doc);
}

#[test]
fn test_select_range_from_string() {
    let doc = "
        ::let:
            xs: \"abc\"
        xs:
            ::select:
                - ::get: xs
                - 0
                - 2
    ";

    check("xs: ab", doc);
}

#[test]
fn test_nested_applications() {
    let doc = "
        total:
            ::sum:
                ::range_inclusive: [1, 4]
        squares:
            ::each $xs as x:
                ::mul: [<<x>>, <<x>>]
    ";

    let xs: Value = [1_i64, 2, 3].into_iter().map(Value::from).collect();
    let options = RenderOptions::new().bind("xs", xs);
    check_with("{total: 10, squares: [1, 4, 9]}", doc, &options);
}
