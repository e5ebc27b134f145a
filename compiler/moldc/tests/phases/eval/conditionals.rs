use crate::common::check;

#[test]
fn test_conditional_with_let() {
    let doc = "
        ::let:
            a: 1
        ::when:
            ::get: a == 1
        ::then:
            foo: one
        ::else:
            bar: two
    ";

    check("foo: one", doc);
}

#[test]
fn test_condition_with_its_own_let() {
    let doc = "
        ::when:
            ::let:
                a: 1
            ::get: a == 1
        ::then:
            foo: one
        ::else:
            bar: two
    ";

    check("foo: one", doc);
}

#[test]
fn test_else_branch() {
    let doc = "
        ::let:
            a: 2
        ::when: a == 1
        ::then:
            foo: one
        ::else:
            bar: two
    ";

    check("bar: two", doc);
}

