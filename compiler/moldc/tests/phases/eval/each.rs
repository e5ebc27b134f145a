use crate::common::check;

const RESOURCES: &str = "
    resources:
      one_key: {name: one_value}
      one_foo_key: {name: one_foo_value}
      one_bar_key: {name: one_bar_value}
      two_key: {name: two_value}
      two_foo_key: {name: two_foo_value}
      two_bar_key: {name: two_bar_value}
";

#[test]
fn test_each_builds_an_object() {
    let doc = "
        ::let:
          qux:
            - a
            - b
            - c
        foo:
          ::merge:
            ::each qux as name:
              ::object:
                - <<name>>_key
                - <<name>>_value
    ";

    check("foo: {a_key: a_value, b_key: b_value, c_key: c_value}", doc);
}

#[test]
fn test_each_with_dynamic_loop_variable() {
    let doc = "
        resources:
          ::call resources_template:
            $rs:
              - one
              - two
        ::let:
          resource:
            ::object:
              - <<$res.name>>_key
              - name: <<$res.name>>_value
          resources_template:
            ::merge:
                ::each $rs as $r:
                  - ::call resource:
                      $res:
                        name: <<$r>>
                  - ::call resource:
                      $res:
                        name: <<$r>>_foo
                  - ::call resource:
                      $res:
                        name: <<$r>>_bar
    ";

    check(RESOURCES, doc);
}

#[test]
fn test_each_with_lexical_loop_variable() {
    let doc = "
        resources:
          ::call resources_template:
            $rs:
              - one
              - two
        ::let:
          resource:
            ::object:
              - <<$res.name>>_key
              - name: <<$res.name>>_value
          resources_template:
            ::merge:
                ::each $rs as r:
                  - ::call resource:
                      $res:
                        name: <<r>>
                  - ::call resource:
                      $res:
                        name: <<r>>_foo
                  - ::call resource:
                      $res:
                        name: <<r>>_bar
    ";

    check(RESOURCES, doc);
}
