use moldc::{MapVars, RenderOptions, Value};

use crate::common::{check, check_with};

#[test]
fn test_iam_users() {
    let doc = "
        ::let:
          user:
            ::object:
              - ::titlecase:
                  ::get: $user.username
              - Type: AWS::IAM::User
                Properties:
                  UserName:
                    ::get: $user.username
                  Groups:
                    - Administrators
                  LoginProfile:
                    Password:
                      ::get: $user.password
                      ::else: default
                    PasswordResetRequired: Yes
          users:
            ::merge:
              ::each $ as $user:
                ::call user:

        Resources:
          ::call users:
            - username: jim
              password: one
            - username: jack
              password: two
            - username: johnny
    ";

    let expected = r#"
        {"Resources": {
          "Jim": {"Type": "AWS::IAM::User", "Properties": {
            "UserName": "jim", "Groups": ["Administrators"],
            "LoginProfile": {"Password": "one", "PasswordResetRequired": true}}},
          "Jack": {"Type": "AWS::IAM::User", "Properties": {
            "UserName": "jack", "Groups": ["Administrators"],
            "LoginProfile": {"Password": "two", "PasswordResetRequired": true}}},
          "Johnny": {"Type": "AWS::IAM::User", "Properties": {
            "UserName": "johnny", "Groups": ["Administrators"],
            "LoginProfile": {"Password": "default", "PasswordResetRequired": true}}}
        }}
    "#;

    check(expected, doc);
}

#[test]
fn test_case_conversions_and_division() {
    let doc = "
        ::let:
          name: XMLRpcParser_Main

        docs:
          - ::snakecase: <<name>>
          - ::uppercase:
              ::snakecase:
                ::get: name
          - ::uppercase:
              ::kebabcase:
                ::get: name
          - ::kebabcase:
              ::get: name
          - ::titlecase:
              ::get: name
          - ::camelcase:
              ::get: name
          - ::titlecase: XmlRPCProcessor_23
          - ::div:
              - 1
              - 7
              - null
              - 28
          - ::div:
              - 355
              - 113
          - ::div:
              - 355
              - 113
              - 20
          - ::div:
              - 2.7
              - 3.01
              - null
              - 17
    ";

    let expected = "
        docs:
          - xml_rpc_parser_main
          - XML_RPC_PARSER_MAIN
          - XML-RPC-PARSER-MAIN
          - xml-rpc-parser-main
          - XmlRpcParserMain
          - xmlRpcParserMain
          - XmlRpcProcessor23
          - 0.1428571428571428571428571428
          - 3.14159292035398230088495575221238938053097345132743362831858407079646017699115044247787610619469026548672566371681
          - 3.14159292035398230088
          - 0.89700996677740863787375415282392026578073
    ";

    check(expected, doc);
}

#[test]
fn test_scopes_and_calls() {
    let doc = "
        ::let:
          x: foo
          y: bar
          $x: qux
          $y: quuz

          template:
            - ::get: x
            - ::get: y
            - ::get: $x
            - ::get: $y
            - ::get: $z

        formatted: hello <<x>> woohoo <<y>> yeah <<$x>> and <<$y>>

        cool:
          some-<<x>>: <<y>>
          woohoo: <<x>>/<<y>>

        list:
          - ::get: x
          - ::get: y
          - ::get: $x
          - ::get: $y
          - ::get: MOLD_TEST_SHELL
          - ::get: MOLD_TEST_HOSTNAME
            ::else: unknown

        x:
          ::let:
            something:
              ::get: $m
          y:
            - ::get: something
              ::let:
                $m: 3
              ::else:
                ::get: $z
            - ::get: $q
              ::else: All okay.

        applied:
          ::let:
            x: keyfoo
            y: keybar
            $x: keyqux
            $y: keyquuz
            $z: zeeee

          ::call template:
            $y: callquuz

        applied2:
          ::call: template
    ";

    let expected = "
        formatted: hello foo woohoo bar yeah qux and quuz
        cool:
          some-foo: bar
          woohoo: foo/bar
        list: [foo, bar, qux, quuz, /bin/hash, unknown]
        x:
          y: [3, All okay.]
        applied: [foo, bar, keyqux, callquuz, zeeee]
        applied2: [foo, bar, qux, quuz, zzz]
    ";

    let options = RenderOptions::new()
        .bind("z", "zzz")
        .vars(MapVars::new().with("MOLD_TEST_SHELL", "/bin/hash"));
    check_with(expected, doc, &options);
}

#[test]
fn test_case_inside_a_loop() {
    let doc = "
        ::let:
          size:
            ::case:
              $n < 10: small
              $n < 100: medium
              _: large
        sizes:
          ::each $ns as $n:
            ::call size:
    ";

    let ns: Value = [3_i64, 42, 1000].into_iter().map(Value::from).collect();
    check_with(
        "sizes: [small, medium, large]",
        doc,
        &RenderOptions::new().bind("ns", ns),
    );
}
