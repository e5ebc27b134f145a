use mold_ir::{Ast, LoopVar, NodeId, NodeKind, Path};
use mold_value::{Segment, Value};
use pretty_assertions::assert_eq;

use crate::{parse, MemoryResolver, ParseError, ParserOptions};

fn parse_with(text: &str, options: &ParserOptions) -> Result<Ast, ParseError> {
    let mut docs = mold_doc::load_all(text).unwrap();
    assert_eq!(docs.len(), 1);
    parse(docs.remove(0), options)
}

fn parse_yaml(text: &str) -> Result<Ast, ParseError> {
    parse_with(text, &ParserOptions::default())
}

fn top(text: &str) -> (Ast, NodeId) {
    let ast = parse_yaml(text).unwrap();
    let top = ast.top();
    (ast, top)
}

fn keys(ast: &Ast, id: NodeId) -> Vec<String> {
    match ast.kind(id) {
        NodeKind::Object(children) => children.iter().map(|(k, _)| k.clone()).collect(),
        other => panic!("expected an object, got {other:?}"),
    }
}

#[test]
fn test_top_level_scalar_is_constant() {
    let (ast, id) = top("hello <<name>>");
    assert_eq!(
        ast.kind(id),
        &NodeKind::Constant(Value::string("hello <<name>>"))
    );
}

#[test]
fn test_plain_mapping_is_object_of_formats() {
    let (ast, id) = top("a: text\nb: 1\n");
    let NodeKind::Object(children) = ast.kind(id) else {
        panic!("expected an object");
    };
    assert_eq!(
        ast.kind(children[0].1),
        &NodeKind::Format(Value::string("text"))
    );
    assert_eq!(ast.kind(children[1].1), &NodeKind::Constant(Value::from(1_i64)));
    assert_eq!(ast.parent(children[0].1), id);
}

#[test]
fn test_let_splits_lexical_and_dynamic_bindings() {
    let (ast, id) = top("::let:\n  greet: hi\n  $count: 2\nout: x\n");
    let NodeKind::Let { bindings, body } = ast.kind(id) else {
        panic!("expected a let");
    };
    assert!(bindings.lexical.contains_key("greet"));
    assert_eq!(bindings.dynamic.len(), 1);
    assert_eq!(bindings.dynamic[0].0, "count");
    assert_eq!(ast.parent(bindings.lexical["greet"]), id);
    assert_eq!(keys(&ast, *body), vec!["out"]);
}

#[test]
fn test_let_names_are_checked() {
    assert!(matches!(
        parse_yaml("::let:\n  BadName: 1\n"),
        Err(ParseError::MalformedName { ref name, .. }) if name == "BadName"
    ));
    assert!(matches!(
        parse_yaml("::let:\n  $x_: 1\n"),
        Err(ParseError::MalformedName { ref name, .. }) if name == "x_"
    ));
}

#[test]
fn test_conditional() {
    let (ast, id) = top("::when: $n <= 1\n::then: small\n::else: big\n");
    let NodeKind::When {
        condition,
        then,
        otherwise,
    } = ast.kind(id)
    else {
        panic!("expected a conditional");
    };
    assert!(matches!(ast.kind(*condition), NodeKind::Apply { function, .. } if function.name == "lte"));
    assert_eq!(ast.kind(*then), &NodeKind::Format(Value::string("small")));
    assert!(otherwise.is_some());
}

#[test]
fn test_let_may_share_a_mapping_with_a_conditional() {
    let (ast, id) = top("::let:\n  x: 1\n::when: x\n::then: yes\n");
    let NodeKind::Let { body, .. } = ast.kind(id) else {
        panic!("expected a let");
    };
    assert!(matches!(ast.kind(*body), NodeKind::When { otherwise: None, .. }));
}

#[test]
fn test_reserved_keywords_in_other_combinations() {
    for (text, keyword) in [
        ("::when: x\nfoo: 1\n", "::when"),
        ("::then: x\n", "::then"),
        ("::all: []\n::any: []\n", "::all"),
        ("::case: {}\nfoo: 1\n", "::case"),
    ] {
        assert_eq!(
            parse_yaml(text).unwrap_err(),
            ParseError::MisplacedKeyword { keyword },
            "{text:?}"
        );
    }
}

#[test]
fn test_else_wraps_remaining_keys() {
    let (ast, id) = top("::ref: $missing\n::else: default\n");
    let NodeKind::Else { body, fallback } = ast.kind(id) else {
        panic!("expected an else");
    };
    assert_eq!(ast.kind(*body), &NodeKind::GetDyn(Path::new("missing")));
    assert_eq!(ast.kind(*fallback), &NodeKind::Format(Value::string("default")));
    assert_eq!(ast.parent(*body), id);
    assert_eq!(ast.parent(*fallback), id);
}

#[test]
fn test_references() {
    let (ast, id) = top("::ref: $user.name\n");
    assert_eq!(
        ast.kind(id),
        &NodeKind::GetDyn(Path::new("user").with_select(vec![Segment::Key("name".into())]))
    );

    let (ast, id) = top("::get: HOME\n");
    assert_eq!(ast.kind(id), &NodeKind::GetEnvVar(Path::new("HOME")));

    let (ast, id) = top("::ref: [items, 0, key]\n");
    assert_eq!(
        ast.kind(id),
        &NodeKind::GetLet(
            Path::new("items").with_select(vec![Segment::Index(0), Segment::Key("key".into())])
        )
    );
}

#[test]
fn test_each() {
    let (ast, id) = top("::each $ as $user:\n  name: <<$user>>\n");
    let NodeKind::Each {
        source,
        target,
        body,
    } = ast.kind(id)
    else {
        panic!("expected an each");
    };
    assert_eq!(source, &LoopVar::Dynamic(String::new()));
    assert_eq!(target, &LoopVar::Dynamic("user".into()));
    assert_eq!(ast.parent(*body), id);

    let (ast, id) = top("::each items as item: <<item>>\n");
    assert!(matches!(
        ast.kind(id),
        NodeKind::Each { source: LoopVar::Lexical(s), target: LoopVar::Lexical(t), .. }
            if s == "items" && t == "item"
    ));
}

#[test]
fn test_malformed_each() {
    for key in ["::each items", "::each items in x", "::each a as b c"] {
        let text = format!("\"{key}\": 1\n");
        assert_eq!(
            parse_yaml(&text).unwrap_err(),
            ParseError::MalformedEach {
                key: key.to_string()
            }
        );
    }
    assert!(matches!(
        parse_yaml("::each items as $: 1\n"),
        Err(ParseError::MalformedName { .. })
    ));
}

#[test]
fn test_call_forms() {
    let (ast, id) = top("::call: greet\n");
    assert_eq!(
        ast.kind(id),
        &NodeKind::Call {
            template: "greet".into(),
            args: vec![]
        }
    );

    let (ast, id) = top("::call greet:\n  $name: World\n  times: 2\n");
    let NodeKind::Call { template, args } = ast.kind(id) else {
        panic!("expected a call");
    };
    assert_eq!(template, "greet");
    let names: Vec<&str> = args.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["name", "times"]);

    let (ast, id) = top("::call sum-all: [1, 2]\n");
    let NodeKind::Call { args, .. } = ast.kind(id) else {
        panic!("expected a call");
    };
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].0, "");
    assert!(matches!(ast.kind(args[0].1), NodeKind::Sequence(items) if items.len() == 2));

    let (ast, id) = top("::call greet:\n");
    assert!(matches!(ast.kind(id), NodeKind::Call { args, .. } if args.is_empty()));
}

#[test]
fn test_call_names_are_checked() {
    assert!(matches!(
        parse_yaml("::call Greet: {}\n"),
        Err(ParseError::MalformedName { .. })
    ));
    assert!(matches!(
        parse_yaml("::call a b: {}\n"),
        Err(ParseError::MalformedName { ref name, .. }) if name.is_empty()
    ));
}

#[test]
fn test_function_applications() {
    let (ast, id) = top("::uppercase: hello\n");
    assert!(matches!(
        ast.kind(id),
        NodeKind::Apply { function, args } if function.name == "uppercase" && args.len() == 1
    ));

    let (ast, id) = top("::and_: [true, false]\n");
    assert!(matches!(
        ast.kind(id),
        NodeKind::Apply { function, args } if function.name == "and" && args.len() == 2
    ));

    assert_eq!(
        parse_yaml("::shout: hello\n").unwrap_err(),
        ParseError::UnknownFunction {
            name: "shout".into()
        }
    );
}

#[test]
fn test_fragments_merge() {
    let (ast, id) = top("::each $ as $x:\n  k: v\nplain: 1\n");
    let NodeKind::Merge(fragments) = ast.kind(id) else {
        panic!("expected a merge, got {:?}", ast.kind(id));
    };
    assert_eq!(fragments.len(), 2);
    assert!(matches!(ast.kind(fragments[0]), NodeKind::Each { .. }));
    assert_eq!(keys(&ast, fragments[1]), vec!["plain"]);
    assert!(fragments.iter().all(|&f| ast.parent(f) == id));
}

#[test]
fn test_single_fragment_stands_alone() {
    let (ast, id) = top("::ignore: whatever\n::length: [1, 2]\n");
    assert!(matches!(ast.kind(id), NodeKind::Apply { .. }));
}

#[test]
fn test_verbatim_is_not_parsed() {
    let (ast, id) = top("::verbatim:\n  ::ref: x\n");
    let NodeKind::Constant(Value::Map(map)) = ast.kind(id) else {
        panic!("expected a constant map");
    };
    assert_eq!(map["::ref"], Value::string("x"));
}

#[test]
fn test_format_directive() {
    let (ast, id) = top("::format:\n  <<key>>: <<value>>\n");
    assert!(matches!(ast.kind(id), NodeKind::Format(Value::Map(_))));
}

#[test]
fn test_case() {
    let (ast, id) = top("::case:\n  x == 1: one\n  _: other\n");
    let NodeKind::Case(arms) = ast.kind(id) else {
        panic!("expected a case");
    };
    assert_eq!(arms.len(), 2);
    assert!(matches!(ast.kind(arms[0].0), NodeKind::Apply { function, .. } if function.name == "eq"));
    assert_eq!(ast.kind(arms[1].0), &NodeKind::Constant(Value::Bool(true)));
}

#[test]
fn test_all_and_any_need_lists() {
    let (ast, id) = top("::all: [1, 2]\n");
    assert!(matches!(ast.kind(id), NodeKind::All(items) if items.len() == 2));
    assert!(matches!(
        parse_yaml("::any: 1\n"),
        Err(ParseError::InvalidDirective { directive: "::any", .. })
    ));
}

#[test]
fn test_includes_merge_into_the_mapping() {
    let resolver = MemoryResolver::new()
        .with_file("base.yaml", "a: 1\nlist: [x]\n")
        .with_file("extra.yaml", "b: 2\n");
    let options = ParserOptions::default().resolver(resolver);
    let ast = parse_with(
        "::include: [base.yaml, extra.yaml]\nlist: [y]\n",
        &options,
    )
    .unwrap();
    assert_eq!(keys(&ast, ast.top()), vec!["list", "a", "b"]);
}

#[test]
fn test_nested_includes_resolve_next_to_their_document() {
    let resolver = MemoryResolver::new()
        .with_file("lib/a.yaml", "::include: b.yaml\na: 1\nraw:\n  ::verbatim:\n    ::include: c.yaml\n")
        .with_file("lib/b.yaml", "b: 2\n")
        .with_file("b.yaml", "wrong: 0\n");
    let options = ParserOptions::default().resolver(resolver);
    let ast = parse_with("::include: lib/a.yaml\n", &options).unwrap();
    assert_eq!(keys(&ast, ast.top()), vec!["a", "raw", "b"]);
    let NodeKind::Object(children) = ast.kind(ast.top()) else {
        panic!("expected an object");
    };
    assert_eq!(
        ast.kind(children[1].1),
        &NodeKind::Constant(mold_doc::load_all("::include: c.yaml\n").unwrap().remove(0))
    );
}

#[test]
fn test_missing_include() {
    let options = ParserOptions::default().resolver(MemoryResolver::new());
    assert!(matches!(
        parse_with("::include: nowhere.yaml\n", &options),
        Err(ParseError::Include { ref path, .. }) if path == "nowhere.yaml"
    ));
}

#[test]
fn test_deeply_nested_document() {
    let mut value = Value::from(1_i64);
    for _ in 0..5_000 {
        value = Value::Sequence(vec![value]);
    }
    let ast = parse(value, &ParserOptions::default()).unwrap();
    assert_eq!(ast.len(), 5_002);
}
