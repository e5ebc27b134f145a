//! Parse phase tests.
//!
//! Documents rejected before evaluation, and `::include` resolution through
//! the public API.

use mold_ir::NodeKind;
use mold_parse::ParseError;
use moldc::{parse_str, MemoryResolver, MoldError, ParserOptions, RenderOptions};
use pretty_assertions::assert_eq;

use crate::common::{load_one, value};

fn parse_error(doc: &str) -> ParseError {
    let mut documents = parse_str(doc, &ParserOptions::new());
    assert_eq!(documents.len(), 1);
    match documents.remove(0) {
        Err(MoldError::Parse(error)) => error,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_function() {
    let error = parse_error("x:\n  ::frobnicate: 1\n");
    assert_eq!(
        error,
        ParseError::UnknownFunction {
            name: "frobnicate".into()
        }
    );
    assert_eq!(error.to_string(), "no such function: frobnicate");
}

#[test]
fn test_trailing_underscore_is_dropped_from_function_names() {
    let documents = parse_str("x:\n  ::and_: [true, false]\n", &ParserOptions::new());
    assert!(documents[0].is_ok());
}

#[test]
fn test_malformed_each() {
    assert_eq!(
        parse_error("x:\n  ::each xs:\n    - 1\n"),
        ParseError::MalformedEach {
            key: "::each xs".into()
        }
    );
}

#[test]
fn test_malformed_names() {
    assert!(matches!(
        parse_error("::let:\n  camelCase: 1\nx: 2\n"),
        ParseError::MalformedName { ref name, .. } if name == "camelCase"
    ));
    assert!(matches!(
        parse_error("x:\n  ::each xs as Item: <<Item>>\n"),
        ParseError::MalformedName { ref name, .. } if name == "Item"
    ));
}

#[test]
fn test_misplaced_keyword() {
    assert_eq!(
        parse_error("x:\n  ::case:\n    _: 1\n  other: 2\n"),
        ParseError::MisplacedKeyword { keyword: "::case" }
    );
}

#[test]
fn test_every_document_parses_on_its_own() {
    let documents = parse_str("a: 1\n---\nb:\n  ::nope: 1\n---\nc: 3\n", &ParserOptions::new());
    assert_eq!(documents.len(), 3);
    assert!(documents[0].is_ok());
    assert!(documents[1].is_err());
    assert!(documents[2].is_ok());
}

#[test]
fn test_top_level_scalar() {
    let documents = parse_str("hello <<x>>\n", &ParserOptions::new());
    let ast = documents.into_iter().next().unwrap().unwrap();
    assert!(matches!(ast.kind(ast.top()), NodeKind::Constant(_)));
}

#[test]
fn test_include_merges_documents() {
    let resolver = MemoryResolver::new()
        .with_file("defaults.yaml", "::let:\n  greeting: hello\nsettings:\n  verbose: false\n")
        .with_file("extra.yaml", "settings:\n  colors: true\n");
    let options = RenderOptions::new().parser(ParserOptions::new().resolver(resolver));
    let doc = "
        ::include:
          - defaults.yaml
          - extra.yaml
        message:
          ::ref: greeting
    ";

    assert_eq!(
        load_one(doc, &options).unwrap(),
        value("{message: hello, settings: {verbose: false, colors: true}}")
    );
}

#[test]
fn test_include_failures() {
    let resolver = MemoryResolver::new()
        .with_file("list.yaml", "- 1\n- 2\n")
        .with_file("loop.yaml", "::include: loop.yaml\nx: 1\n");
    let options = ParserOptions::new().resolver(resolver);
    let parse = |doc: &str| match parse_str(doc, &options).remove(0) {
        Err(MoldError::Parse(error)) => error,
        other => panic!("expected a parse error, got {other:?}"),
    };

    assert!(matches!(
        parse("::include: missing.yaml\n"),
        ParseError::Include { ref path, .. } if path == "missing.yaml"
    ));
    assert!(matches!(
        parse("::include: list.yaml\n"),
        ParseError::Include { ref path, .. } if path == "list.yaml"
    ));
    assert!(matches!(
        parse("::include: loop.yaml\n"),
        ParseError::InvalidDirective {
            directive: "::include",
            ..
        }
    ));
}
