//! Render phase tests.
//!
//! Loading text and files, and the exact text written for each format.

use std::fs;

use moldc::{load_file, render_file, render_str, Format, MoldError, RenderOptions, Value};
use pretty_assertions::assert_eq;

use crate::common::{load_one, value};

fn rendered(doc: &str, format: Format) -> Vec<String> {
    render_str(doc, &RenderOptions::new().format(format))
        .into_iter()
        .map(Result::unwrap)
        .collect()
}

#[test]
fn test_load_plain_document() {
    let doc = "
        foo: bar
        qux: quux
    ";
    assert_eq!(
        load_one(doc, &RenderOptions::new()).unwrap(),
        value("{foo: bar, qux: quux}")
    );
}

#[test]
fn test_numbers_are_exact() {
    let loaded = load_one("foo: 1.34\n", &RenderOptions::new()).unwrap();
    assert_eq!(loaded, value("foo: 1.34"));
    assert_eq!(loaded.to_json(), r#"{"foo":1.34}"#);
}

#[test]
fn test_verbatim_and_ignore() {
    let doc = "
        foo:
          ::verbatim:
            some text
        ::ignore:
          some notes
    ";
    assert_eq!(
        load_one(doc, &RenderOptions::new()).unwrap(),
        value("foo: some text")
    );
}

#[test]
fn test_verbatim_object() {
    let interpolated = "
        ::let:
            x: 'x'
        foo:
          qu<<x>>: quuz
        ::ignore:
          some notes
    ";
    assert_eq!(
        load_one(interpolated, &RenderOptions::new()).unwrap(),
        value("foo: {qux: quuz}")
    );

    let verbatim = "
        ::let:
            x: 'x'
        foo:
          ::verbatim:
            qu<<x>>: quuz
        ::ignore:
          some notes
    ";
    assert_eq!(
        load_one(verbatim, &RenderOptions::new()).unwrap(),
        value("foo: {'qu<<x>>': quuz}")
    );
}

#[test]
fn test_dates() {
    let loaded = load_one("value: 2020-02-20\n", &RenderOptions::new()).unwrap();
    let date = &loaded.as_map().unwrap()["value"];
    assert_eq!(date.type_name(), "date");
    assert_eq!(date.to_text(), "2020-02-20");
    assert_eq!(
        rendered("value: 2020-02-20\n", Format::Json),
        vec![r#"{"value":"2020-02-20"}"#]
    );
}

#[test]
fn test_output_keeps_key_order() {
    let doc = "
        zebra: 1
        apple:
          - b
          - a
        mango: {y: 2, x: 1}
    ";
    assert_eq!(
        rendered(doc, Format::Yaml),
        vec!["zebra: 1\napple:\n- b\n- a\nmango:\n  y: 2\n  x: 1\n"]
    );
    assert_eq!(
        rendered(doc, Format::Json),
        vec![r#"{"zebra":1,"apple":["b","a"],"mango":{"y":2,"x":1}}"#]
    );
}

#[test]
fn test_strings_that_look_like_other_types_stay_strings() {
    let doc = "
        ::let:
          n: '42'
        a: <<n>>
        b: 'yes'
        c: 'null'
    ";
    let yaml = rendered(doc, Format::Yaml).remove(0);
    assert_eq!(
        value(&yaml),
        Value::from_iter([
            ("a".to_string(), Value::string("42")),
            ("b".to_string(), Value::string("yes")),
            ("c".to_string(), Value::string("null")),
        ])
    );
}

#[test]
fn test_documents_fail_independently() {
    let doc = "a: 1\n---\nb:\n  ::ref: nowhere\n---\nc: 3\n";
    let results = render_str(doc, &RenderOptions::new().format(Format::Json));
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), r#"{"a":1}"#);
    assert!(matches!(results[1], Err(MoldError::Eval(_))));
    assert_eq!(results[2].as_ref().unwrap(), r#"{"c":3}"#);
}

#[test]
fn test_undecodable_input_is_one_failure() {
    let results = render_str("a: [1, 2\n", &RenderOptions::new());
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(MoldError::Doc(_))));
}

#[test]
fn test_file_includes_are_relative_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(
        dir.path().join("lib").join("greet.yaml"),
        "::let:\n  greet: hello <<$name>>\n",
    )
    .unwrap();
    let main = dir.path().join("main.yaml");
    fs::write(
        &main,
        "::include: lib/greet.yaml\nmessage:\n  ::call greet:\n    $name: world\n",
    )
    .unwrap();

    let options = RenderOptions::new().format(Format::Json);
    let results = render_file(&main, &options);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap(), r#"{"message":"hello world"}"#);
}

#[test]
fn test_nested_includes_are_relative_to_the_including_file() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("a.yaml"), "::include: b.yaml\na: 1\n").unwrap();
    fs::write(lib.join("b.yaml"), "b: 2\n").unwrap();
    let main = dir.path().join("main.yaml");
    fs::write(&main, "::include: lib/a.yaml\nc: 3\n").unwrap();

    let results = load_file(&main, &RenderOptions::new());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap(), &value("{c: 3, a: 1, b: 2}"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let results = load_file(&dir.path().join("absent.yaml"), &RenderOptions::new());
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(error @ MoldError::Io { .. }) => assert!(error.to_string().contains("absent.yaml")),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
