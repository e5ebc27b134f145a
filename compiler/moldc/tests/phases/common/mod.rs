//! Shared test utilities for phase tests.

use moldc::{dedent, load_str, render_str, Format, MoldError, RenderOptions, Value};
use pretty_assertions::assert_eq;

/// Read a single document written as YAML or JSON.
pub fn value(text: &str) -> Value {
    let mut documents = mold_doc::load_all(&dedent(text)).unwrap();
    assert_eq!(documents.len(), 1, "expected a single document in {text:?}");
    documents.remove(0)
}

/// Evaluate a single-document template.
pub fn load_one(doc: &str, options: &RenderOptions) -> Result<Value, MoldError> {
    let mut documents = load_str(doc, options);
    assert_eq!(documents.len(), 1, "expected a single document");
    documents.remove(0)
}

fn render_one(doc: &str, options: &RenderOptions, format: Format) -> String {
    let mut documents = render_str(doc, &options.clone().format(format));
    assert_eq!(documents.len(), 1, "expected a single document");
    documents.remove(0).unwrap()
}

/// Check `doc` against `expected` three ways: rendered as JSON, rendered
/// as YAML, and loaded as a value.
pub fn check_with(expected: &str, doc: &str, options: &RenderOptions) {
    let expected = value(expected);

    let json = render_one(doc, options, Format::Json);
    assert_eq!(value(&json), expected, "JSON output:\n{json}");

    let yaml = render_one(doc, options, Format::Yaml);
    assert_eq!(value(&yaml), expected, "YAML output:\n{yaml}");

    assert_eq!(load_one(doc, options).unwrap(), expected);
}

pub fn check(expected: &str, doc: &str) {
    check_with(expected, doc, &RenderOptions::new());
}
