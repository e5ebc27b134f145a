//! Evaluation phase tests.
//!
//! Complete templates run through the public API, from text to values.
//!
//! # Test Organization
//!
//! - `templates` - Larger documents combining most directives
//! - `each` - Iteration with lexical and dynamic loop variables
//! - `conditionals` - `::when` combined with `::let`
//! - `functions` - Built-in functions inside templates

mod conditionals;
mod each;
mod functions;
mod templates;
