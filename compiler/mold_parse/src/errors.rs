//! Parse errors.
//!
//! Parsing stops at the first error; no partial tree is returned.

/// Why a document could not be turned into a directive tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed name {name:?}: expected a name matching {expected}")]
    MalformedName { name: String, expected: &'static str },

    #[error("malformed each {key:?}: expected `::each <source> as <target>`")]
    MalformedEach { key: String },

    #[error("no such function: {name}")]
    UnknownFunction { name: String },

    #[error("{keyword} cannot be combined with the other keys of this mapping")]
    MisplacedKeyword { keyword: &'static str },

    #[error("invalid {directive}: {reason}")]
    InvalidDirective {
        directive: &'static str,
        reason: &'static str,
    },

    #[error("cannot include {path:?}: {message}")]
    Include { path: String, message: String },

    #[error("invalid expression {expression:?}: {message}")]
    InvalidExpression { expression: String, message: String },
}

impl ParseError {
    #[cold]
    pub(crate) fn invalid(directive: &'static str, reason: &'static str) -> Self {
        ParseError::InvalidDirective { directive, reason }
    }

    #[cold]
    pub(crate) fn include(path: &str, message: impl ToString) -> Self {
        ParseError::Include {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    #[cold]
    pub(crate) fn expression(expression: &str, message: impl Into<String>) -> Self {
        ParseError::InvalidExpression {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}
