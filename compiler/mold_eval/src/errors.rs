//! Evaluation errors.
//!
//! Errors are built through the `#[cold]` factory functions below, which
//! fill in both the structured [`EvalErrorKind`] and the rendered message.
//!
//! # Recovery
//!
//! An enclosing `::else` catches only the failures that depend on the
//! data being rendered: missing dynamic or OS variables, type mismatches,
//! and the arithmetic, conversion and index failures of built-in functions.
//! Everything else is a mistake in the document and always propagates.

use std::fmt;

use mold_functions::FunctionError;
use mold_value::Value;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Variables
    UndefinedLexical {
        name: String,
    },
    UndefinedDynamic {
        name: String,
    },
    UndefinedEnv {
        name: String,
    },

    // Structure
    NoMergePossible {
        left: &'static str,
        right: &'static str,
    },
    NoCaseMatch,
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    // Built-in functions
    Function {
        name: &'static str,
        source: FunctionError,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedLexical { name } => write!(f, "no such variable: {name}"),
            Self::UndefinedDynamic { name } => write!(f, "no such dynamic variable: ${name}"),
            Self::UndefinedEnv { name } => {
                write!(f, "no such environment variable: {name}")
            }
            Self::NoMergePossible { left, right } => {
                write!(f, "no merge possible between {left} and {right}")
            }
            Self::NoCaseMatch => write!(f, "no ::case matched"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            // FunctionError messages already lead with the function name.
            Self::Function { source, .. } => write!(f, "{source}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// `kind` rendered, kept so callers can print without formatting.
    pub message: String,
    /// Context added while the error travelled up, innermost first.
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Whether an enclosing `::else` falls back instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        match &self.kind {
            EvalErrorKind::UndefinedDynamic { .. }
            | EvalErrorKind::UndefinedEnv { .. }
            | EvalErrorKind::TypeMismatch { .. } => true,
            EvalErrorKind::Function { source, .. } => source.is_recoverable(),
            EvalErrorKind::UndefinedLexical { .. }
            | EvalErrorKind::NoMergePossible { .. }
            | EvalErrorKind::NoCaseMatch => false,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Variables

/// A lexical name with no enclosing `::let` or `::each` binding it.
#[cold]
pub fn undefined_lexical(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedLexical {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_dynamic(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedDynamic {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_env(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedEnv {
        name: name.to_string(),
    })
}

// Structure

#[cold]
pub fn no_merge(left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMergePossible { left, right })
}

#[cold]
pub fn no_case_match() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoCaseMatch)
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

// Built-in functions

#[cold]
pub fn function_error(name: &'static str, source: FunctionError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Function { name, source })
}
