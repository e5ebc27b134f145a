//! Failures raised by built-in functions.

use mold_value::{DecimalError, MergeError, Value};

pub type FunctionResult = Result<Value, FunctionError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("{function}: {source}")]
    Arithmetic {
        function: &'static str,
        source: DecimalError,
    },
    #[error("{function} expects {expected}, got {got}")]
    TypeMismatch {
        function: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{function} cannot convert {value:?} to {target}")]
    Conversion {
        function: &'static str,
        value: String,
        target: &'static str,
    },
    #[error("{function}: no element at {index}")]
    MissingIndex {
        function: &'static str,
        index: String,
    },
    #[error("{function} expects {expected} arguments, got {got}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("{function}: {source}")]
    Merge {
        function: &'static str,
        source: MergeError,
    },
}

impl FunctionError {
    /// Whether an enclosing `::else` may recover from this failure.
    ///
    /// Arithmetic, type, conversion and index failures are data dependent.
    /// Arity and merge failures are mistakes in the document.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FunctionError::Arithmetic { .. }
                | FunctionError::TypeMismatch { .. }
                | FunctionError::Conversion { .. }
                | FunctionError::MissingIndex { .. }
        )
    }
}

#[cold]
pub(crate) fn type_mismatch(function: &'static str, expected: &'static str, got: &Value) -> FunctionError {
    FunctionError::TypeMismatch {
        function,
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub(crate) fn conversion(function: &'static str, value: &Value, target: &'static str) -> FunctionError {
    FunctionError::Conversion {
        function,
        value: value.to_text().into_owned(),
        target,
    }
}

#[cold]
pub(crate) fn missing_index(function: &'static str, index: &Value) -> FunctionError {
    FunctionError::MissingIndex {
        function,
        index: index.to_text().into_owned(),
    }
}

#[cold]
pub(crate) fn arithmetic(function: &'static str, source: DecimalError) -> FunctionError {
    FunctionError::Arithmetic { function, source }
}

/// A non-map operand to one of the map-merging functions.
#[cold]
pub(crate) fn merge_conflict(function: &'static str, got: &Value) -> FunctionError {
    FunctionError::Merge {
        function,
        source: MergeError {
            left: "map",
            right: got.type_name(),
        },
    }
}
