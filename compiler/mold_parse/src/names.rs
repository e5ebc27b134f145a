//! Identifier rules for bound names.

use std::sync::OnceLock;

use regex::Regex;

use crate::ParseError;

/// Names bound by `::let`, `::call` and `::each ... as`.
pub const NAME_PATTERN: &str = "^[a-z]([_-]?[a-z0-9])*$";

/// References spelled like this read an OS variable.
const ENV_PATTERN: &str = "^[A-Z][A-Z0-9_]*$";

// Literal patterns; compiling them cannot fail.
#[allow(clippy::expect_used)]
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("literal pattern"))
}

pub fn check_name(name: &str) -> Result<(), ParseError> {
    static NAME: OnceLock<Regex> = OnceLock::new();
    if compiled(&NAME, NAME_PATTERN).is_match(name) {
        Ok(())
    } else {
        Err(ParseError::MalformedName {
            name: name.to_string(),
            expected: NAME_PATTERN,
        })
    }
}

pub fn is_env_name(name: &str) -> bool {
    static ENV: OnceLock<Regex> = OnceLock::new();
    compiled(&ENV, ENV_PATTERN).is_match(name)
}
