/// A document that could not be read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    #[error("invalid YAML: {0}")]
    Yaml(String),
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("alias refers to an unknown anchor")]
    UnknownAnchor,
    #[error("number out of range: {0}")]
    Number(String),
}
