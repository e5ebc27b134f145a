use std::path::PathBuf;

use mold_doc::DocError;
use mold_eval::EvalError;
use mold_parse::ParseError;

/// Why a document could not be rendered.
#[derive(Debug, thiserror::Error)]
pub enum MoldError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Doc(#[from] DocError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
