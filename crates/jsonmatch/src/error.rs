use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while addressing or searching a document.
#[derive(Debug, PartialEq, Error, Diagnostic)]
pub enum Error {
    #[error("invalid path {src:?}")]
    #[diagnostic(
        code(jsonmatch::pointer::invalid_path),
        help(
            "A path must begin with '/'. Inside a segment, escape '~' as '~0' and '/' as '~1'."
        )
    )]
    InvalidPath {
        #[source_code]
        src: String,
        #[label("expected '/' here")]
        span: SourceSpan,
    },

    #[error("no value found at path {0:?}")]
    #[diagnostic(code(jsonmatch::query::missing))]
    Missing(String),

    #[error("cannot enter non-container value {0}")]
    #[diagnostic(
        code(jsonmatch::query::not_a_container),
        help("Only objects and arrays have children.")
    )]
    NotAContainer(String),

    #[error("invalid array index {0:?}")]
    #[diagnostic(
        code(jsonmatch::query::invalid_index),
        help("Array elements are addressed by unsigned decimal indices.")
    )]
    InvalidIndex(String),

    #[error("failed to decode JSON: {0}")]
    #[diagnostic(code(jsonmatch::decode))]
    Decode(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
