use std::io;
use std::path::PathBuf;

use page_toc_dom::DomError;
use thiserror::Error;

/// Failures surfaced by [`crate::Operations`].
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialise page: {0}")]
    Dom(#[from] DomError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl OperationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        OperationError::Io {
            path: path.into(),
            source,
        }
    }
}
