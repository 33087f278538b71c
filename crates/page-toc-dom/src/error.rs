use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures while reading or writing a document.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("serialised document is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Selector syntax outside the supported subset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("empty selector in list '{selector}'")]
    EmptyGroup { selector: String },

    #[error("unsupported character '{ch}' in selector '{selector}'")]
    Unsupported { selector: String, ch: char },

    #[error("missing name after '{marker}' in selector '{selector}'")]
    MissingName { selector: String, marker: char },

    #[error("selector '{selector}' names more than one id")]
    DuplicateId { selector: String },
}
