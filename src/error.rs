//! Error types for parsing, traversal and code emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library.
///
/// Traversals over a well-formed tree only ever fail with
/// [`Error::DepthExceeded`]; everything else originates at the parse,
/// accessor, configuration or emission boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be read or is not valid Java.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The compilation unit has no package declaration.
    #[error("no package declaration in {}", path.display())]
    MissingPackage { path: PathBuf },

    /// Statement or expression nesting exceeded the configured bound.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A configuration file could not be loaded.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A name handed to the code emitter is not a legal Java identifier.
    #[error("invalid {kind} name: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
