//! Error types for refscope

use std::path::PathBuf;

use thiserror::Error;

use crate::models::symbol::Range;

pub type RefscopeResult<T> = std::result::Result<T, RefscopeError>;

#[derive(Debug, Error)]
pub enum RefscopeError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Every file in a requested folder failed; the only fetch error that
    /// surfaces to the caller.
    #[error(
        "could not retrieve symbols or references for any file in {}, \
         first error was: {source}", .folder.display()
    )]
    NoReferencesRetrievable {
        folder: PathBuf,
        #[source]
        source: Box<RefscopeError>,
    },

    /// A result file or the scope itself has no owning workspace root.
    /// Aborts the whole presentation step; labels cannot be partially
    /// omitted without breaking the grouping contract.
    #[error("could not determine workspace root for {}", .0.display())]
    PathResolution(PathBuf),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Per-symbol failures, recovered at the smallest enclosing scope: the
/// owning fan-out branch logs them and drops that symbol, never aborting
/// sibling symbols or files.
///
/// `Clone` because the reference cache stores failures verbatim and
/// re-raises them on later hits (poison caching).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// A symbol/reference collaborator returned no usable result.
    #[error("could not retrieve {request} for {}", .file.display())]
    ProviderUnavailable { request: String, file: PathBuf },

    /// The resolver could not locate the simple name inside the declared
    /// range.
    #[error(
        "symbol name \"{simple}\" (original: \"{name}\") not found in symbol range \
         {range} in {}", .file.display()
    )]
    NameMismatch {
        name: String,
        simple: String,
        range: Range,
        file: PathBuf,
    },

    /// The document backing a symbol's declaration could not be read.
    #[error("could not read {}: {message}", .file.display())]
    DocumentRead { file: PathBuf, message: String },
}

impl FetchError {
    pub fn provider_unavailable(request: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self::ProviderUnavailable {
            request: request.into(),
            file: file.into(),
        }
    }

    pub fn document_read(file: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::DocumentRead {
            file: file.into(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
