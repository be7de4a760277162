//! Error handling utilities shared across the crate.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = SampleError> = std::result::Result<T, E>;

/// Failures raised while loading inputs, building the tokenizer, or writing samples.
#[derive(Debug, Error)]
pub enum SampleError {
    /// A required input file (source sentence, vocabulary, or merges) does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be located.
        path: PathBuf,
    },
    /// Vocabulary or merges content could not be parsed into a tokenizer.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// File whose contents were rejected.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// Filesystem IO error with optional context path.
    #[error("io error while processing {path:?}: {source}")]
    Io {
        /// Underlying IO error returned by the standard library.
        source: io::Error,
        /// Target path associated with the IO failure if available.
        path: Option<PathBuf>,
    },
    /// Generator configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Error bubbled up from the `tokenizers` crate while encoding or decoding.
    #[error("huggingface tokenizers error: {0}")]
    Tokenizers(String),
}

impl From<tokenizers::Error> for SampleError {
    fn from(err: tokenizers::Error) -> Self {
        Self::Tokenizers(err.to_string())
    }
}

impl SampleError {
    /// Helper constructor that attaches an optional path when wrapping IO errors.
    pub fn io(source: io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { source, path }
    }

    /// Wraps an error raised while reading `path`, promoting `NotFound` to
    /// [`SampleError::FileNotFound`].
    pub fn read(source: io::Error, path: &Path) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::io(source, Some(path.to_path_buf()))
        }
    }

    /// Returns `true` when the error reports a missing input file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}
