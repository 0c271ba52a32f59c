//! Error types for the slides compiler.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for slide compilation.
///
/// Most variants are recoverable: the compiler records them as
/// diagnostics and keeps going with the next line. Only `Io` (output
/// write failures) and `InvalidParams` stop a run.
#[derive(Error, Debug)]
pub enum SlidesError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown command {name:?} in line {line}")]
    UnknownDirective { name: String, line: usize },

    #[error("invalid int value {value:?} in line {line}")]
    InvalidInteger { value: String, line: usize },

    #[error("couldn't open image file {}: {source}", path.display())]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error while decoding image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("error reading input after line {line}: {source}")]
    InputRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page parameters: {0}")]
    InvalidParams(String),
}

impl SlidesError {
    /// Whether processing may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SlidesError::Io(_) | SlidesError::InvalidParams(_))
    }
}

/// Convenience Result type alias for SlidesError.
pub type Result<T> = std::result::Result<T, SlidesError>;

/// A recoverable problem reported while compiling, tagged with the
/// source line it came from.
#[derive(Debug)]
pub struct Diagnostic {
    /// 1-based source line number.
    pub line: usize,
    pub error: SlidesError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}
