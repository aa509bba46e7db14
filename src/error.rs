use std::collections::TryReserveError;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for roomview operations
#[derive(Error, Diagnostic, Debug)]
pub enum RoomError {
    #[error("Not found: {}", path.display())]
    #[diagnostic(code(roomview::not_found))]
    NotFound { path: PathBuf },

    #[error("Malformed data: {message}")]
    #[diagnostic(code(roomview::malformed))]
    Malformed {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(roomview::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(roomview::io))]
    Io { path: PathBuf, message: String },

    #[error("Resource exhausted: {message}")]
    #[diagnostic(code(roomview::resource_exhausted))]
    ResourceExhausted { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(roomview::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(roomview::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl RoomError {
    /// Build a `Malformed` error without help text.
    pub fn malformed(message: impl Into<String>) -> Self {
        RoomError::Malformed {
            message: message.into(),
            help: None,
        }
    }

    /// Wrap an allocation failure for a buffer of `what`.
    pub fn exhausted(what: &str, err: TryReserveError) -> Self {
        RoomError::ResourceExhausted {
            message: format!("could not allocate {}: {}", what, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoomError>;
