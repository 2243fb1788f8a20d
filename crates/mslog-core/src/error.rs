//! Decode errors

use thiserror::Error;

/// Errors that can occur while decoding a capture
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed frame at byte offset {offset}: {reason}")]
    MalformedFrame { offset: usize, reason: String },

    #[error("input is not a tokenizable text stream: {0}")]
    InvalidInputEncoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Whether this error aborts the whole pipeline.
    ///
    /// Malformed frames are skipped and the stream continues; only a
    /// structural failure of the input itself is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DecodeError::MalformedFrame { .. })
    }
}
