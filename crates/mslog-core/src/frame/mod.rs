//! Frame Synchronization
//!
//! Resynchronizes a flat capture token stream into fixed-length candidate
//! frames and filters out idle/garbage chunks.
//!
//! The capture format has no framing markers; framing is purely
//! positional, every [`FRAME_LEN`] tokens from the start of the stream.

mod sync;
mod token;

pub use sync::{Chunk, FrameFilter, FrameSynchronizer, MarkerByteFilter, SyncStats};
pub use token::canonical_token;

use crate::error::DecodeError;

/// Fixed frame length in bytes for the capture format
pub const FRAME_LEN: usize = 82;

/// Number of leading frame bytes covered by known fields; bytes beyond
/// this are reserved/undocumented payload.
pub const DECODED_LEN: usize = 28;

/// One fixed-length unit of the resynchronized capture stream.
///
/// Tokens are stored in canonical form (two uppercase hex digits each);
/// byte values are parsed on read, so every consumer re-validates
/// hex-decodability rather than trusting the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    tokens: Vec<String>,
}

impl Frame {
    /// Build a frame from raw tokens, canonicalizing each one.
    ///
    /// The synchronizer always supplies exactly [`FRAME_LEN`] tokens;
    /// shorter inputs are accepted here so the decoder's own length
    /// checks stay meaningful.
    pub fn from_tokens<S: AsRef<str>>(raw: &[S]) -> Result<Self, DecodeError> {
        let mut tokens = Vec::with_capacity(raw.len());
        for (offset, t) in raw.iter().enumerate() {
            let t = t.as_ref();
            let canon = token::canonical_token(t).ok_or_else(|| DecodeError::MalformedFrame {
                offset,
                reason: format!("token '{t}' is not a hex byte"),
            })?;
            tokens.push(canon);
        }
        Ok(Self { tokens })
    }

    /// Number of tokens in the frame.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the frame holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The canonical token at `offset`, if present.
    pub fn token(&self, offset: usize) -> Option<&str> {
        self.tokens.get(offset).map(String::as_str)
    }

    /// Parse the byte at `offset`.
    ///
    /// Fails with [`DecodeError::MalformedFrame`] when the frame is too
    /// short for the requested offset or the token there is not valid
    /// hexadecimal.
    pub fn byte(&self, offset: usize) -> Result<u8, DecodeError> {
        let tok = self
            .tokens
            .get(offset)
            .ok_or_else(|| DecodeError::MalformedFrame {
                offset,
                reason: format!(
                    "frame has {} bytes but the field needs offset {offset}",
                    self.tokens.len()
                ),
            })?;
        token::token_byte(tok).ok_or_else(|| DecodeError::MalformedFrame {
            offset,
            reason: format!("token '{tok}' is not valid hexadecimal"),
        })
    }

    /// Reserved trailing tokens (offsets [`DECODED_LEN`]..), preserved as
    /// opaque bytes for future extension.
    pub fn reserved(&self) -> &[String] {
        let start = DECODED_LEN.min(self.tokens.len());
        &self.tokens[start..]
    }
}
