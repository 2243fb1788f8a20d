//! Frame synchronizer
//!
//! Chunks the raw token stream into non-overlapping [`FRAME_LEN`]-token
//! groups, applies the garbage filter, and surfaces the survivors as
//! candidate frames.

use tracing::debug;

use super::{token, Frame, FRAME_LEN};
use crate::error::DecodeError;

/// Unvalidated view of one fixed-length chunk of raw tokens.
///
/// Lets a [`FrameFilter`] inspect marker bytes before the chunk has been
/// fully validated; unparseable tokens simply read as `None`.
pub struct Chunk<'a> {
    tokens: &'a [String],
}

impl Chunk<'_> {
    /// Parse the byte at `offset`, if the token there is valid hex.
    pub fn byte(&self, offset: usize) -> Option<u8> {
        let canon = token::canonical_token(self.tokens.get(offset)?)?;
        token::token_byte(&canon)
    }

    /// Number of tokens in the chunk.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the chunk holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Policy deciding whether a chunk is genuine telemetry or noise.
///
/// The stock policy is [`MarkerByteFilter`]. The marker heuristic is
/// operational lore rather than a checksum, so it stays swappable.
pub trait FrameFilter {
    /// `true` to keep the chunk, `false` to drop it as garbage.
    fn accept(&self, chunk: &Chunk<'_>) -> bool;
}

/// Marker-byte garbage filter.
///
/// Idle/keep-alive and corrupt chunks carry `0x00` or `0xF0` at offset 0,
/// or `0x00` at offset 2; genuine telemetry frames do not.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerByteFilter;

impl FrameFilter for MarkerByteFilter {
    fn accept(&self, chunk: &Chunk<'_>) -> bool {
        if matches!(chunk.byte(0), Some(0x00 | 0xF0)) {
            return false;
        }
        if chunk.byte(2) == Some(0x00) {
            return false;
        }
        true
    }
}

/// Running counters for one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Complete chunks seen so far
    pub chunks: u64,
    /// Chunks dropped by the garbage filter
    pub rejected_garbage: u64,
    /// Trailing tokens that did not fill a complete frame
    pub truncated_tokens: u64,
}

/// Lazy, one-pass synchronizer over a raw token stream.
///
/// Yields `Ok(Frame)` for each accepted chunk and `Err` for chunks that
/// pass the garbage filter but contain a structurally invalid token; a
/// per-chunk error never ends the stream. Consumers may stop pulling at
/// any point without processing the remainder of the input.
pub struct FrameSynchronizer<I, F = MarkerByteFilter> {
    tokens: I,
    filter: F,
    stats: SyncStats,
    done: bool,
}

impl<I> FrameSynchronizer<I, MarkerByteFilter>
where
    I: Iterator<Item = String>,
{
    /// Create a synchronizer with the stock marker-byte filter.
    pub fn new(tokens: I) -> Self {
        Self::with_filter(tokens, MarkerByteFilter)
    }
}

impl<I, F> FrameSynchronizer<I, F>
where
    I: Iterator<Item = String>,
    F: FrameFilter,
{
    /// Create a synchronizer with a caller-supplied filter policy.
    pub fn with_filter(tokens: I, filter: F) -> Self {
        Self {
            tokens,
            filter,
            stats: SyncStats::default(),
            done: false,
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    fn next_chunk(&mut self) -> Option<Vec<String>> {
        let mut chunk = Vec::with_capacity(FRAME_LEN);
        while chunk.len() < FRAME_LEN {
            match self.tokens.next() {
                Some(t) => chunk.push(t),
                None => {
                    self.done = true;
                    if !chunk.is_empty() {
                        self.stats.truncated_tokens = chunk.len() as u64;
                        debug!(
                            tokens = chunk.len(),
                            "dropping partial frame at end of stream"
                        );
                    }
                    return None;
                }
            }
        }
        Some(chunk)
    }
}

impl<I, F> Iterator for FrameSynchronizer<I, F>
where
    I: Iterator<Item = String>,
    F: FrameFilter,
{
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            let raw = self.next_chunk()?;
            self.stats.chunks += 1;
            if !self.filter.accept(&Chunk { tokens: &raw }) {
                self.stats.rejected_garbage += 1;
                debug!(chunk = self.stats.chunks, "rejected garbage frame");
                continue;
            }
            return Some(Frame::from_tokens(&raw));
        }
    }
}
