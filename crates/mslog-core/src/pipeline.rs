//! End-to-end decode pipeline
//!
//! Wires the tokenizer, frame synchronizer, and codec together, and
//! keeps the skip counters callers need for data-quality auditing of
//! noisy captures.

use std::io::Read;

use tracing::warn;

use crate::codec::{self, Record};
use crate::error::DecodeError;
use crate::frame::{FrameFilter, FrameSynchronizer, MarkerByteFilter, SyncStats};

/// Split a capture into raw whitespace-separated tokens.
///
/// The capture must be UTF-8 text. Anything else aborts the pipeline
/// with [`DecodeError::InvalidInputEncoding`], since no frames can be
/// recovered from an untokenizable stream.
pub fn read_tokens<R: Read>(mut input: R) -> Result<Vec<String>, DecodeError> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    let text =
        String::from_utf8(buf).map_err(|e| DecodeError::InvalidInputEncoding(e.to_string()))?;
    Ok(text.split_whitespace().map(str::to_owned).collect())
}

/// Lazy record stream over a raw token iterator.
///
/// Yields one item per frame that survives the garbage filter; a frame
/// that fails to decode surfaces as an `Err` item and never ends the
/// stream. Consumers may stop pulling at any point.
pub struct RecordStream<I, F = MarkerByteFilter> {
    frames: FrameSynchronizer<I, F>,
}

impl<I> RecordStream<I, MarkerByteFilter>
where
    I: Iterator<Item = String>,
{
    /// Create a record stream with the stock marker-byte filter.
    pub fn new(tokens: I) -> Self {
        Self::with_filter(tokens, MarkerByteFilter)
    }
}

impl<I, F> RecordStream<I, F>
where
    I: Iterator<Item = String>,
    F: FrameFilter,
{
    /// Create a record stream with a caller-supplied filter policy.
    pub fn with_filter(tokens: I, filter: F) -> Self {
        Self {
            frames: FrameSynchronizer::with_filter(tokens, filter),
        }
    }

    /// Synchronizer counters accumulated so far.
    pub fn sync_stats(&self) -> SyncStats {
        self.frames.stats()
    }
}

impl<I, F> Iterator for RecordStream<I, F>
where
    I: Iterator<Item = String>,
    F: FrameFilter,
{
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .next()
            .map(|frame| frame.and_then(|f| codec::decode(&f)))
    }
}

/// Counters describing one complete decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Frames decoded into records
    pub frames_decoded: u64,
    /// Chunks dropped by the garbage filter
    pub rejected_garbage: u64,
    /// Frames skipped because they could not be decoded
    pub malformed_frames: u64,
    /// Trailing tokens that did not fill a complete frame
    pub truncated_tokens: u64,
}

/// Decoded records plus the diagnostic counters from one pass.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutput {
    /// Records in original frame order
    pub records: Vec<Record>,
    /// Skip counters for data-quality auditing
    pub stats: DecodeStats,
}

/// Decode a whole capture with the stock garbage filter.
pub fn decode_reader<R: Read>(input: R) -> Result<DecodeOutput, DecodeError> {
    decode_reader_with_filter(input, MarkerByteFilter)
}

/// Decode a whole capture with a caller-supplied filter policy.
///
/// Malformed frames are logged, counted, and skipped; the pass only
/// fails when the input itself cannot be read or tokenized.
pub fn decode_reader_with_filter<R: Read, F: FrameFilter>(
    input: R,
    filter: F,
) -> Result<DecodeOutput, DecodeError> {
    let tokens = read_tokens(input)?;
    let mut stream = RecordStream::with_filter(tokens.into_iter(), filter);

    let mut records = Vec::new();
    let mut malformed_frames = 0u64;
    for item in &mut stream {
        match item {
            Ok(record) => records.push(record),
            Err(err) => {
                malformed_frames += 1;
                warn!(%err, "skipping malformed frame");
            }
        }
    }

    let sync = stream.sync_stats();
    let stats = DecodeStats {
        frames_decoded: records.len() as u64,
        rejected_garbage: sync.rejected_garbage,
        malformed_frames,
        truncated_tokens: sync.truncated_tokens,
    };
    Ok(DecodeOutput { records, stats })
}
