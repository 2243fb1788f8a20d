//! # mslog Core Library
//!
//! Core functionality for decoding raw hex datalog captures from
//! MegaSquirt-style ECUs.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Frame synchronization over whitespace-delimited hex capture streams
//! - Garbage-frame rejection via a pluggable marker-byte filter
//! - A stateless frame codec producing typed engineering-unit records
//! - CSV serialization of decoded records for analysis tools
//!
//! ## Example
//!
//! ```rust,ignore
//! use mslog_core::pipeline::decode_reader;
//! use mslog_core::datalog::write_csv;
//!
//! let capture = std::fs::File::open("datalog.txt")?;
//! let output = decode_reader(capture)?;
//! eprintln!("skipped {} garbage frames", output.stats.rejected_garbage);
//! write_csv(std::io::stdout().lock(), &output.records)?;
//! ```

pub mod codec;
pub mod datalog;
mod error;
pub mod frame;
pub mod pipeline;
pub mod unit_conversion;

pub use error::DecodeError;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::codec::{decode, EngineStatus, Record};
    pub use crate::datalog::{write_csv, COLUMNS};
    pub use crate::error::DecodeError;
    pub use crate::frame::{
        Frame, FrameFilter, FrameSynchronizer, MarkerByteFilter, FRAME_LEN,
    };
    pub use crate::pipeline::{decode_reader, DecodeOutput, DecodeStats, RecordStream};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
