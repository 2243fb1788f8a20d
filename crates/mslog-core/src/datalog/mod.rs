//! Datalog Output
//!
//! Serializes decoded records for downstream analysis tools.

mod format;

pub use format::{write_csv, write_hex_audit, COLUMNS};
