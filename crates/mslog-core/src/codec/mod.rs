//! Telemetry Frame Codec
//!
//! Decodes one synchronized frame's byte-packed fields into a typed
//! [`Record`] in engineering units.
//!
//! The codec owns the byte offset table, the 16-bit combination rules,
//! the engine-status bit-flag table, and the unit scaling. Decoding is
//! pure and stateless; every frame is decoded independently.

mod decoder;
mod record;

pub use decoder::{audit_hex, combine_i16, combine_u16, decode, FieldHex};
pub use record::{EngineStatus, Record};
