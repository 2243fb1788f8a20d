//! Frame decoding
//!
//! Owns the byte offset table for the 82-byte capture frame. All 16-bit
//! fields store the low byte at the lower offset.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use super::record::{EngineStatus, Record};
use crate::error::DecodeError;
use crate::frame::Frame;
use crate::unit_conversion::fahrenheit_to_celsius;

// Field offsets (low byte for 16-bit fields)
const OFF_SECONDS: usize = 0;
const OFF_PW1: usize = 2;
const OFF_PW2: usize = 4;
const OFF_RPM: usize = 6;
const OFF_ADVANCE: usize = 8;
const OFF_SQUIRT: usize = 10;
const OFF_ENGINE: usize = 11;
const OFF_AFR_TARGET1: usize = 12;
const OFF_AFR_TARGET2: usize = 13;
const OFF_WBO2_EN1: usize = 14;
const OFF_WBO2_EN2: usize = 15;
const OFF_BARO: usize = 16;
const OFF_MAP: usize = 18;
const OFF_MAT: usize = 20;
const OFF_CLT: usize = 22;
const OFF_TPS: usize = 24;
const OFF_BATT: usize = 26;

/// Combine two bytes into an unsigned 16-bit value, low byte first:
/// `(high << 8) | low`.
pub fn combine_u16(low: u8, high: u8) -> u16 {
    LittleEndian::read_u16(&[low, high])
}

/// Combine two bytes into a signed 16-bit value (two's complement
/// reinterpretation of [`combine_u16`]).
pub fn combine_i16(low: u8, high: u8) -> i16 {
    LittleEndian::read_i16(&[low, high])
}

fn word(frame: &Frame, lo: usize) -> Result<u16, DecodeError> {
    Ok(combine_u16(frame.byte(lo)?, frame.byte(lo + 1)?))
}

/// Signed 16-bit field with the /10 decimal scaling applied.
fn scaled(frame: &Frame, lo: usize) -> Result<f64, DecodeError> {
    Ok(f64::from(combine_i16(frame.byte(lo)?, frame.byte(lo + 1)?)) / 10.0)
}

/// Decode one frame into a [`Record`].
///
/// Pure and stateless: decoding the same frame twice yields identical
/// records. A failure identifies the offending byte offset and leaves
/// the caller free to continue with the next frame.
pub fn decode(frame: &Frame) -> Result<Record, DecodeError> {
    Ok(Record {
        seconds: word(frame, OFF_SECONDS)?,
        pulse_width1_us: word(frame, OFF_PW1)?,
        pulse_width2_us: word(frame, OFF_PW2)?,
        rpm: word(frame, OFF_RPM)?,
        advance_deg: f64::from(word(frame, OFF_ADVANCE)?) / 10.0,
        squirt: frame.byte(OFF_SQUIRT)?,
        engine: EngineStatus::from_byte(frame.byte(OFF_ENGINE)?),
        afr_target1: frame.byte(OFF_AFR_TARGET1)?,
        afr_target2: frame.byte(OFF_AFR_TARGET2)?,
        wbo2_enabled1: frame.byte(OFF_WBO2_EN1)?,
        wbo2_enabled2: frame.byte(OFF_WBO2_EN2)?,
        baro_kpa: scaled(frame, OFF_BARO)?,
        map_kpa: scaled(frame, OFF_MAP)?,
        // temperatures arrive as scaled Fahrenheit
        mat_c: fahrenheit_to_celsius(scaled(frame, OFF_MAT)?),
        clt_c: fahrenheit_to_celsius(scaled(frame, OFF_CLT)?),
        tps_pct: scaled(frame, OFF_TPS)?,
        batt_v: scaled(frame, OFF_BATT)?,
    })
}

/// One field's raw source bytes in canonical hex, for audit logging.
///
/// Word fields render high byte first, matching the capture tooling's
/// hex echo output (`0B B8` at bytes 7,6 renders as `0BB8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldHex {
    /// Field name as used in the output columns
    pub field: &'static str,
    /// Canonical uppercase hex of the field's source bytes
    pub hex: String,
}

fn word_hex(frame: &Frame, lo: usize) -> Result<String, DecodeError> {
    let low = frame.byte(lo)?;
    let high = frame.byte(lo + 1)?;
    Ok(format!("{high:02X}{low:02X}"))
}

fn byte_hex(frame: &Frame, offset: usize) -> Result<String, DecodeError> {
    Ok(format!("{:02X}", frame.byte(offset)?))
}

/// Render every decoded field's raw bytes as canonical hex.
///
/// Fails on the same conditions as [`decode`].
pub fn audit_hex(frame: &Frame) -> Result<Vec<FieldHex>, DecodeError> {
    let fields = vec![
        FieldHex { field: "Seconds", hex: word_hex(frame, OFF_SECONDS)? },
        FieldHex { field: "Injection Pulse Width 1 (us)", hex: word_hex(frame, OFF_PW1)? },
        FieldHex { field: "Injection Pulse Width 2 (us)", hex: word_hex(frame, OFF_PW2)? },
        FieldHex { field: "RPM", hex: word_hex(frame, OFF_RPM)? },
        FieldHex { field: "Ignition Advance Angle (deg)", hex: word_hex(frame, OFF_ADVANCE)? },
        FieldHex { field: "Injection Event Scheduling", hex: byte_hex(frame, OFF_SQUIRT)? },
        FieldHex { field: "Engine Status", hex: byte_hex(frame, OFF_ENGINE)? },
        FieldHex { field: "Air-Fuel Ratio Target 1", hex: byte_hex(frame, OFF_AFR_TARGET1)? },
        FieldHex { field: "Air-Fuel Ratio Target 2", hex: byte_hex(frame, OFF_AFR_TARGET2)? },
        FieldHex { field: "WBO2 Enabled 1", hex: byte_hex(frame, OFF_WBO2_EN1)? },
        FieldHex { field: "WBO2 Enabled 2", hex: byte_hex(frame, OFF_WBO2_EN2)? },
        FieldHex { field: "Barometric Pressure (kPa)", hex: word_hex(frame, OFF_BARO)? },
        FieldHex { field: "Manifold Absolute Pressure (kPa)", hex: word_hex(frame, OFF_MAP)? },
        FieldHex { field: "Manifold Air Temperature (deg C)", hex: word_hex(frame, OFF_MAT)? },
        FieldHex { field: "Cylinder Temperature (deg C)", hex: word_hex(frame, OFF_CLT)? },
        FieldHex { field: "Throttle Position (%)", hex: word_hex(frame, OFF_TPS)? },
        FieldHex { field: "Battery Voltage (V)", hex: word_hex(frame, OFF_BATT)? },
    ];
    Ok(fields)
}
