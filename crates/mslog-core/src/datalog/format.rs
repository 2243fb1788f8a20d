//! Log file formats
//!
//! Writes decoded records as CSV with the fixed 22-column layout used by
//! the capture tooling. Output goes to a caller-supplied sink; this
//! module never touches the filesystem itself.

use std::io::{self, Write};

use crate::codec::{audit_hex, Record};
use crate::error::DecodeError;
use crate::frame::Frame;

/// Output column names, in fixed order.
pub const COLUMNS: [&str; 22] = [
    "Seconds",
    "Injection Pulse Width 1 (us)",
    "Injection Pulse Width 2 (us)",
    "RPM",
    "Ignition Advance Angle (deg)",
    "Injection Event Scheduling",
    "Engine Status Ready",
    "Engine Status Crank",
    "Engine Status StartW",
    "Engine Status Warmup",
    "Engine Status TPSAEN",
    "Engine Status TPSDEN",
    "Air-Fuel Ratio Target 1",
    "Air-Fuel Ratio Target 2",
    "WBO2 Enabled 1",
    "WBO2 Enabled 2",
    "Barometric Pressure (kPa)",
    "Manifold Absolute Pressure (kPa)",
    "Manifold Air Temperature (deg C)",
    "Cylinder Temperature (deg C)",
    "Throttle Position (%)",
    "Battery Voltage (V)",
];

/// Write records to `writer` as CSV with the standard header row.
///
/// Decimal fields are rendered to two decimal places; records keep full
/// precision internally.
pub fn write_csv<W: Write>(mut writer: W, records: &[Record]) -> io::Result<()> {
    writeln!(writer, "{}", COLUMNS.join(","))?;

    for r in records {
        write!(
            writer,
            "{},{},{},{},{:.2},{}",
            r.seconds, r.pulse_width1_us, r.pulse_width2_us, r.rpm, r.advance_deg, r.squirt
        )?;
        for flag in r.engine.flags() {
            write!(writer, ",{flag}")?;
        }
        writeln!(
            writer,
            ",{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            r.afr_target1,
            r.afr_target2,
            r.wbo2_enabled1,
            r.wbo2_enabled2,
            r.baro_kpa,
            r.map_kpa,
            r.mat_c,
            r.clt_c,
            r.tps_pct,
            r.batt_v
        )?;
    }

    writer.flush()
}

/// Write the per-field hex rendering of each frame, one row per frame.
///
/// This mirrors the capture tooling's hex echo output and exists for
/// data-quality auditing of noisy captures.
pub fn write_hex_audit<W: Write>(mut writer: W, frames: &[Frame]) -> Result<(), DecodeError> {
    for frame in frames {
        let fields = audit_hex(frame)?;
        let row = fields
            .iter()
            .map(|f| f.hex.as_str())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}
