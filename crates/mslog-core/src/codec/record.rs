//! Decoded telemetry records

use serde::{Deserialize, Serialize};

/// Engine status flags, decoded from the status byte at frame offset 11.
///
/// Bits 0-5 in order; bits 6-7 are unused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Bit 0: engine ready
    pub ready: bool,
    /// Bit 1: cranking
    pub crank: bool,
    /// Bit 2: afterstart warmup enrichment
    pub startw: bool,
    /// Bit 3: warmup enrichment
    pub warmup: bool,
    /// Bit 4: TPS acceleration enrichment
    pub tpsaen: bool,
    /// Bit 5: TPS deceleration enleanment
    pub tpsden: bool,
}

impl EngineStatus {
    /// Decode the flags from the raw status byte.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            ready: byte & (1 << 0) != 0,
            crank: byte & (1 << 1) != 0,
            startw: byte & (1 << 2) != 0,
            warmup: byte & (1 << 3) != 0,
            tpsaen: byte & (1 << 4) != 0,
            tpsden: byte & (1 << 5) != 0,
        }
    }

    /// The six flags in fixed output-column order.
    pub fn flags(&self) -> [bool; 6] {
        [
            self.ready,
            self.crank,
            self.startw,
            self.warmup,
            self.tpsaen,
            self.tpsden,
        ]
    }
}

/// One fully decoded telemetry frame in engineering units.
///
/// Records are immutable once constructed and carry no relationship to
/// each other beyond sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Capture timestamp in whole seconds
    pub seconds: u16,
    /// Injection pulse width 1 in microseconds
    pub pulse_width1_us: u16,
    /// Injection pulse width 2 in microseconds
    pub pulse_width2_us: u16,
    /// Engine speed
    pub rpm: u16,
    /// Ignition advance angle in degrees
    pub advance_deg: f64,
    /// Injection event scheduling (squirt) byte
    pub squirt: u8,
    /// Engine status flags
    pub engine: EngineStatus,
    /// Air-fuel ratio target, bank 1
    pub afr_target1: u8,
    /// Air-fuel ratio target, bank 2
    pub afr_target2: u8,
    /// Wideband O2 enabled, bank 1
    pub wbo2_enabled1: u8,
    /// Wideband O2 enabled, bank 2
    pub wbo2_enabled2: u8,
    /// Barometric pressure in kPa
    pub baro_kpa: f64,
    /// Manifold absolute pressure in kPa
    pub map_kpa: f64,
    /// Manifold air temperature in degrees Celsius
    pub mat_c: f64,
    /// Cylinder temperature in degrees Celsius
    pub clt_c: f64,
    /// Throttle position in percent
    pub tps_pct: f64,
    /// Battery voltage in volts
    pub batt_v: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_byte_0x2b() {
        // 0x2B = 0b00101011
        let status = EngineStatus::from_byte(0x2B);
        assert!(status.ready);
        assert!(status.crank);
        assert!(!status.startw);
        assert!(status.warmup);
        assert!(!status.tpsaen);
        assert!(status.tpsden);
    }

    #[test]
    fn test_upper_bits_ignored() {
        assert_eq!(EngineStatus::from_byte(0xC0), EngineStatus::default());
        assert_eq!(EngineStatus::from_byte(0xFF).flags(), [true; 6]);
    }

    #[test]
    fn test_flags_order() {
        let status = EngineStatus::from_byte(0b000001);
        assert_eq!(
            status.flags(),
            [true, false, false, false, false, false]
        );
        let status = EngineStatus::from_byte(0b100000);
        assert_eq!(
            status.flags(),
            [false, false, false, false, false, true]
        );
    }
}
