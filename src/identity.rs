//! Immutable device identity reported in every telemetry payload.

use core::fmt::Write;

use heapless::String;

/// "ESP32-" plus eight hex digits, with a little headroom.
pub const DEVICE_ID_MAX: usize = 16;

/// Built once during bring-up and never mutated afterwards.
pub struct DeviceIdentity {
    pub device_id: String<DEVICE_ID_MAX>,
    pub device_name: &'static str,
    pub sensor_type: &'static str,
    pub body_position: &'static str,
}

impl DeviceIdentity {
    /// Derives the device id from the station MAC: `ESP32-` followed by the
    /// low 32 bits in lowercase hex. The backend keys devices on this string.
    pub fn from_mac(
        mac: [u8; 6],
        device_name: &'static str,
        sensor_type: &'static str,
        body_position: &'static str,
    ) -> Self {
        let tail = u32::from_be_bytes([mac[2], mac[3], mac[4], mac[5]]);
        let mut device_id = String::new();
        // DEVICE_ID_MAX always holds the prefix plus at most 8 hex digits.
        let _ = write!(device_id, "ESP32-{tail:x}");

        Self {
            device_id,
            device_name,
            sensor_type,
            body_position,
        }
    }
}
