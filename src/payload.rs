//! Bounded JSON rendering for the telemetry POST body.
//!
//! The document is written into a fixed-capacity buffer. Overflow is a hard
//! error surfaced to the caller, never a silent truncation: a grown field set
//! must come with a grown `PAYLOAD_CAPACITY`.

use core::fmt::{self, Write};

use heapless::String;

use crate::identity::DeviceIdentity;
use crate::sample::TelemetrySample;

/// Sized for the full field set with roughly 2x headroom.
pub const PAYLOAD_CAPACITY: usize = 512;

/// The rendered document did not fit its buffer. The sample is dropped and
/// the condition reported; nothing partial ever goes on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadOverflow;

/// Renders the compact JSON document for one sample.
pub fn render(
    identity: &DeviceIdentity,
    sample: &TelemetrySample,
) -> Result<String<PAYLOAD_CAPACITY>, PayloadOverflow> {
    render_into::<PAYLOAD_CAPACITY>(identity, sample)
}

/// Capacity-generic renderer; tests use a deliberately small `N` to exercise
/// the overflow path.
pub fn render_into<const N: usize>(
    identity: &DeviceIdentity,
    sample: &TelemetrySample,
) -> Result<String<N>, PayloadOverflow> {
    let mut doc: String<N> = String::new();
    write_document(&mut doc, identity, sample).map_err(|_| PayloadOverflow)?;
    Ok(doc)
}

fn write_document(
    doc: &mut impl Write,
    identity: &DeviceIdentity,
    sample: &TelemetrySample,
) -> fmt::Result {
    write!(
        doc,
        "{{\"deviceId\":\"{}\",\"deviceName\":\"{}\",\"sensorType\":\"{}\",\"bodyPosition\":\"{}\"",
        identity.device_id, identity.device_name, identity.sensor_type, identity.body_position,
    )?;
    write!(
        doc,
        ",\"timestamp\":{},\"receivedAt\":{}",
        sample.timestamp_ms, sample.timestamp_ms,
    )?;
    write!(
        doc,
        ",\"acceleration\":{{\"x\":{:.3},\"y\":{:.3},\"z\":{:.3}}}",
        sample.acceleration.x, sample.acceleration.y, sample.acceleration.z,
    )?;
    write!(
        doc,
        ",\"gyroscope\":{{\"x\":{:.3},\"y\":{:.3},\"z\":{:.3}}}",
        sample.gyroscope.x, sample.gyroscope.y, sample.gyroscope.z,
    )?;
    write!(
        doc,
        ",\"angles\":{{\"yaw\":{:.1},\"pitch\":{:.1},\"roll\":{:.1}}}",
        sample.angles.yaw, sample.angles.pitch, sample.angles.roll,
    )?;
    write!(
        doc,
        ",\"temperature\":{:.2},\"wifiSignal\":{},\"batteryLevel\":{}}}",
        sample.temperature_c, sample.wifi_signal_dbm, sample.battery_level,
    )
}
