//! Compile-time configuration. Credentials and the server address carry
//! build-environment overrides; everything else is fixed for this node.

use super::types::LinkState;

pub(crate) const WIFI_SSID: &str = match option_env!("BIOMECH_WIFI_SSID") {
    Some(value) => value,
    None => "Akashesp",
};
pub(crate) const WIFI_PASSWORD: &str = match option_env!("BIOMECH_WIFI_PASSWORD") {
    Some(value) => value,
    None => "0987654321",
};

pub(crate) const SERVER_IP: [u8; 4] = [10, 209, 11, 147];
pub(crate) const SERVER_PORT: u16 = 3000;
pub(crate) const SERVER_ENDPOINT: &str = "/api/esp32-data";
pub(crate) const USER_AGENT: &str = "ESP32-BiomechAI";

pub(crate) const DEVICE_NAME: &str = "BiomechAI-RightAnkle";
pub(crate) const SENSOR_TYPE: &str = "ankle";
pub(crate) const BODY_POSITION: &str = "right_ankle";

/// Telemetry cadence; attempt-paced, not success-paced.
pub(crate) const SEND_INTERVAL_MS: u64 = 1_000;
/// Idle step while the send gate holds the task back.
pub(crate) const SEND_POLL_IDLE_MS: u64 = 100;
/// Minimum spacing between association retry bursts while disconnected.
pub(crate) const RECONNECT_INTERVAL_MS: u64 = 30_000;
/// Idle step while the reconnect gate holds the task back.
pub(crate) const DISCONNECTED_IDLE_MS: u64 = 1_000;
/// RSSI re-observation cadence while associated. Scanning perturbs the
/// link, so the refresh is deliberately slow.
pub(crate) const WIFI_SIGNAL_REFRESH_MS: u64 = 60_000;

/// One association burst: up to 20 attempts, 500 ms budget each.
pub(crate) const WIFI_CONNECT_ATTEMPT_MAX: u32 = 20;
pub(crate) const WIFI_CONNECT_ATTEMPT_BUDGET_MS: u64 = 500;
/// DHCP must produce a lease within this bound before the IP is reported.
pub(crate) const DHCP_CONFIG_TIMEOUT_MS: u64 = 20_000;

pub(crate) const HTTP_RW_BUF: usize = 1024;
/// Bounds the whole connect+request+response round-trip so a hung server
/// cannot stall the send task past one cycle.
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 20;

/// Shared link state: written by the connection task, read by the sender.
pub(crate) static LINK: LinkState = LinkState::new();
