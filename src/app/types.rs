use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Sentinel until the first real observation comes in.
const WIFI_SIGNAL_UNKNOWN_DBM: i32 = -127;

/// Cached belief about the WiFi association, refreshed by the connection
/// task. The flag can be stale by up to one scheduling quantum, which is why
/// the sender re-checks the transport before trusting it.
pub(crate) struct LinkState {
    connected: AtomicBool,
    wifi_signal_dbm: AtomicI32,
}

impl LinkState {
    pub(crate) const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            wifi_signal_dbm: AtomicI32::new(WIFI_SIGNAL_UNKNOWN_DBM),
        }
    }

    pub(crate) fn set_connected(&self, up: bool) {
        self.connected.store(up, Ordering::Relaxed);
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub(crate) fn set_wifi_signal(&self, dbm: i32) {
        self.wifi_signal_dbm.store(dbm, Ordering::Relaxed);
    }

    pub(crate) fn wifi_signal_dbm(&self) -> i32 {
        self.wifi_signal_dbm.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected_with_unknown_signal() {
        let link = LinkState::new();
        assert!(!link.is_connected());
        assert_eq!(link.wifi_signal_dbm(), WIFI_SIGNAL_UNKNOWN_DBM);
    }

    #[test]
    fn updates_are_visible() {
        let link = LinkState::new();
        link.set_connected(true);
        link.set_wifi_signal(-58);
        assert!(link.is_connected());
        assert_eq!(link.wifi_signal_dbm(), -58);

        link.set_connected(false);
        assert!(!link.is_connected());
    }

    #[test]
    fn later_signal_observations_replace_earlier_ones() {
        // Periodic re-observation while associated must win over the value
        // taken at association time.
        let link = LinkState::new();
        link.set_wifi_signal(-58);
        link.set_wifi_signal(-71);
        assert_eq!(link.wifi_signal_dbm(), -71);
    }
}
