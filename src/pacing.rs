//! Attempt pacing for reconnect bursts and telemetry sends.
//!
//! Pure logic driven by caller-supplied millisecond timestamps, so the
//! scheduling rules are testable without a device clock. Pacing is
//! attempt-based: the gate advances on every fired attempt whether or not
//! the attempt succeeds.

/// Rate-limits an action to at most once per period.
pub struct IntervalGate {
    period_ms: u64,
    last_fire_ms: Option<u64>,
}

impl IntervalGate {
    /// Gate that fires on the first poll, then at most once per period.
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_fire_ms: None,
        }
    }

    /// Gate that behaves as if it had fired at `now_ms`; the first fire
    /// happens a full period later.
    pub const fn primed(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_fire_ms: Some(now_ms),
        }
    }

    /// True when the action may fire now; records the attempt time when it
    /// does. Polling more often than the period never produces extra fires.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            Some(last) if now_ms.saturating_sub(last) < self.period_ms => false,
            _ => {
                self.last_fire_ms = Some(now_ms);
                true
            }
        }
    }

    /// Re-stamps the gate without firing. Used when the gated action itself
    /// takes time and the interval is measured from its completion.
    pub fn rearm(&mut self, now_ms: u64) {
        self.last_fire_ms = Some(now_ms);
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }
}
