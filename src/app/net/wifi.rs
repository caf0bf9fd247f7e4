//! WiFi association lifecycle.
//!
//! One burst is a bounded series of connect attempts. Bursts are rate
//! limited by the reconnect gate: a failed burst is recorded in the shared
//! link state and not retried before the reconnect interval elapses, so an
//! extended outage cannot turn into a reconnection storm. Telemetry lost
//! while disconnected is lost; nothing is queued.

use embassy_futures::select::{select, Either};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use esp_println::println;
use esp_radio::wifi::{
    AuthMethod, ClientConfig, ModeConfig, ScanConfig, WifiController, WifiEvent,
};

use biomech_node::pacing::IntervalGate;

use super::super::config::{
    DHCP_CONFIG_TIMEOUT_MS, DISCONNECTED_IDLE_MS, LINK, RECONNECT_INTERVAL_MS,
    WIFI_CONNECT_ATTEMPT_BUDGET_MS, WIFI_CONNECT_ATTEMPT_MAX, WIFI_PASSWORD, WIFI_SIGNAL_REFRESH_MS,
    WIFI_SSID,
};

pub(super) async fn run_connection_task(
    mut controller: WifiController<'static>,
    stack: Stack<'static>,
) {
    if let Err(err) = controller.set_config(&station_config()) {
        // Credentials are compile-time constants, so this cannot heal at
        // runtime; park the task and leave the link down.
        println!("wifi: station config err={:?}", err);
        return;
    }

    let mut reconnect_gate = IntervalGate::new(RECONNECT_INTERVAL_MS);

    loop {
        while !reconnect_gate.poll(now_ms()) {
            Timer::after(Duration::from_millis(DISCONNECTED_IDLE_MS)).await;
        }

        let connected = connect_burst(&mut controller).await;
        // The interval is measured from burst completion, matching the
        // attempt-paced reconnect policy.
        reconnect_gate.rearm(now_ms());

        if connected {
            LINK.set_connected(true);
            report_link_up(&mut controller, stack).await;

            monitor_link(&mut controller).await;
            LINK.set_connected(false);
            println!("wifi: disconnected");
        } else {
            LINK.set_connected(false);
            println!("wifi: connection failed");
        }
    }
}

fn station_config() -> ModeConfig {
    let auth_method = if WIFI_PASSWORD.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::Wpa2Personal
    };
    ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into())
            .with_auth_method(auth_method),
    )
}

/// Up to `WIFI_CONNECT_ATTEMPT_MAX` attempts, each bounded by the per-attempt
/// budget. Returns whether the station associated.
async fn connect_burst(controller: &mut WifiController<'static>) -> bool {
    println!("wifi: connecting to {}", WIFI_SSID);

    if !matches!(controller.is_started(), Ok(true)) {
        if let Err(err) = controller.start_async().await {
            println!("wifi: start err={:?}", err);
            return false;
        }
    }

    for attempt in 1..=WIFI_CONNECT_ATTEMPT_MAX {
        let budget = Duration::from_millis(WIFI_CONNECT_ATTEMPT_BUDGET_MS);
        match with_timeout(budget, controller.connect_async()).await {
            Ok(Ok(())) => {
                println!("wifi: connected after {} attempt(s)", attempt);
                return true;
            }
            Ok(Err(err)) => {
                println!(
                    "wifi: attempt {}/{} err={:?}",
                    attempt, WIFI_CONNECT_ATTEMPT_MAX, err
                );
                Timer::after(budget).await;
            }
            Err(_timeout) => {
                // The attempt consumed its whole budget; move on.
            }
        }
    }

    false
}

async fn report_link_up(controller: &mut WifiController<'static>, stack: Stack<'static>) {
    let dhcp_budget = Duration::from_millis(DHCP_CONFIG_TIMEOUT_MS);
    match with_timeout(dhcp_budget, stack.wait_config_up()).await {
        Ok(()) => {
            if let Some(cfg) = stack.config_v4() {
                println!("wifi: ip address {}", cfg.address.address());
            }
        }
        Err(_) => println!("wifi: dhcp config timeout"),
    }

    if let Some(dbm) = observe_signal_strength(controller).await {
        LINK.set_wifi_signal(dbm);
        println!("wifi: signal strength {} dBm", dbm);
    }
}

/// Holds while the station stays associated. The RSSI observation is
/// re-taken on a slow cadence so long-lived links do not report a value
/// frozen at association time; returns when the station drops off.
async fn monitor_link(controller: &mut WifiController<'static>) {
    loop {
        let refresh = Timer::after(Duration::from_millis(WIFI_SIGNAL_REFRESH_MS));
        match select(controller.wait_for_event(WifiEvent::StaDisconnected), refresh).await {
            Either::First(_) => return,
            Either::Second(()) => {
                if let Some(dbm) = observe_signal_strength(controller).await {
                    LINK.set_wifi_signal(dbm);
                }
            }
        }
    }
}

/// Reads the live RSSI with a targeted scan for the configured SSID. A scan
/// miss keeps the previous observation; the payload field degrades, the
/// uplink does not.
async fn observe_signal_strength(controller: &mut WifiController<'static>) -> Option<i32> {
    let config = ScanConfig::default().with_ssid(WIFI_SSID).with_max(1);
    match controller.scan_with_config_async(config).await {
        Ok(results) => results.first().map(|ap| ap.signal_strength as i32),
        Err(err) => {
            println!("wifi: scan err={:?}", err);
            None
        }
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}
