//! Fixed-cadence telemetry sender.
//!
//! Each gate fire is one send attempt. The link is double-checked (cached
//! flag plus the transport's own view) before any socket work; a stale flag
//! turns the attempt into a silent no-op that still counts for pacing. A
//! failed send is logged and forgotten, the next opportunity is the next
//! fire. The interval is measured from attempt completion, so a slow
//! exchange never produces catch-up sends afterwards.

use embassy_net::tcp::TcpSocket;
use embassy_net::{Ipv4Address, Stack};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use embedded_io_async::Write;
use esp_println::println;
use static_cell::StaticCell;

use biomech_node::http::{self, SendOutcome};
use biomech_node::identity::DeviceIdentity;
use biomech_node::pacing::IntervalGate;
use biomech_node::payload::{self, PayloadOverflow};
use biomech_node::sample::{SampleSource, SyntheticSampleSource};

use super::config::{
    HTTP_RW_BUF, HTTP_TIMEOUT_SECS, LINK, SEND_INTERVAL_MS, SEND_POLL_IDLE_MS, SERVER_ENDPOINT,
    SERVER_IP, SERVER_PORT, USER_AGENT,
};

const RESPONSE_MAX: usize = 512;

#[embassy_executor::task]
pub(crate) async fn telemetry_task(stack: Stack<'static>, identity: DeviceIdentity) {
    static RX_BUFFER: StaticCell<[u8; HTTP_RW_BUF]> = StaticCell::new();
    static TX_BUFFER: StaticCell<[u8; HTTP_RW_BUF]> = StaticCell::new();
    let rx_buffer = RX_BUFFER.init([0u8; HTTP_RW_BUF]);
    let tx_buffer = TX_BUFFER.init([0u8; HTTP_RW_BUF]);

    let mut source = SyntheticSampleSource;
    let mut send_gate = IntervalGate::new(SEND_INTERVAL_MS);

    loop {
        while !send_gate.poll(now_ms()) {
            Timer::after(Duration::from_millis(SEND_POLL_IDLE_MS)).await;
        }

        if LINK.is_connected() && stack.is_link_up() && stack.config_v4().is_some() {
            let uptime_ms = now_ms();
            let sample = source.sample(uptime_ms, LINK.wifi_signal_dbm());

            match payload::render(&identity, &sample) {
                Ok(document) => {
                    send_document(
                        stack,
                        &mut rx_buffer[..],
                        &mut tx_buffer[..],
                        document.as_bytes(),
                    )
                    .await;
                }
                Err(PayloadOverflow) => {
                    println!("telemetry: payload overflow, sample dropped");
                }
            }
        }

        // An exchange can run up to the socket timeout; stamping its
        // completion keeps the next fire a full interval away.
        send_gate.rearm(now_ms());
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// One POST-and-close exchange. Outcomes are logged here; the caller never
/// retries outside the normal cadence.
async fn send_document(
    stack: Stack<'static>,
    rx_buffer: &mut [u8],
    tx_buffer: &mut [u8],
    body: &[u8],
) {
    let head = match http::request_head(
        SERVER_ENDPOINT,
        SERVER_IP,
        SERVER_PORT,
        USER_AGENT,
        body.len(),
    ) {
        Ok(head) => head,
        Err(_) => {
            println!("telemetry: request head overflow");
            return;
        }
    };

    let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)));

    let [a, b, c, d] = SERVER_IP;
    let server = (Ipv4Address::new(a, b, c, d), SERVER_PORT);
    if let Err(err) = socket.connect(server).await {
        println!("telemetry: connect err={:?}", err);
        return;
    }

    let written = async {
        socket.write_all(head.as_bytes()).await?;
        socket.write_all(body).await?;
        socket.flush().await
    }
    .await;

    if let Err(err) = written {
        println!("telemetry: write err={:?}", err);
        socket.close();
        return;
    }

    log_response(&mut socket).await;

    let _ = with_timeout(Duration::from_millis(250), socket.flush()).await;
    socket.close();
}

async fn log_response(socket: &mut TcpSocket<'_>) {
    let mut buf = [0u8; RESPONSE_MAX];
    let mut filled = 0usize;

    // The server closes the connection (HTTP/1.0), so read until EOF or the
    // buffer is full; anything past RESPONSE_MAX is of no diagnostic value.
    while filled < buf.len() {
        match socket.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) => {
                if filled == 0 {
                    println!("telemetry: read err={:?}", err);
                    return;
                }
                break;
            }
        }
    }

    let raw = &buf[..filled];
    match http::status_code(raw).map(http::classify) {
        Some(SendOutcome::Accepted) => {
            let body = http::split_body(raw).map(|(_, body)| body).unwrap_or(&[]);
            let text = core::str::from_utf8(body).unwrap_or("<non_utf8>");
            println!("telemetry: sent ok response={}", text.trim_end());
        }
        Some(SendOutcome::Rejected(code)) => {
            println!("telemetry: http error code={}", code);
        }
        None => println!("telemetry: malformed response"),
    }
}
