//! Minimal HTTP/1.0 client plumbing for the telemetry uplink.
//!
//! Only what one POST-and-close exchange needs: a request head builder and
//! response head parsing. The socket handling lives with the sender task.

use core::fmt::Write;

use heapless::String;

/// Upper bound for the request head; the longest head is well under this.
pub const REQUEST_HEAD_MAX: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadOverflow;

/// How a completed exchange is reported. Only 200 counts as accepted; every
/// other status is logged as an error and the sample is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted,
    Rejected(u16),
}

pub fn classify(code: u16) -> SendOutcome {
    if code == 200 {
        SendOutcome::Accepted
    } else {
        SendOutcome::Rejected(code)
    }
}

/// Builds the request head for one telemetry POST.
pub fn request_head(
    path: &str,
    server_ip: [u8; 4],
    server_port: u16,
    user_agent: &str,
    content_length: usize,
) -> Result<String<REQUEST_HEAD_MAX>, HeadOverflow> {
    let [a, b, c, d] = server_ip;
    let mut head: String<REQUEST_HEAD_MAX> = String::new();
    write!(
        head,
        "POST {path} HTTP/1.0\r\n\
         Host: {a}.{b}.{c}.{d}:{server_port}\r\n\
         Content-Type: application/json\r\n\
         User-Agent: {user_agent}\r\n\
         Content-Length: {content_length}\r\n\
         Connection: close\r\n\r\n",
    )
    .map_err(|_| HeadOverflow)?;
    Ok(head)
}

/// Status code from a response head like `HTTP/1.0 200 OK`.
pub fn status_code(raw: &[u8]) -> Option<u16> {
    let line_end = raw
        .windows(2)
        .position(|window| window == b"\r\n")
        .unwrap_or(raw.len());
    let line = core::str::from_utf8(&raw[..line_end]).ok()?;

    let mut parts = line.split_ascii_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse::<u16>().ok()
}

/// Splits a raw response at the header/body boundary.
pub fn split_body(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = raw.windows(4).position(|window| window == b"\r\n\r\n")?;
    Some((&raw[..end], &raw[end + 4..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_head_matches_the_wire_format() {
        let head = request_head("/api/esp32-data", [10, 209, 11, 147], 3000, "ESP32-BiomechAI", 342)
            .unwrap();
        assert_eq!(
            head.as_str(),
            "POST /api/esp32-data HTTP/1.0\r\n\
             Host: 10.209.11.147:3000\r\n\
             Content-Type: application/json\r\n\
             User-Agent: ESP32-BiomechAI\r\n\
             Content-Length: 342\r\n\
             Connection: close\r\n\r\n"
        );
    }

    #[test]
    fn oversized_head_inputs_are_rejected() {
        let long_path = core::str::from_utf8(&[b'a'; 300]).unwrap();
        assert_eq!(
            request_head(long_path, [0, 0, 0, 0], 80, "x", 0),
            Err(HeadOverflow)
        );
    }

    #[test]
    fn parses_ok_and_error_status_lines() {
        assert_eq!(status_code(b"HTTP/1.0 200 OK\r\n\r\nOK"), Some(200));
        assert_eq!(status_code(b"HTTP/1.1 404 Not Found\r\n"), Some(404));
        assert_eq!(status_code(b"HTTP/1.1 500\r\n"), Some(500));
    }

    #[test]
    fn rejects_non_http_preambles() {
        assert_eq!(status_code(b""), None);
        assert_eq!(status_code(b"SSH-2.0-OpenSSH\r\n"), None);
        assert_eq!(status_code(b"HTTP/1.1 abc\r\n"), None);
        assert_eq!(status_code(&[0xFF, 0xFE, 0x0D, 0x0A]), None);
    }

    #[test]
    fn splits_the_body_at_the_blank_line() {
        let raw = b"HTTP/1.0 200 OK\r\nContent-Length: 2\r\n\r\nOK";
        let (head, body) = split_body(raw).unwrap();
        assert!(head.starts_with(b"HTTP/1.0 200"));
        assert_eq!(body, b"OK");

        assert_eq!(split_body(b"HTTP/1.0 200 OK\r\n"), None);
    }

    #[test]
    fn only_200_is_accepted() {
        assert_eq!(classify(200), SendOutcome::Accepted);
        assert_eq!(classify(201), SendOutcome::Rejected(201));
        assert_eq!(classify(404), SendOutcome::Rejected(404));
        assert_eq!(classify(500), SendOutcome::Rejected(500));
    }
}
