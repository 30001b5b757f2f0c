//! Response header tracking for a GET, fed one raw header line at a time.
//!
//! libcurl reports the headers of every response in a redirect chain, so a new
//! status line resets what was collected for the previous hop.

/// Parsed status line: `HTTP/1.1 404 Not Found` → (404, "Not Found").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u32,
    pub reason: String,
}

/// Parses an HTTP status line. Returns None for anything that is not one.
pub fn parse_status_line(line: &str) -> Option<StatusLine> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some(StatusLine { code, reason })
}

/// Headers of the last response seen so far.
#[derive(Debug, Default, Clone)]
pub struct ResponseHeaders {
    pub status: Option<StatusLine>,
    pub content_length: Option<u64>,
}

impl ResponseHeaders {
    /// Feed one header line (as delivered by curl, CRLF included or not).
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if let Some(status) = parse_status_line(line) {
            *self = ResponseHeaders {
                status: Some(status),
                content_length: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    /// Reason phrase of the final status line (empty if none, e.g. HTTP/2).
    pub fn reason(&self) -> &str {
        self.status.as_ref().map(|s| s.reason.as_str()).unwrap_or("")
    }
}
