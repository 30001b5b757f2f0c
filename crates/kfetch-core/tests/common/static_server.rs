//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of paths. Each route has a status and body and can
//! omit `Content-Length` (the body then ends when the connection closes).
//! Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub reason: &'static str,
    pub body: Vec<u8>,
    /// If false, no `Content-Length` header is sent.
    pub content_length: bool,
}

impl Route {
    pub fn ok(body: Vec<u8>) -> Self {
        Route {
            status: 200,
            reason: "OK",
            body,
            content_length: true,
        }
    }

    pub fn ok_without_length(body: Vec<u8>) -> Self {
        Route {
            content_length: false,
            ..Route::ok(body)
        }
    }

    pub fn not_found() -> Self {
        Route {
            status: 404,
            reason: "Not Found",
            body: b"no such file".to_vec(),
            content_length: true,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    // Read the whole request head so closing the socket does not reset it.
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => return,
        }
    }
    let request = match std::str::from_utf8(&buf) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    let route = routes.get(path).cloned().unwrap_or_else(Route::not_found);
    let length_header = if route.content_length {
        format!("Content-Length: {}\r\n", route.body.len())
    } else {
        String::new()
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\n{}Connection: close\r\n\r\n",
        route.status, route.reason, length_header
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
