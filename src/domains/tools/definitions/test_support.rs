//! Throwaway local HTTP responder standing in for upstream APIs in tests.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::core::config::UpstreamConfig;

/// A local server that answers every request with the same canned response.
pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Start a responder on an ephemeral port.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.into();

        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf);
                if let Some(target) = head.split_whitespace().nth(1) {
                    seen.lock().unwrap().push(target.to_string());
                }

                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// Upstream config pointing both endpoints at this responder.
    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            geocoding_url: format!("{}/v1/search", self.base_url),
            forecast_url: format!("{}/v1/forecast", self.base_url),
            api_key: None,
            timeout_secs: 5,
        }
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Upstream config whose endpoints refuse connections.
pub fn unreachable_upstream() -> UpstreamConfig {
    UpstreamConfig {
        geocoding_url: "http://127.0.0.1:1/v1/search".to_string(),
        forecast_url: "http://127.0.0.1:1/v1/forecast".to_string(),
        api_key: None,
        timeout_secs: 2,
    }
}
