//! Shared utilities for integration tests.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tracing::Dispatch;

/// In-memory sink for JSON log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl LogBuffer {
    /// A JSON logger writing into this buffer.
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch_at("info")
    }

    /// A JSON logger at `level` writing into this buffer.
    pub fn dispatch_at(&self, level: &str) -> Dispatch {
        let writer = self.clone();
        testhttpserver::observability::build_dispatch(level, move || writer.clone()).unwrap()
    }

    pub fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    /// Records whose message is `message`.
    pub fn with_message(&self, message: &str) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|r| r["message"] == message)
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records()
            .iter()
            .filter_map(|r| r["message"].as_str().map(String::from))
            .collect()
    }
}

/// Send `request` through `router` without a socket.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let res = router.oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Wait until something accepts connections on `addr`.
#[allow(dead_code)]
pub async fn wait_until_listening(addr: SocketAddr) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("nothing listening on {}", addr);
}
