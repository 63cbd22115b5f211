//! Response status capture.
//!
//! Observes the status of the response produced by the inner service
//! without touching its headers or body. One capture per request.

use axum::http::{Response, StatusCode};

/// Last status written for the current request. Defaults to 200 until the
/// inner service yields a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCapture {
    status: StatusCode,
}

impl Default for StatusCapture {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
        }
    }
}

impl StatusCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status; the last write wins.
    pub fn record(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Record the status of `response` and pass it through unchanged.
    pub fn observe<B>(&mut self, response: Response<B>) -> Response<B> {
        self.record(response.status());
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}
