//! Per-request access logging.
//!
//! # Responsibilities
//! - Resolve the correlation ID before the inner service runs
//! - Time the inner service with a monotonic clock
//! - Emit exactly one `request` record once the inner service returns
//!
//! # Design Decisions
//! - The logger is injected as a `tracing::Dispatch`, never looked up globally
//! - The record is written after the response is produced, not after it is
//!   flushed to the socket
//! - Logging is synchronous and best-effort; it never fails the request

use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{header, HeaderMap, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use tracing::Dispatch;

use crate::http::request::{header_text, resolve_request_id};
use crate::http::response::StatusCapture;
use crate::observability::non_empty;

/// Layer wrapping a responder with access logging.
#[derive(Clone)]
pub struct AccessLogLayer {
    dispatch: Dispatch,
}

impl AccessLogLayer {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLog {
            inner,
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Service produced by [`AccessLogLayer`].
#[derive(Clone)]
pub struct AccessLog<S> {
    inner: S,
    dispatch: Dispatch,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AccessLog<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        // The clone may not be ready; swap so the polled instance serves this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let dispatch = self.dispatch.clone();

        Box::pin(async move {
            let request_id = resolve_request_id(&mut request);
            let entry = RequestLine::from_request(&request);
            let mut capture = StatusCapture::new();

            let start = Instant::now();
            let result = inner.call(request).await.map(|r| capture.observe(r));
            let duration_ms = start.elapsed().as_millis() as u64;

            tracing::dispatcher::with_default(&dispatch, || {
                tracing::info!(
                    request_id = request_id.as_str(),
                    duration_ms,
                    method = entry.method.as_str(),
                    path = entry.path.as_str(),
                    query = non_empty(&entry.query),
                    status_code = capture.status().as_u16(),
                    referer = non_empty(&entry.referer),
                    user_agent = non_empty(&entry.user_agent),
                    "request"
                );
            });

            result
        })
    }
}

/// Request attributes copied out before the request moves into the inner
/// service.
struct RequestLine {
    method: String,
    path: String,
    query: String,
    referer: String,
    user_agent: String,
}

impl RequestLine {
    fn from_request<B>(request: &Request<B>) -> Self {
        let headers = request.headers();
        Self {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().unwrap_or_default().to_string(),
            referer: header_str(headers, &header::REFERER),
            user_agent: header_str(headers, &header::USER_AGENT),
        }
    }
}

fn header_str(headers: &HeaderMap, name: &header::HeaderName) -> String {
    headers.get(name).map(header_text).unwrap_or_default()
}
