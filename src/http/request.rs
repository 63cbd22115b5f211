//! Request correlation.
//!
//! # Responsibilities
//! - Resolve the correlation ID from `X-Request-Id` or generate a UUID v4
//! - Write a generated ID back into the request headers
//! - Expose the ID as a typed request extension for inner handlers
//!
//! # Design Decisions
//! - A caller-supplied, non-empty ID is adopted verbatim and never rewritten
//! - Resolution happens once, before any inner handler runs
//! - The ID is not echoed on the response

use axum::http::{HeaderName, HeaderValue, Request};
use uuid::Uuid;

/// Header carrying the correlation ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation ID of the request being served.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access the resolved request ID from a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Resolve the correlation ID for `request`, mutating it so inner handlers
/// observe the same value through the header and the extension.
pub fn resolve_request_id<B>(request: &mut Request<B>) -> RequestId {
    let supplied = request
        .headers()
        .get(&X_REQUEST_ID)
        .filter(|v| !v.is_empty())
        .map(|v| RequestId(header_text(v)));

    let id = match supplied {
        Some(id) => id,
        None => {
            let id = RequestId::generate();
            // UUIDs are plain ASCII, always a valid header value.
            if let Ok(value) = HeaderValue::from_str(id.as_str()) {
                request.headers_mut().insert(X_REQUEST_ID.clone(), value);
            }
            id
        }
    };

    request.extensions_mut().insert(id.clone());
    id
}

/// Header bytes as text. Non-UTF-8 bytes become U+FFFD; the header itself is
/// left as received.
pub(crate) fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn adopts_supplied_id_verbatim() {
        let mut req = Request::builder()
            .header("X-Request-Id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let id = resolve_request_id(&mut req);
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(req.headers()["x-request-id"], "abc-123");
        assert_eq!(req.request_id(), Some(&id));
    }

    #[test]
    fn generates_and_injects_missing_id() {
        let mut req = Request::builder().body(Body::empty()).unwrap();

        let id = resolve_request_id(&mut req);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(req.headers()[&X_REQUEST_ID], id.as_str());
        assert_eq!(req.request_id(), Some(&id));
    }

    #[test]
    fn empty_header_is_treated_as_missing() {
        let mut req = Request::builder()
            .header("X-Request-Id", "")
            .body(Body::empty())
            .unwrap();

        let id = resolve_request_id(&mut req);
        assert!(!id.as_str().is_empty());
        assert_eq!(req.headers()[&X_REQUEST_ID], id.as_str());
    }

    #[test]
    fn utf8_header_is_adopted_verbatim() {
        let mut req = Request::builder()
            .header("X-Request-Id", HeaderValue::from_bytes("req-é".as_bytes()).unwrap())
            .body(Body::empty())
            .unwrap();

        let id = resolve_request_id(&mut req);
        assert_eq!(id.as_str(), "req-é");
        assert_eq!(req.headers()[&X_REQUEST_ID].as_bytes(), "req-é".as_bytes());
    }

    #[test]
    fn invalid_utf8_header_is_kept_unchanged() {
        let mut req = Request::builder()
            .header("X-Request-Id", HeaderValue::from_bytes(b"\xffid").unwrap())
            .body(Body::empty())
            .unwrap();

        let id = resolve_request_id(&mut req);
        assert_eq!(id.as_str(), "\u{FFFD}id");
        assert_eq!(req.headers()[&X_REQUEST_ID].as_bytes(), b"\xffid");
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
