//! Catch-all responders, one per server mode.
//!
//! Each responder answers every method and path. Resolution that can fail
//! (host name lookup, absolute root path) happens once, at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::config::{ModeConfig, ModeKind};

/// Startup failures while preparing a responder.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to get hostname: {0}")]
    Hostname(#[source] std::io::Error),

    #[error("failed to get absolute path: {0}")]
    AbsolutePath(#[source] std::io::Error),
}

impl StartupError {
    /// Log message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            StartupError::Hostname(_) => "failed to get hostname",
            StartupError::AbsolutePath(_) => "failed to get absolute path",
        }
    }
}

/// A resolved responder, ready to be turned into a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Responder {
    Hello { text: Arc<str> },
    Hostname { name: Arc<str> },
    FileServer { root_dir: PathBuf },
}

impl Responder {
    /// Resolve the configured mode.
    pub fn from_config(config: &ModeConfig) -> Result<Self, StartupError> {
        match config.kind {
            ModeKind::Hello => Ok(Responder::Hello {
                text: Arc::from(config.text.as_str()),
            }),
            ModeKind::Hostname => {
                let name = lookup_hostname()?;
                Ok(Responder::Hostname {
                    name: Arc::from(name.as_str()),
                })
            }
            ModeKind::FileServer => Ok(Responder::FileServer {
                root_dir: absolute_root(&config.root_dir)?,
            }),
        }
    }

    /// Log which mode is active, with its resolved parameter.
    pub fn announce(&self) {
        match self {
            Responder::Hello { text } => {
                tracing::info!(text = crate::observability::non_empty(text), "run as hello server")
            }
            Responder::Hostname { name } => {
                tracing::info!(hostname = crate::observability::non_empty(name), "run as hostname server")
            }
            Responder::FileServer { root_dir } => {
                tracing::info!(root_dir = %root_dir.display(), "run as file server")
            }
        }
    }

    pub fn into_router(self) -> Router {
        match self {
            Responder::Hello { text } | Responder::Hostname { name: text } => {
                Router::new().fallback(move || {
                    let body = text.to_string();
                    async move { body }
                })
            }
            Responder::FileServer { root_dir } => {
                Router::new().fallback_service(ServeDir::new(root_dir))
            }
        }
    }
}

/// The machine's host name.
pub fn lookup_hostname() -> Result<String, StartupError> {
    let name = nix::unistd::gethostname()
        .map_err(|errno| StartupError::Hostname(std::io::Error::from(errno)))?;
    name.into_string().map_err(|raw| {
        StartupError::Hostname(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("host name is not valid UTF-8: {:?}", raw),
        ))
    })
}

fn absolute_root(dir: &Path) -> Result<PathBuf, StartupError> {
    std::path::absolute(dir).map_err(StartupError::AbsolutePath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    async fn body_text(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = router.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn hello_answers_every_path_and_method() {
        let responder = Responder::Hello { text: Arc::from("hi there") };

        let (status, body) = body_text(responder.clone().into_router(), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hi there");

        let (status, body) = body_text(responder.into_router(), Method::POST, "/a/b?c=d").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hi there");
    }

    #[test]
    fn hello_mode_uses_configured_text() {
        let config = ModeConfig {
            kind: ModeKind::Hello,
            text: "pong".into(),
            ..ModeConfig::default()
        };
        assert_eq!(
            Responder::from_config(&config).unwrap(),
            Responder::Hello { text: Arc::from("pong") }
        );
    }

    #[tokio::test]
    async fn hostname_mode_serves_host_name() {
        let config = ModeConfig {
            kind: ModeKind::Hostname,
            ..ModeConfig::default()
        };
        let expected = lookup_hostname().unwrap();
        let router = Responder::from_config(&config).unwrap().into_router();

        let (status, body) = body_text(router, Method::GET, "/anything").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[test]
    fn file_server_root_is_made_absolute() {
        let config = ModeConfig::default();
        match Responder::from_config(&config).unwrap() {
            Responder::FileServer { root_dir } => {
                assert!(root_dir.is_absolute());
                assert_eq!(root_dir, std::env::current_dir().unwrap());
            }
            other => panic!("unexpected responder: {:?}", other),
        }
    }

    #[tokio::test]
    async fn file_server_serves_files_and_404s() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "payload").unwrap();
        let responder = Responder::FileServer { root_dir: dir.path().to_path_buf() };

        let (status, body) = body_text(responder.clone().into_router(), Method::GET, "/notes.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "payload");

        let (status, _) = body_text(responder.into_router(), Method::GET, "/missing.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
