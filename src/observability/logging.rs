//! Structured logging.
//!
//! # Responsibilities
//! - Build the JSON subscriber once at startup
//! - Install it process-wide and hand out the `Dispatch` for injection
//! - Apply the drop-empty-string rule to string attributes
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - One JSON object per line; event fields flattened to the top level
//! - Log level configurable via config and `RUST_LOG`

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("global subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// Build a JSON logging dispatcher writing to `writer`.
///
/// `RUST_LOG` wins over `level` when it is set and parses.
pub fn build_dispatch<W>(level: &str, writer: W) -> Result<Dispatch, LoggingError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_target(false)
            .with_writer(writer),
    );

    Ok(Dispatch::new(subscriber))
}

/// Install the stdout logger for the lifetime of the process.
pub fn init(level: &str) -> Result<Dispatch, LoggingError> {
    let dispatch = build_dispatch(level, std::io::stdout)?;
    tracing::dispatcher::set_global_default(dispatch.clone())?;
    Ok(dispatch)
}

/// Drop-empty rule: an empty string is recorded as an absent field.
///
/// `Option<T>` fields are skipped by the formatter when `None`.
pub fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
