//! Error types for teelog-core.

/// Failure to store a feedback entry.
///
/// Returned by [`FeedbackSink::put`](crate::sink::FeedbackSink::put). The tee
/// logger never surfaces it to its callers.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback store i/o error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("feedback store rejected {path}: {reason}")]
    Rejected { path: String, reason: String },
}

/// Failure to load or validate configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("feedback.{field} must be a non-empty path segment without '/', got {value:?}")]
    InvalidSegment { field: &'static str, value: String },
}
