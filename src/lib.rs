//! teelog: tee logger for supervised keepers.
//!
//! Local structured logs go to `tracing`; error-class entries are also
//! published as feedback entries the controller can read. This crate wires
//! the pieces together for the `teelog` binary and re-exports them so
//! integration tests can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Config ──► FeedbackContext ─┐
//!                             ├──► TeeLogger ──► TracingSink  (every level)
//! DirFeedbackStore ───────────┘         └──────► DirFeedbackStore (error / fatal)
//! ```

pub use teelog_core::config::{Config, LoggingConfig};
pub use teelog_core::*;
pub use teelog_sinks::{DirFeedbackStore, MemoryFeedbackStore, StoredFeedback, TracingSink};

use serde_json::Value;

/// Tee logger as wired by the binary.
pub type Logger = TeeLogger<TracingSink, DirFeedbackStore>;

/// Build the binary's logger from validated configuration.
pub fn logger_from_config(cfg: &Config) -> Result<Logger, ConfigError> {
    let ctx = cfg.feedback_context()?;
    Ok(TeeLogger::new(
        ctx,
        TracingSink::new(),
        DirFeedbackStore::new(cfg.feedback.store_dir.clone()),
    ))
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// configured filter.
pub fn init_logging(cfg: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_ansi(cfg.ansi)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.filter)),
        )
        .init();
}

/// Turn command-line `key=value` words into loose fields.
///
/// Values that parse as JSON scalars (`3`, `true`, `1.5`) keep their type;
/// anything else is a string. A word without `=` becomes a single loose value
/// and is paired like any other.
pub fn parse_cli_fields<S: AsRef<str>>(words: &[S]) -> Vec<Field> {
    let mut out = Vec::with_capacity(words.len() * 2);
    for word in words {
        let word = word.as_ref();
        match word.split_once('=') {
            Some((key, value)) => {
                out.push(Field::from(key));
                out.push(Field::Loose(parse_scalar(value)));
            }
            None => out.push(Field::Loose(parse_scalar(word))),
        }
    }
    out
}

fn parse_scalar(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(text.to_string()),
    }
}
