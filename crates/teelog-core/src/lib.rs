//! teelog-core: the tee logger and its field merging.
//!
//! A supervised keeper logs through a [`TeeLogger`]. Every call reaches the
//! local [`BaseSink`]; error-class calls are also flattened by the merger and
//! stored in a remote [`FeedbackSink`] under a deterministic path, where the
//! controller picks them up.
//!
//! # Architecture
//!
//! ```text
//! caller ──► TeeLogger ──► merge ──► build_path ──► FeedbackSink::put
//!                │
//!                └──────────────────────────────► BaseSink (every level)
//! ```
//!
//! Everything here is synchronous and runs on the caller's thread.

pub mod config;
pub mod error;
pub mod field;
pub mod merge;
pub mod path;
pub mod sink;
pub mod tee;
pub mod types;

pub use error::{ConfigError, FeedbackError};
pub use field::Field;
pub use merge::{merge, merge_fields, InvalidPair, MergeResult};
pub use path::{build_path, FeedbackContext, FeedbackPath};
pub use sink::{BaseSink, FeedbackSink, RecordingSink};
pub use tee::TeeLogger;
pub use types::{FeedbackClass, Severity};
