//! teelog-sinks: concrete sinks for the tee logger.
//!
//! - [`TracingSink`]: the local base sink, emitting `tracing` events.
//! - [`MemoryFeedbackStore`]: in-process feedback store, mostly for tests.
//! - [`DirFeedbackStore`]: feedback store laid out as files under a
//!   directory, one per feedback path.

pub mod dir;
pub mod memory;
pub mod tracing_sink;

pub use dir::{DirFeedbackStore, StoredFeedback};
pub use memory::MemoryFeedbackStore;
pub use tracing_sink::{KeyValues, TracingSink};
