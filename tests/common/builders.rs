//! Test builders: ergonomic constructors for feedback contexts and wired-up
//! tee loggers.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::sync::Arc;
use teelog::{FeedbackContext, MemoryFeedbackStore, RecordingSink, TeeLogger};

// ---------------------------------------------------------------------------
// FeedbackContext
// ---------------------------------------------------------------------------

/// The `h1/c1/u1` identity used throughout the scenarios.
pub fn ctx() -> FeedbackContext {
    FeedbackContext::new("h1", "c1", "u1")
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub type TestLogger = TeeLogger<Arc<RecordingSink>, Arc<MemoryFeedbackStore>>;

/// A tee logger plus handles on both of its sinks.
///
/// ```rust
/// let h = Harness::new();
/// h.logger.errorw("disk full", &fields!["path", "/data"]);
/// assert_eq!(h.store.history().len(), 1);
/// ```
pub struct Harness {
    pub logger: TestLogger,
    pub base: Arc<RecordingSink>,
    pub store: Arc<MemoryFeedbackStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_context(ctx())
    }

    pub fn with_context(ctx: FeedbackContext) -> Self {
        let base = Arc::new(RecordingSink::new());
        let store = Arc::new(MemoryFeedbackStore::new());
        Self {
            logger: TeeLogger::new(ctx, base.clone(), store.clone()),
            base,
            store,
        }
    }

    /// Harness whose feedback store rejects every write.
    pub fn failing() -> Self {
        let h = Self::new();
        h.store.set_failing(true);
        h
    }
}
