//! In-memory feedback store.
//!
//! Keeps the last value written to each path plus the full write history.
//! Can be switched into a failing mode to exercise the tee logger's
//! failure path.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use teelog_core::{FeedbackError, FeedbackPath, FeedbackSink};

#[derive(Debug, Default)]
struct State {
    latest: BTreeMap<String, String>,
    history: Vec<(String, String)>,
}

/// Thread-safe map of feedback path → last value.
#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    state: Mutex<State>,
    failing: AtomicBool,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `put` is recorded in the history but rejected.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.lock().latest.get(path).cloned()
    }

    /// Every attempted write, in order.
    pub fn history(&self) -> Vec<(String, String)> {
        self.lock().history.clone()
    }

    /// Stored entries whose path starts with `prefix`.
    pub fn entries_under(&self, prefix: &str) -> Vec<(String, String)> {
        self.lock()
            .latest
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().latest.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FeedbackSink for MemoryFeedbackStore {
    fn put(&self, path: &FeedbackPath, value: &str) -> Result<(), FeedbackError> {
        let mut state = self.lock();
        state
            .history
            .push((path.to_string(), value.to_string()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(FeedbackError::Rejected {
                path: path.to_string(),
                reason: "store is in failing mode".to_string(),
            });
        }

        state.latest.insert(path.to_string(), value.to_string());
        Ok(())
    }
}
