//! Domain-specific assertion macros for teelog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* sink saw (or missed) a call.

// ---------------------------------------------------------------------------
// Feedback store assertions
// ---------------------------------------------------------------------------

/// Assert that the feedback store holds `value` at `path`.
///
/// ```rust
/// assert_feedback!(h.store, "remoteLogs/h1/c1/u1/error", "disk full: path: /data");
/// ```
#[macro_export]
macro_rules! assert_feedback {
    ($store:expr, $path:expr, $value:expr) => {{
        let store: &teelog::MemoryFeedbackStore = &$store;
        let path: &str = $path;
        let expected: &str = $value;
        match store.get(path) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual, expected,
                "assert_feedback! failed at {:?}", path
            ),
            None => panic!(
                "assert_feedback! failed: nothing stored at {:?}.\n  history: {:?}",
                path,
                store.history()
            ),
        }
    }};
}

/// Assert that no feedback write was attempted.
#[macro_export]
macro_rules! assert_no_feedback {
    ($store:expr) => {{
        let store: &teelog::MemoryFeedbackStore = &$store;
        let history = store.history();
        if !history.is_empty() {
            panic!(
                "assert_no_feedback! failed: {} write(s) attempted.\n  history: {:?}",
                history.len(),
                history
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Base sink assertions
// ---------------------------------------------------------------------------

/// Assert that the base sink received exactly one call of `kind` with the
/// given message and fields.
///
/// ```rust
/// assert_base_call!(h.base, CallKind::Errorw, "disk full", fields!["path", "/data"]);
/// ```
#[macro_export]
macro_rules! assert_base_call {
    ($base:expr, $kind:expr, $msg:expr, $fields:expr) => {{
        let base: &teelog::RecordingSink = &$base;
        let calls = base.calls_of($kind);
        match calls.as_slice() {
            [call] => {
                pretty_assertions::assert_eq!(call.message, $msg);
                pretty_assertions::assert_eq!(call.fields, $fields);
            }
            other => panic!(
                "assert_base_call! failed: expected one {:?} call, got {}.\n  all calls: {:?}",
                $kind,
                other.len(),
                base.calls()
            ),
        }
    }};
}

/// Assert the number of warning-level calls the base sink received.
#[macro_export]
macro_rules! assert_warnings {
    ($base:expr, $n:expr) => {{
        let base: &teelog::RecordingSink = &$base;
        let n = base.count(teelog::Severity::Warn);
        if n != $n {
            panic!(
                "assert_warnings! failed:\n  expected: {}\n  actual:   {}\n  calls: {:?}",
                $n,
                n,
                base.calls()
            );
        }
    }};
}
