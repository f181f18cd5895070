//! The tee logger facade.
//!
//! [`TeeLogger`] forwards every leveled call to its [`BaseSink`]. Error-class
//! calls are additionally mirrored to the remote [`FeedbackSink`] as a single
//! merged string, so a controller that cannot see the local log still learns
//! about them:
//!
//! ```text
//! errorw(msg, kv) ──► merge(kv) ──► put(remoteLogs/…/error, "msg: text")
//!        │
//!        └──────────────────────► base.errorw(msg, kv)   (always, unmodified)
//! ```
//!
//! The logger holds only its immutable identity and the two sink handles, so
//! it can be shared across threads as long as the sinks can.

use crate::field::Field;
use crate::merge::merge;
use crate::path::{build_path, FeedbackContext};
use crate::sink::{BaseSink, FeedbackSink};
use crate::types::{FeedbackClass, Severity};
use std::fmt;

/// Leveled logger that tees error-class calls to a remote feedback store.
#[derive(Debug)]
pub struct TeeLogger<B, F> {
    ctx: FeedbackContext,
    base: B,
    feedback: F,
}

impl<B: BaseSink, F: FeedbackSink> TeeLogger<B, F> {
    pub fn new(ctx: FeedbackContext, base: B, feedback: F) -> Self {
        Self {
            ctx,
            base,
            feedback,
        }
    }

    pub fn context(&self) -> &FeedbackContext {
        &self.ctx
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn warn(&self, args: &[Field]) {
        self.base.warn(args);
    }

    pub fn warnw(&self, msg: &str, kv: &[Field]) {
        self.base.warnw(msg, kv);
    }

    pub fn infow(&self, msg: &str, kv: &[Field]) {
        self.base.infow(msg, kv);
    }

    pub fn debugw(&self, msg: &str, kv: &[Field]) {
        self.base.debugw(msg, kv);
    }

    /// `logger.infof(format_args!("replica {} caught up", name))`
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.base.infof(args);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.base.debugf(args);
    }

    /// Report an error both remotely (class `error`) and locally.
    pub fn errorw(&self, msg: &str, kv: &[Field]) {
        self.tee(FeedbackClass::Error, msg, kv);
    }

    /// Report an error the remote recovery process must treat as fatal.
    ///
    /// Locally this is an ordinary error-level entry; the calling process keeps
    /// running.
    pub fn fatal_errorw(&self, msg: &str, kv: &[Field]) {
        self.tee(FeedbackClass::Fatal, msg, kv);
    }

    /// Dispatch a structured call by severity.
    pub fn log(&self, severity: Severity, msg: &str, kv: &[Field]) {
        match severity {
            Severity::Debug => self.debugw(msg, kv),
            Severity::Info => self.infow(msg, kv),
            Severity::Warn => self.warnw(msg, kv),
            Severity::Error => self.errorw(msg, kv),
            Severity::FatalError => self.fatal_errorw(msg, kv),
        }
    }

    fn tee(&self, class: FeedbackClass, msg: &str, kv: &[Field]) {
        let merged = merge(kv, &self.base);
        let path = build_path(&self.ctx, class);
        let value = feedback_message(msg, &merged.text);

        // The store owns retries; a failed put must not cost us the local entry.
        if let Err(err) = self.feedback.put(&path, &value) {
            tracing::debug!(path = %path, error = %err, "feedback write failed");
        }

        self.base.errorw(msg, kv);
    }
}

/// Value stored remotely for a message and its merged fields.
pub fn feedback_message(msg: &str, merged: &str) -> String {
    format!("{msg}: {merged}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedbackError;
    use crate::fields;
    use crate::path::FeedbackPath;
    use crate::sink::{CallKind, RecordingSink};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Puts {
        entries: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl FeedbackSink for Puts {
        fn put(&self, path: &FeedbackPath, value: &str) -> Result<(), FeedbackError> {
            self.entries
                .lock()
                .unwrap()
                .push((path.to_string(), value.to_string()));
            if self.fail {
                return Err(FeedbackError::Rejected {
                    path: path.to_string(),
                    reason: "store unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    type Logger = TeeLogger<Arc<RecordingSink>, Arc<Puts>>;

    fn logger(fail: bool) -> (Logger, Arc<RecordingSink>, Arc<Puts>) {
        let base = Arc::new(RecordingSink::new());
        let puts = Arc::new(Puts {
            fail,
            ..Puts::default()
        });
        let ctx = FeedbackContext::new("h1", "c1", "u1");
        (TeeLogger::new(ctx, base.clone(), puts.clone()), base, puts)
    }

    #[test]
    fn errorw_tees_to_feedback_and_base() {
        let (log, base, puts) = logger(false);
        log.errorw("disk full", &fields!["path", "/data"]);

        assert_eq!(
            *puts.entries.lock().unwrap(),
            vec![(
                "remoteLogs/h1/c1/u1/error".to_string(),
                "disk full: path: /data".to_string()
            )]
        );
        let errors = base.calls_of(CallKind::Errorw);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "disk full");
        assert_eq!(errors[0].fields, fields!["path", "/data"]);
    }

    #[test]
    fn fatal_errorw_differs_only_in_class() {
        let (log, base, puts) = logger(false);
        log.fatal_errorw("disk full", &fields!["path", "/data"]);

        let entries = puts.entries.lock().unwrap();
        assert_eq!(entries[0].0, "remoteLogs/h1/c1/u1/fatal");
        assert_eq!(entries[0].1, "disk full: path: /data");
        assert_eq!(base.calls_of(CallKind::Errorw).len(), 1);
    }

    #[test]
    fn failed_put_still_reaches_base() {
        let (log, base, puts) = logger(true);
        log.errorw("replication lag", &fields!["lag_bytes", 4096]);

        assert_eq!(puts.entries.lock().unwrap().len(), 1);
        assert_eq!(base.calls_of(CallKind::Errorw).len(), 1);
    }

    #[test]
    fn lower_levels_never_touch_feedback() {
        let (log, base, puts) = logger(false);
        log.warn(&fields!["low", "space"]);
        log.warnw("slow fsync", &fields!["ms", 900]);
        log.infow("started", &[]);
        log.debugw("tick", &[]);
        log.infof(format_args!("replica {} ready", "r1"));
        log.debugf(format_args!("{} pending", 0));

        assert!(puts.entries.lock().unwrap().is_empty());
        assert_eq!(base.len(), 6);
        assert_eq!(base.calls()[4].message, "replica r1 ready");
    }

    #[test]
    fn log_dispatches_by_severity() {
        let (log, base, puts) = logger(false);
        log.log(Severity::Info, "up", &[]);
        log.log(Severity::FatalError, "abort recovery", &[]);

        assert_eq!(base.calls_of(CallKind::Infow).len(), 1);
        assert_eq!(
            puts.entries.lock().unwrap()[0],
            ("remoteLogs/h1/c1/u1/fatal".to_string(), "abort recovery: ".to_string())
        );
    }
}
