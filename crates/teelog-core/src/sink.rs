//! Sink traits consumed by the tee logger.
//!
//! [`BaseSink`] is the local structured log backend: best-effort, never fails
//! the caller. [`FeedbackSink`] is the remote feedback store, reduced to a
//! single `put(path, value)`.
//!
//! [`RecordingSink`] is an in-memory [`BaseSink`] that captures every call,
//! used by tests here and downstream.

use crate::error::FeedbackError;
use crate::field::Field;
use crate::path::FeedbackPath;
use crate::types::Severity;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Local leveled log backend.
pub trait BaseSink: Send + Sync {
    /// Unstructured warning built from the rendered arguments.
    fn warn(&self, args: &[Field]);
    fn warnw(&self, msg: &str, kv: &[Field]);
    fn infow(&self, msg: &str, kv: &[Field]);
    fn debugw(&self, msg: &str, kv: &[Field]);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn debugf(&self, args: fmt::Arguments<'_>);
    fn errorw(&self, msg: &str, kv: &[Field]);
}

/// Remote feedback store.
pub trait FeedbackSink: Send + Sync {
    fn put(&self, path: &FeedbackPath, value: &str) -> Result<(), FeedbackError>;
}

impl<S: BaseSink + ?Sized> BaseSink for Arc<S> {
    fn warn(&self, args: &[Field]) {
        (**self).warn(args)
    }

    fn warnw(&self, msg: &str, kv: &[Field]) {
        (**self).warnw(msg, kv)
    }

    fn infow(&self, msg: &str, kv: &[Field]) {
        (**self).infow(msg, kv)
    }

    fn debugw(&self, msg: &str, kv: &[Field]) {
        (**self).debugw(msg, kv)
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        (**self).infof(args)
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        (**self).debugf(args)
    }

    fn errorw(&self, msg: &str, kv: &[Field]) {
        (**self).errorw(msg, kv)
    }
}

impl<S: FeedbackSink + ?Sized> FeedbackSink for Arc<S> {
    fn put(&self, path: &FeedbackPath, value: &str) -> Result<(), FeedbackError> {
        (**self).put(path, value)
    }
}

/// Join rendered arguments with single spaces.
pub fn render_args(args: &[Field]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Which [`BaseSink`] method produced a [`RecordedCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Warn,
    Warnw,
    Infow,
    Debugw,
    Infof,
    Debugf,
    Errorw,
}

impl CallKind {
    pub fn severity(self) -> Severity {
        match self {
            CallKind::Warn | CallKind::Warnw => Severity::Warn,
            CallKind::Infow | CallKind::Infof => Severity::Info,
            CallKind::Debugw | CallKind::Debugf => Severity::Debug,
            CallKind::Errorw => Severity::Error,
        }
    }
}

/// One captured [`BaseSink`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: CallKind,
    /// Message, formatted template, or rendered `warn` arguments.
    pub message: String,
    /// Key/value list as passed, or the raw `warn` arguments.
    pub fields: Vec<Field>,
}

/// In-memory [`BaseSink`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    pub fn calls_of(&self, kind: CallKind) -> Vec<RecordedCall> {
        self.lock()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    /// Number of calls at `severity` across all call kinds.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|c| c.kind.severity() == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, kind: CallKind, message: String, fields: &[Field]) {
        self.lock().push(RecordedCall {
            kind,
            message,
            fields: fields.to_vec(),
        });
    }
}

impl BaseSink for RecordingSink {
    fn warn(&self, args: &[Field]) {
        self.record(CallKind::Warn, render_args(args), args);
    }

    fn warnw(&self, msg: &str, kv: &[Field]) {
        self.record(CallKind::Warnw, msg.to_string(), kv);
    }

    fn infow(&self, msg: &str, kv: &[Field]) {
        self.record(CallKind::Infow, msg.to_string(), kv);
    }

    fn debugw(&self, msg: &str, kv: &[Field]) {
        self.record(CallKind::Debugw, msg.to_string(), kv);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.record(CallKind::Infof, args.to_string(), &[]);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.record(CallKind::Debugf, args.to_string(), &[]);
    }

    fn errorw(&self, msg: &str, kv: &[Field]) {
        self.record(CallKind::Errorw, msg.to_string(), kv);
    }
}
