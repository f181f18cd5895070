//! Field merging. Flattens a leveled call's argument list into one
//! human-readable string for the remote feedback store.
//!
//! # Algorithm
//!
//! A single left-to-right scan over the arguments:
//!
//! 1. A typed field is consumed alone and renders as `key: value`, or as
//!    `value` when its key is `"error"`.
//! 2. A loose value in the last position has no partner. It is dropped and the
//!    scan stops; [`MergeResult::report`] emits one warning for it.
//! 3. Otherwise the loose value and its neighbour form a pair. A string key
//!    renders as `key: value`; any other key is recorded as an
//!    [`InvalidPair`] and contributes no text.
//!
//! Segments are joined with `", "`. Invalid pairs are reported as a single
//! batched warning no matter how many were found.
//!
//! [`merge_fields`] is pure. [`merge`] additionally reports the diagnostics
//! through a [`BaseSink`].

use crate::field::Field;
use crate::sink::BaseSink;
use serde::Serialize;
use serde_json::Value;

pub const SEGMENT_SEPARATOR: &str = ", ";

pub const DANGLING_KEY_MESSAGE: &str = "Ignored key without a value.";
pub const INVALID_PAIRS_MESSAGE: &str = "Ignored key-value pairs with non-string keys.";

/// A loose pair whose key is not a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidPair {
    /// Index of the key in the original argument list.
    pub position: usize,
    pub key: Value,
    pub value: Value,
}

/// Output of a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    pub text: String,
    pub invalid: Vec<InvalidPair>,
    /// Trailing loose value dropped for lack of a partner.
    pub dangling: Option<Value>,
}

impl MergeResult {
    /// Emit the merge diagnostics as warnings on `sink`: one for a dangling
    /// key, one for all invalid pairs together.
    pub fn report<S: BaseSink + ?Sized>(&self, sink: &S) {
        if let Some(ignored) = &self.dangling {
            sink.warnw(
                DANGLING_KEY_MESSAGE,
                &[Field::typed("ignored", ignored.clone())],
            );
        }
        if !self.invalid.is_empty() {
            sink.warnw(INVALID_PAIRS_MESSAGE, &[Field::any("invalid", &self.invalid)]);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty() && self.dangling.is_none()
    }
}

/// Merge `args` into a single string without reporting anything.
pub fn merge_fields(args: &[Field]) -> MergeResult {
    let mut result = MergeResult::default();
    if args.is_empty() {
        return result;
    }

    let mut first = true;
    let mut i = 0;
    while i < args.len() {
        // Typed fields stand alone.
        if args[i].is_typed() {
            push_segment(&mut result.text, &mut first, &args[i]);
            i += 1;
            continue;
        }

        if i == args.len() - 1 {
            result.dangling = Some(args[i].to_value());
            break;
        }

        let (key, value) = (&args[i], &args[i + 1]);
        match key.as_key() {
            Some(key) => push_segment(&mut result.text, &mut first, format_args!("{key}: {value}")),
            None => {
                if result.invalid.capacity() == 0 {
                    result.invalid.reserve(args.len() / 2);
                }
                result.invalid.push(InvalidPair {
                    position: i,
                    key: key.to_value(),
                    value: value.to_value(),
                });
            }
        }
        i += 2;
    }

    result
}

/// Merge `args` and report any diagnostics through `sink`.
pub fn merge<S: BaseSink + ?Sized>(args: &[Field], sink: &S) -> MergeResult {
    let result = merge_fields(args);
    result.report(sink);
    result
}

fn push_segment(text: &mut String, first: &mut bool, segment: impl std::fmt::Display) {
    use std::fmt::Write;

    if !std::mem::take(first) {
        text.push_str(SEGMENT_SEPARATOR);
    }
    // Writing into a String cannot fail.
    let _ = write!(text, "{segment}");
}
