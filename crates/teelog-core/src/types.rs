//! Core types for teelog-core.
//!
//! This module defines the leveled [`Severity`] of a tee logger call and the
//! [`FeedbackClass`] that decides where an error-class call lands in the
//! remote feedback store.

use std::str::FromStr;

/// Severity of a tee logger call.
///
/// `Error` and `FatalError` both reach the remote feedback store. Locally they
/// are the same error-level entry; the distinction only matters to the remote
/// recovery process, which aborts its current attempt on `FatalError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    FatalError,
}

impl Severity {
    /// Feedback class mirrored to the remote store, if any.
    pub fn feedback_class(self) -> Option<FeedbackClass> {
        match self {
            Severity::Error => Some(FeedbackClass::Error),
            Severity::FatalError => Some(FeedbackClass::Fatal),
            Severity::Debug | Severity::Info | Severity::Warn => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Info => write!(f, "INFO"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
            Severity::FatalError => write!(f, "FATAL_ERROR"),
        }
    }
}

impl FromStr for Severity {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" | "fatal_error" | "fatal-error" => Ok(Severity::FatalError),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Final segment of a feedback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackClass {
    Error,
    Fatal,
}

impl FeedbackClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackClass::Error => "error",
            FeedbackClass::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for FeedbackClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackClass {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(FeedbackClass::Error),
            "fatal" => Ok(FeedbackClass::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Unrecognised severity or feedback class name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0:?}")]
pub struct ParseLevelError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Severity::Debug, None)]
    #[case(Severity::Info, None)]
    #[case(Severity::Warn, None)]
    #[case(Severity::Error, Some(FeedbackClass::Error))]
    #[case(Severity::FatalError, Some(FeedbackClass::Fatal))]
    fn only_error_classes_reach_feedback(
        #[case] severity: Severity,
        #[case] class: Option<FeedbackClass>,
    ) {
        assert_eq!(severity.feedback_class(), class);
    }

    #[rstest]
    #[case("warning", Severity::Warn)]
    #[case("ERROR", Severity::Error)]
    #[case("fatal", Severity::FatalError)]
    fn severity_parses_loosely(#[case] input: &str, #[case] expected: Severity) {
        assert_eq!(input.parse::<Severity>(), Ok(expected));
    }

    #[test]
    fn feedback_class_parses_exact_names() {
        assert_eq!("fatal".parse::<FeedbackClass>(), Ok(FeedbackClass::Fatal));
        assert!("Fatal".parse::<FeedbackClass>().is_err());
        assert!("trace".parse::<Severity>().is_err());
    }
}
