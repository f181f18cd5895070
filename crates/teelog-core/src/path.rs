//! Feedback path construction.
//!
//! Every feedback entry is stored at
//! `remoteLogs/<host>/<cluster_name>/<instance_uid>/<class>`. Segments are
//! joined with `/` regardless of platform; they come from trusted
//! configuration and are validated there (see
//! [`Config::feedback_context`](crate::config::Config::feedback_context)).

use crate::types::FeedbackClass;
use std::fmt;

/// First segment of every feedback path.
pub const FEEDBACK_ROOT: &str = "remoteLogs";

pub const SEPARATOR: char = '/';

/// Identity of the supervised instance that owns a tee logger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackContext {
    host: String,
    cluster_name: String,
    instance_uid: String,
}

impl FeedbackContext {
    pub fn new(
        host: impl Into<String>,
        cluster_name: impl Into<String>,
        instance_uid: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            cluster_name: cluster_name.into(),
            instance_uid: instance_uid.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn instance_uid(&self) -> &str {
        &self.instance_uid
    }

    /// Path prefix shared by every class for this instance.
    pub fn prefix(&self) -> FeedbackPath {
        FeedbackPath::from_segments([
            FEEDBACK_ROOT,
            self.host.as_str(),
            self.cluster_name.as_str(),
            self.instance_uid.as_str(),
        ])
    }
}

/// A `/`-separated location in the remote feedback store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackPath(String);

impl FeedbackPath {
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut path = String::new();
        for segment in segments {
            if !path.is_empty() {
                path.push(SEPARATOR);
            }
            path.push_str(segment);
        }
        FeedbackPath(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// A new path with `segment` appended.
    pub fn join(&self, segment: &str) -> Self {
        FeedbackPath::from_segments([self.as_str(), segment])
    }
}

impl fmt::Display for FeedbackPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FeedbackPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Location of a feedback entry of the given class for `ctx`.
pub fn build_path(ctx: &FeedbackContext, class: FeedbackClass) -> FeedbackPath {
    ctx.prefix().join(class.as_str())
}
