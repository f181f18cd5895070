//! Directory-backed feedback store.
//!
//! Each feedback path maps onto a file under the store root, one directory
//! per segment:
//!
//! ```text
//! <root>/remoteLogs/<host>/<cluster>/<instance>/error
//! <root>/remoteLogs/<host>/<cluster>/<instance>/fatal
//! ```
//!
//! A `put` overwrites the file, so like the keyed store it stands in for, the
//! last write wins. Each write goes through its own temporary sibling and a
//! rename, so a reader never sees a half-written value even when several
//! threads write the same path.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use teelog_core::path::SEPARATOR;
use teelog_core::{FeedbackError, FeedbackPath, FeedbackSink};

const TMP_SUFFIX: &str = ".tmp";

/// A stored feedback entry as read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFeedback {
    pub path: String,
    pub value: String,
    pub modified: DateTime<Utc>,
}

/// Feedback store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct DirFeedbackStore {
    root: PathBuf,
}

impl DirFeedbackStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All entries stored under `prefix`, newest first.
    ///
    /// A missing prefix directory yields an empty list.
    pub fn list(&self, prefix: &FeedbackPath) -> Result<Vec<StoredFeedback>, FeedbackError> {
        let start = self.file_path(prefix)?;
        let mut out = Vec::new();
        if start.is_file() {
            out.push(self.read_entry(&start)?);
        } else if start.is_dir() {
            self.walk(&start, &mut out)?;
        }
        out.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
        Ok(out)
    }

    /// Value stored at `path`, if any.
    pub fn get(&self, path: &FeedbackPath) -> Result<Option<String>, FeedbackError> {
        let file = self.file_path(path)?;
        match fs::read_to_string(&file) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(path.as_str(), err)),
        }
    }

    fn walk(&self, dir: &Path, out: &mut Vec<StoredFeedback>) -> Result<(), FeedbackError> {
        let entries = fs::read_dir(dir).map_err(|e| io_error(&dir.display().to_string(), e))?;
        for entry in entries {
            let path = entry
                .map_err(|e| io_error(&dir.display().to_string(), e))?
                .path();
            if path.is_dir() {
                self.walk(&path, out)?;
            } else if !is_temporary(&path) {
                out.push(self.read_entry(&path)?);
            }
        }
        Ok(())
    }

    fn read_entry(&self, file: &Path) -> Result<StoredFeedback, FeedbackError> {
        let display = file.display().to_string();
        let value = fs::read_to_string(file).map_err(|e| io_error(&display, e))?;
        let modified = fs::metadata(file)
            .and_then(|m| m.modified())
            .map_err(|e| io_error(&display, e))?;
        Ok(StoredFeedback {
            path: self.feedback_path_of(file),
            value,
            modified: DateTime::<Utc>::from(modified),
        })
    }

    /// Map a feedback path onto the filesystem, refusing segments that would
    /// escape the root.
    fn file_path(&self, path: &FeedbackPath) -> Result<PathBuf, FeedbackError> {
        let mut file = self.root.clone();
        for segment in path.segments() {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(FeedbackError::Rejected {
                    path: path.to_string(),
                    reason: format!("invalid segment {segment:?}"),
                });
            }
            file.push(segment);
        }
        Ok(file)
    }

    fn feedback_path_of(&self, file: &Path) -> String {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string())
    }
}

impl FeedbackSink for DirFeedbackStore {
    fn put(&self, path: &FeedbackPath, value: &str) -> Result<(), FeedbackError> {
        let file = self.file_path(path)?;
        let err = |e| io_error(path.as_str(), e);

        let parent = file.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(parent).map_err(err)?;

        // One temporary file per write; concurrent writers to the same path
        // each publish a whole value and the last rename wins.
        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .suffix(TMP_SUFFIX)
            .tempfile_in(parent)
            .map_err(err)?;
        tmp.write_all(value.as_bytes()).map_err(err)?;
        tmp.persist(&file).map_err(|e| err(e.error))?;
        Ok(())
    }
}

fn is_temporary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "tmp")
}

fn io_error(path: &str, source: io::Error) -> FeedbackError {
    FeedbackError::Io {
        path: path.to_string(),
        source,
    }
}
