//! [`BaseSink`] backed by `tracing`.
//!
//! Each call becomes one event under the `teelog` target at the matching
//! level. The key/value list is rendered logfmt-style into a single `fields`
//! attribute, because `tracing` field names must be known at compile time.

use serde_json::Value;
use std::fmt;
use teelog_core::field::render_value;
use teelog_core::sink::render_args;
use teelog_core::{BaseSink, Field};
use tracing::Level;

const TARGET: &str = "teelog";

/// Production base sink: forwards to whatever `tracing` subscriber is
/// installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit {
    ($level:expr, $msg:expr, $kv:expr) => {{
        let kv: &[Field] = $kv;
        if kv.is_empty() {
            tracing::event!(target: TARGET, $level, "{}", $msg);
        } else {
            tracing::event!(target: TARGET, $level, fields = %KeyValues(kv), "{}", $msg);
        }
    }};
}

impl BaseSink for TracingSink {
    fn warn(&self, args: &[Field]) {
        tracing::event!(target: TARGET, Level::WARN, "{}", render_args(args));
    }

    fn warnw(&self, msg: &str, kv: &[Field]) {
        emit!(Level::WARN, msg, kv);
    }

    fn infow(&self, msg: &str, kv: &[Field]) {
        emit!(Level::INFO, msg, kv);
    }

    fn debugw(&self, msg: &str, kv: &[Field]) {
        emit!(Level::DEBUG, msg, kv);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        tracing::event!(target: TARGET, Level::INFO, "{}", args);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        tracing::event!(target: TARGET, Level::DEBUG, "{}", args);
    }

    fn errorw(&self, msg: &str, kv: &[Field]) {
        emit!(Level::ERROR, msg, kv);
    }
}

/// Logfmt-style rendering of a key/value list: `key=value key2="a b"`.
///
/// Typed fields keep their key. Loose values are paired; a non-string key is
/// rendered as-is and a trailing value without a partner appears under
/// `ignored`.
pub struct KeyValues<'a>(pub &'a [Field]);

impl fmt::Display for KeyValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.0;
        let mut first = true;
        let mut pair = |f: &mut fmt::Formatter<'_>, key: &str, value: &Value| {
            if !std::mem::take(&mut first) {
                f.write_str(" ")?;
            }
            write!(f, "{key}=")?;
            write_quoted(f, &render_value(value))
        };

        let mut i = 0;
        while i < args.len() {
            match &args[i] {
                Field::Typed { key, value } => {
                    pair(f, key.as_str(), value)?;
                    i += 1;
                }
                Field::Loose(value) if i + 1 == args.len() => {
                    pair(f, "ignored", value)?;
                    i += 1;
                }
                Field::Loose(key) => {
                    pair(f, render_value(key).as_ref(), &args[i + 1].to_value())?;
                    i += 2;
                }
            }
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.is_empty() || text.contains(|c: char| c.is_whitespace() || c == '=' || c == '"') {
        write!(f, "{text:?}")
    } else {
        f.write_str(text)
    }
}
