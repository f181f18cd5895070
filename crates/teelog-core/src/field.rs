//! Log call arguments.
//!
//! A leveled call carries an ordered list of [`Field`]s. Each entry is either
//! a strongly-typed named field (one slot) or a loose value that the merger
//! pairs with its neighbour as `(key, value)` (two slots).
//!
//! Callers normally build the list with the [`fields!`](crate::fields) macro,
//! which normalises plain values into [`Field::Loose`] and passes typed
//! fields through untouched:
//!
//! ```rust
//! use teelog_core::{fields, Field};
//!
//! let kv = fields![Field::typed("user", "alice"), "count", 3];
//! assert_eq!(kv.len(), 3);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Key under which a typed field renders value-only in merged text.
pub const ERROR_KEY: &str = "error";

/// A single argument of a leveled log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A named field, consumed on its own.
    Typed { key: String, value: Value },
    /// A loose value, consumed together with its neighbour as a key/value pair.
    Loose(Value),
}

impl Field {
    pub fn typed(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Field::Typed {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Typed field keyed `"error"` holding the error's display message.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Field::Typed {
            key: ERROR_KEY.to_string(),
            value: Value::String(err.to_string()),
        }
    }

    /// Typed field holding any serialisable value.
    ///
    /// Values that fail to serialise are kept as a descriptive string so a log
    /// call never fails because of its arguments.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")));
        Field::Typed {
            key: key.into(),
            value,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Field::Typed { .. })
    }

    /// The loose key text, if this is a loose string value.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Field::Loose(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// JSON form of this argument. Typed fields become a one-entry object.
    pub fn to_value(&self) -> Value {
        match self {
            Field::Loose(v) => v.clone(),
            Field::Typed { key, value } => {
                let mut obj = serde_json::Map::with_capacity(1);
                obj.insert(key.clone(), value.clone());
                Value::Object(obj)
            }
        }
    }
}

/// Renders a typed field as it appears in merged text (`key: value`, or just
/// `value` for the `"error"` key) and a loose value as its plain text.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Typed { key, value } if key == ERROR_KEY => f.write_str(&render_value(value)),
            Field::Typed { key, value } => write!(f, "{key}: {}", render_value(value)),
            Field::Loose(value) => f.write_str(&render_value(value)),
        }
    }
}

/// Plain textual form of a value: strings unquoted, everything else as JSON.
pub fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

macro_rules! loose_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Field::Loose(Value::from(value))
                }
            }
        )*
    };
}

loose_from!(&str, String, bool, i32, i64, u32, u64, usize, f64);

impl From<&String> for Field {
    fn from(value: &String) -> Self {
        Field::Loose(Value::String(value.clone()))
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::Loose(value)
    }
}

/// Build a `Vec<Field>` from a heterogeneous argument list.
///
/// Plain values become [`Field::Loose`]; [`Field`] values pass through.
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::from($arg)),+]
    };
}
