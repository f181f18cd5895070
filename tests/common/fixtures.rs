//! Argument lists shared across harnesses.
//!
//! Each fixture pairs an argument list with the merged text it must produce.

use teelog::{fields, Field};

#[derive(Debug)]
struct ReplicationError;

impl std::fmt::Display for ReplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("replication slot \"keeper_1\" does not exist")
    }
}

impl std::error::Error for ReplicationError {}

/// Representative keeper error calls and their merged text.
pub fn keeper_calls() -> Vec<(Vec<Field>, &'static str)> {
    vec![
        (fields!["path", "/data"], "path: /data"),
        (
            fields![Field::typed("user", "alice"), "count", 3],
            "user: alice, count: 3",
        ),
        (
            fields![Field::error(&ReplicationError)],
            "replication slot \"keeper_1\" does not exist",
        ),
        (
            fields![
                "standby",
                "keeper_2",
                Field::error(&ReplicationError),
                "lag_bytes",
                16777216
            ],
            "standby: keeper_2, replication slot \"keeper_1\" does not exist, lag_bytes: 16777216",
        ),
        (
            fields!["synchronous", true, "timeout_s", 1.5],
            "synchronous: true, timeout_s: 1.5",
        ),
    ]
}

/// A replication failure as a typed `error` field.
pub fn replication_error() -> Field {
    Field::error(&ReplicationError)
}
