use serde::{Deserialize, Serialize};

/// A named conversation stream. `message_count` is the cached aggregate kept
/// in lockstep with the messages table by the append transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub message_count: i64,
}
