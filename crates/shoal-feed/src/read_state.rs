use std::sync::Arc;

use shoal_db::{Database, Result};

/// Per-(user, channel) bookmark of the last message id the user has seen.
///
/// `mark_read` is an unconditional upsert: concurrent callers race and the
/// last write wins. The caller supplies the id it wants recorded; no
/// monotonic check happens here.
#[derive(Clone)]
pub struct ReadStateTracker {
    db: Arc<Database>,
}

impl ReadStateTracker {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn mark_read(&self, user_id: i64, channel_id: i64, message_id: i64) -> Result<()> {
        self.db.upsert_read_pointer(user_id, channel_id, message_id)
    }

    /// None means the user has never read this channel.
    pub fn get_pointer(&self, user_id: i64, channel_id: i64) -> Result<Option<i64>> {
        self.db.get_read_pointer(user_id, channel_id)
    }
}
