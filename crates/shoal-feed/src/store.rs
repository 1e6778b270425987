use std::sync::Arc;

use tracing::debug;

use shoal_db::models::MessageRow;
use shoal_db::{Database, Result, StoreError};

pub const POLL_LIMIT: u32 = 100;
pub const PAGE_SIZE: i64 = 20;

/// Owns all message writes and the channel's cached `message_count`.
/// Ids come from a single global monotonic sequence, so ascending id order
/// is chronological order with no ties to break.
#[derive(Clone)]
pub struct MessageStore {
    db: Arc<Database>,
}

impl MessageStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append a message and bump the channel counter atomically.
    pub fn append(&self, channel_id: i64, author_id: i64, content: &str) -> Result<i64> {
        if content.is_empty() {
            return Err(StoreError::validation("message content must not be empty"));
        }

        let message_id = self.db.append_message(channel_id, author_id, content)?;
        debug!(channel_id, message_id, "appended message");
        Ok(message_id)
    }

    /// Messages with id strictly greater than `since_id`, selected newest
    /// first up to `limit`, delivered in ascending-id order.
    pub fn get_since(&self, channel_id: i64, since_id: i64, limit: u32) -> Result<Vec<MessageRow>> {
        let mut rows = self.db.messages_since(channel_id, since_id, limit)?;
        rows.reverse();
        Ok(rows)
    }

    /// One page of the backlog, newest-first blocks reversed to
    /// chronological order. Returns the page rows and `max_page`.
    pub fn get_page(&self, channel_id: i64, page: i64, page_size: i64) -> Result<(Vec<MessageRow>, i64)> {
        let count = self
            .db
            .channel_message_count(channel_id)?
            .ok_or(StoreError::NotFound("channel"))?;

        let max_page = ((count + page_size - 1) / page_size).max(1);
        if page < 1 || page > max_page {
            return Err(StoreError::validation(format!(
                "page {page} out of range [1, {max_page}]"
            )));
        }

        let mut rows = self.db.message_page(channel_id, (page - 1) * page_size, page_size)?;
        rows.reverse();
        Ok((rows, max_page))
    }
}
