use tracing::debug;

use shoal_db::models::MessageRow;
use shoal_db::Result;

use crate::read_state::ReadStateTracker;
use crate::store::{MessageStore, POLL_LIMIT};

/// Client-pull "anything new since X" path. This is the only component
/// that mutates the read-state tracker.
#[derive(Clone)]
pub struct PollingFeed {
    store: MessageStore,
    tracker: ReadStateTracker,
}

impl PollingFeed {
    pub fn new(store: MessageStore, tracker: ReadStateTracker) -> Self {
        Self { store, tracker }
    }

    /// Fetch messages newer than `last_message_id` in chronological order
    /// and advance the caller's read pointer to the newest returned id.
    ///
    /// An empty result leaves the pointer untouched. The pointer is never
    /// regressed to zero by an idle poll.
    pub fn fetch(&self, user_id: i64, channel_id: i64, last_message_id: i64) -> Result<Vec<MessageRow>> {
        let rows = self.store.get_since(channel_id, last_message_id, POLL_LIMIT)?;

        if let Some(newest) = rows.last() {
            self.tracker.mark_read(user_id, channel_id, newest.id)?;
            debug!(user_id, channel_id, pointer = newest.id, "advanced read pointer");
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shoal_db::Database;

    use super::*;
    use crate::unread::UnreadCounter;

    fn feed() -> (Arc<Database>, PollingFeed, i64) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let uid = db.create_user("alice", "not-a-real-hash").unwrap();
        let feed = PollingFeed::new(
            MessageStore::new(db.clone()),
            ReadStateTracker::new(db.clone()),
        );
        (db, feed, uid)
    }

    #[test]
    fn fetch_advances_pointer_to_newest_returned_id() {
        let (db, feed, uid) = feed();
        let store = MessageStore::new(db.clone());
        for i in 0..3 {
            store.append(1, uid, &format!("m{i}")).unwrap();
        }

        let rows = feed.fetch(uid, 1, 0).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), Some(3));
    }

    #[test]
    fn empty_fetch_leaves_pointer_untouched() {
        let (db, feed, uid) = feed();
        let store = MessageStore::new(db.clone());
        store.append(1, uid, "hi").unwrap();

        feed.fetch(uid, 1, 0).unwrap();
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), Some(1));

        // Idle poll: nothing newer than id 1.
        let rows = feed.fetch(uid, 1, 1).unwrap();
        assert!(rows.is_empty());
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), Some(1));
    }

    #[test]
    fn empty_fetch_never_creates_a_pointer() {
        let (db, feed, uid) = feed();

        let rows = feed.fetch(uid, 1, 0).unwrap();
        assert!(rows.is_empty());
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), None);
    }

    #[test]
    fn append_fetch_unread_end_to_end() {
        let (db, feed, uid) = feed();
        let store = MessageStore::new(db.clone());
        let unread = UnreadCounter::new(db.clone());

        let id = store.append(1, uid, "hi").unwrap();
        assert_eq!(id, 1);
        assert_eq!(db.channel_message_count(1).unwrap(), Some(1));

        let rows = feed.fetch(uid, 1, 0).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].content, "hi");
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), Some(1));
        assert_eq!(unread.unread_all(uid).unwrap(), vec![(1, 0)]);

        store.append(1, uid, "again").unwrap();
        assert_eq!(unread.unread_all(uid).unwrap(), vec![(1, 1)]);
    }
}
