use std::sync::Arc;

use shoal_db::{Database, Result};

/// Derived per-channel unread counts for one user.
///
/// Polled at high frequency, so the query plan is fixed: one fetch of all
/// cached channel counts, one pointer join, and one count-after query per
/// channel the user has actually read. Staleness of up to one polling
/// interval relative to an in-flight append is acceptable.
#[derive(Clone)]
pub struct UnreadCounter {
    db: Arc<Database>,
}

impl UnreadCounter {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Unread count for every channel, keyed by channel id, ascending.
    pub fn unread_all(&self, user_id: i64) -> Result<Vec<(i64, i64)>> {
        let counts: Vec<(i64, i64)> = self.db.channel_message_counts()?;
        let pointers = self.db.read_pointers_for_user(user_id)?;

        let mut results = Vec::with_capacity(pointers.len());
        for pointer in pointers {
            let unread = match pointer.last_message_id {
                Some(last_read) => self.db.count_messages_after(pointer.channel_id, last_read)?,
                None => counts
                    .iter()
                    .find(|(id, _)| *id == pointer.channel_id)
                    .map(|(_, cnt)| *cnt)
                    .unwrap_or(0),
            };
            results.push((pointer.channel_id, unread));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MessageStore;

    #[test]
    fn unread_without_pointer_is_full_channel_count() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let uid = db.create_user("alice", "not-a-real-hash").unwrap();
        let store = MessageStore::new(db.clone());
        for i in 0..7 {
            store.append(1, uid, &format!("m{i}")).unwrap();
        }

        let unread = UnreadCounter::new(db).unread_all(uid).unwrap();
        assert_eq!(unread, vec![(1, 7)]);
    }

    #[test]
    fn unread_with_pointer_counts_only_newer_ids() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let uid = db.create_user("alice", "not-a-real-hash").unwrap();
        let store = MessageStore::new(db.clone());
        for i in 0..7 {
            store.append(1, uid, &format!("m{i}")).unwrap();
        }
        db.upsert_read_pointer(uid, 1, 5).unwrap();

        let unread = UnreadCounter::new(db).unread_all(uid).unwrap();
        assert_eq!(unread, vec![(1, 2)]);
    }

    #[test]
    fn unread_spans_every_channel() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let uid = db.create_user("alice", "not-a-real-hash").unwrap();
        let cid = db.create_channel("random", "").unwrap();
        let store = MessageStore::new(db.clone());

        store.append(1, uid, "one").unwrap();
        store.append(cid, uid, "two").unwrap();
        store.append(cid, uid, "three").unwrap();
        db.upsert_read_pointer(uid, cid, 2).unwrap();

        let unread = UnreadCounter::new(db).unread_all(uid).unwrap();
        assert_eq!(unread, vec![(1, 1), (cid, 1)]);
    }
}
