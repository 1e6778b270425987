use shoal_db::models::MessageRow;
use shoal_db::Result;

use crate::store::{MessageStore, PAGE_SIZE};

/// One page of a channel's backlog plus its bounds.
#[derive(Debug)]
pub struct HistoryPage {
    pub messages: Vec<MessageRow>,
    pub max_page: i64,
    pub page: i64,
}

/// Paginated browse of old messages. Browsing history is not "reading" the
/// live feed, so this never touches the read-state tracker.
#[derive(Clone)]
pub struct HistoryPager {
    store: MessageStore,
}

impl HistoryPager {
    pub fn new(store: MessageStore) -> Self {
        Self { store }
    }

    pub fn browse(&self, channel_id: i64, page: i64) -> Result<HistoryPage> {
        let (messages, max_page) = self.store.get_page(channel_id, page, PAGE_SIZE)?;
        Ok(HistoryPage {
            messages,
            max_page,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shoal_db::{Database, StoreError};

    use super::*;

    fn pager() -> (Arc<Database>, HistoryPager, i64) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let uid = db.create_user("alice", "not-a-real-hash").unwrap();
        let pager = HistoryPager::new(MessageStore::new(db.clone()));
        (db, pager, uid)
    }

    #[test]
    fn browse_returns_page_bounds() {
        let (db, pager, uid) = pager();
        let store = MessageStore::new(db.clone());
        for i in 0..45 {
            store.append(1, uid, &format!("m{i}")).unwrap();
        }

        let page = pager.browse(1, 2).unwrap();
        assert_eq!(page.max_page, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.messages.len(), 20);
    }

    #[test]
    fn browse_propagates_page_validation() {
        let (_db, pager, _) = pager();
        let err = pager.browse(1, 2).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn browse_leaves_read_state_alone() {
        let (db, pager, uid) = pager();
        let store = MessageStore::new(db.clone());
        store.append(1, uid, "hi").unwrap();

        pager.browse(1, 1).unwrap();
        assert_eq!(db.get_read_pointer(uid, 1).unwrap(), None);
    }
}
