//! Core feed engine: message storage, read-state tracking, and the derived
//! unread/pagination retrieval paths. Each component is handed its storage
//! handle at construction; nothing here reaches for ambient globals.

pub mod history;
pub mod polling;
pub mod read_state;
pub mod store;
pub mod unread;

pub use history::HistoryPager;
pub use polling::PollingFeed;
pub use read_state::ReadStateTracker;
pub use store::MessageStore;
pub use unread::UnreadCounter;
