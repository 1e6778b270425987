/// Database row types — these map directly to SQLite rows.
/// Distinct from shoal-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub display_name: String,
    pub avatar_icon: String,
}

pub struct ChannelRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub message_count: i64,
}

/// One message joined with its author's display fields.
#[derive(Debug)]
pub struct MessageRow {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: String,
    pub author_name: String,
    pub author_display_name: String,
    pub author_avatar_icon: String,
}

/// LEFT JOIN of every channel against one user's read pointers.
/// `last_message_id` is None when the user has never read the channel.
pub struct PointerRow {
    pub channel_id: i64,
    pub last_message_id: Option<i64>,
}
