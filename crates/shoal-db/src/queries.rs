use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{ChannelRow, MessageRow, PointerRow, UserRow};
use crate::{Database, Result, StoreError};

const MESSAGE_COLUMNS: &str = "
    m.id, m.channel_id, m.user_id, m.content, m.created_at,
    u.name, u.display_name, u.avatar_icon";

impl Database {
    // -- Users --

    pub fn create_user(&self, name: &str, password_hash: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (name, password, display_name, avatar_icon)
                 VALUES (?1, ?2, ?1, 'default.png')",
                params![name, password_hash],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_name(&self, name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_name(conn, name))
    }

    // -- Channels --

    pub fn create_channel(&self, name: &str, description: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO channels (name, description) VALUES (?1, ?2)",
                params![name, description],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_channel(&self, id: i64) -> Result<Option<ChannelRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, description, message_count FROM channels WHERE id = ?1",
                [id],
                channel_from_row,
            )
            .optional()
            .map_err(StoreError::from)
        })
    }

    pub fn list_channels(&self) -> Result<Vec<ChannelRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, message_count FROM channels ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], channel_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Cached message count for one channel; None when the channel is absent.
    pub fn channel_message_count(&self, channel_id: i64) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT message_count FROM channels WHERE id = ?1",
                [channel_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
    }

    /// Cached message counts for every channel, in one query.
    pub fn channel_message_counts(&self) -> Result<Vec<(i64, i64)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, message_count FROM channels")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Messages --

    /// Insert a message and bump the owning channel's cached count in one
    /// transaction. A failure at any step rolls the whole unit back; the
    /// count can never drift from the messages table.
    pub fn append_message(&self, channel_id: i64, user_id: i64, content: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let author_exists: Option<i64> = tx
                .query_row("SELECT id FROM users WHERE id = ?1", [user_id], |row| {
                    row.get(0)
                })
                .optional()?;
            if author_exists.is_none() {
                return Err(StoreError::NotFound("user"));
            }

            let updated = tx.execute(
                "UPDATE channels
                 SET message_count = message_count + 1, updated_at = datetime('now')
                 WHERE id = ?1",
                [channel_id],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound("channel"));
            }

            tx.execute(
                "INSERT INTO messages (channel_id, user_id, content) VALUES (?1, ?2, ?3)",
                params![channel_id, user_id, content],
            )?;
            let message_id = tx.last_insert_rowid();

            tx.commit()?;
            Ok(message_id)
        })
    }

    /// Messages with id strictly greater than `since_id`, newest first.
    pub fn messages_since(&self, channel_id: i64, since_id: i64, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS}
                 FROM messages m
                 LEFT JOIN users u ON m.user_id = u.id
                 WHERE m.id > ?1 AND m.channel_id = ?2
                 ORDER BY m.id DESC
                 LIMIT ?3"
            );
            query_messages(conn, &sql, params![since_id, channel_id, limit])
        })
    }

    /// One OFFSET/LIMIT block of a channel's backlog, newest first.
    pub fn message_page(&self, channel_id: i64, offset: i64, limit: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS}
                 FROM messages m
                 LEFT JOIN users u ON m.user_id = u.id
                 WHERE m.channel_id = ?1
                 ORDER BY m.id DESC
                 LIMIT ?2 OFFSET ?3"
            );
            query_messages(conn, &sql, params![channel_id, limit, offset])
        })
    }

    pub fn count_messages_after(&self, channel_id: i64, message_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let cnt = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE channel_id = ?1 AND id > ?2",
                params![channel_id, message_id],
                |row| row.get(0),
            )?;
            Ok(cnt)
        })
    }

    // -- Read pointers --

    /// Last-writer-wins upsert; no monotonic check on the recorded id.
    pub fn upsert_read_pointer(&self, user_id: i64, channel_id: i64, message_id: i64) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO read_pointers (user_id, channel_id, last_message_id)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id, channel_id) DO UPDATE
                 SET last_message_id = excluded.last_message_id,
                     updated_at = datetime('now')",
                params![user_id, channel_id, message_id],
            )?;
            Ok(())
        })
    }

    pub fn get_read_pointer(&self, user_id: i64, channel_id: i64) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT last_message_id FROM read_pointers
                 WHERE user_id = ?1 AND channel_id = ?2",
                params![user_id, channel_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
    }

    /// Every channel paired with one user's pointer (None when never read).
    pub fn read_pointers_for_user(&self, user_id: i64) -> Result<Vec<PointerRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, r.last_message_id
                 FROM channels c
                 LEFT JOIN read_pointers r
                   ON c.id = r.channel_id AND r.user_id = ?1
                 ORDER BY c.id",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(PointerRow {
                        channel_id: row.get(0)?,
                        last_message_id: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_user_by_name(conn: &Connection, name: &str) -> Result<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, name, password, display_name, avatar_icon FROM users WHERE name = ?1",
            [name],
            |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    password: row.get(2)?,
                    display_name: row.get(3)?,
                    avatar_icon: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

fn channel_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChannelRow> {
    Ok(ChannelRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        message_count: row.get(3)?,
    })
}

// JOIN users to fetch author fields in a single query (eliminates N+1)
fn query_messages(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(args, |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                channel_id: row.get(1)?,
                user_id: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
                author_name: row.get::<_, Option<String>>(5)?.unwrap_or_else(|| "unknown".to_string()),
                author_display_name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                author_avatar_icon: row
                    .get::<_, Option<String>>(7)?
                    .unwrap_or_else(|| "default.png".to_string()),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
