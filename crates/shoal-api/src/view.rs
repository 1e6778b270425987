use chrono::{Local, NaiveDateTime};
use tracing::warn;

use shoal_db::models::MessageRow;
use shoal_types::api::{MessageView, UserView};

/// Fixed display format for message timestamps: zero-padded
/// "YYYY/MM/DD HH:MM:SS" in server-local time.
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" in UTC without a
/// timezone marker. Parse as naive UTC, convert to local time, format.
pub fn format_date(created_at: &str) -> String {
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S") {
        Ok(ndt) => ndt
            .and_utc()
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string(),
        Err(e) => {
            warn!("Corrupt created_at '{}': {}", created_at, e);
            created_at.to_string()
        }
    }
}

pub fn message_view(row: MessageRow) -> MessageView {
    MessageView {
        id: row.id,
        date: format_date(&row.created_at),
        content: row.content,
        user: UserView {
            name: row.author_name,
            display_name: row.author_display_name,
            avatar_icon: row.author_avatar_icon,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_zero_padded_and_slash_separated() {
        let out = format_date("2026-01-02 03:04:05");
        assert_eq!(out.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&out, DATE_FORMAT).is_ok());
    }

    #[test]
    fn corrupt_date_passes_through() {
        assert_eq!(format_date("not a date"), "not a date");
    }
}
