use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth handlers.
/// Canonical definition lives here in shoal-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub name: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub name: String,
    pub token: String,
}

// -- Messages --

/// `message` is Option so that a body omitting the field still reaches the
/// handler, which owns the failure status, instead of failing extraction.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostMessageRequest {
    pub message: Option<String>,
}

/// Author fields displayed next to a message.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub name: String,
    pub display_name: String,
    pub avatar_icon: String,
}

/// Wire shape of one message in poll and history responses.
/// `date` is the fixed zero-padded "YYYY/MM/DD HH:MM:SS" local-time string.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: i64,
    pub date: String,
    pub content: String,
    pub user: UserView,
}

// -- Unread --

#[derive(Debug, Clone, Serialize)]
pub struct UnreadEntry {
    pub channel_id: i64,
    pub unread: i64,
}

// -- History --

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<MessageView>,
    pub max_page: i64,
    pub page: i64,
    pub channel: ChannelView,
}

/// Display metadata from the channel directory.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    pub id: i64,
    pub name: String,
    pub description: String,
}

// -- Channels --

/// Fields are Option for the same reason as [`PostMessageRequest`]: the
/// handler maps a missing field to its contracted status.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChannelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChannelResponse {
    pub channel_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_view_wire_shape() {
        let view = MessageView {
            id: 7,
            date: "2026/01/02 03:04:05".into(),
            content: "hi".into(),
            user: UserView {
                name: "alice".into(),
                display_name: "Alice".into(),
                avatar_icon: "default.png".into(),
            },
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2026/01/02 03:04:05");
        assert_eq!(json["user"]["display_name"], "Alice");
    }

    #[test]
    fn bodies_with_missing_fields_still_deserialize() {
        let req: PostMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());

        let req: CreateChannelRequest = serde_json::from_str(r#"{"name":"random"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("random"));
        assert!(req.description.is_none());
    }

    #[test]
    fn requests_reject_unknown_fields() {
        let err = serde_json::from_str::<RegisterRequest>(
            r#"{"name":"alice","password":"hunter22","admin":true}"#,
        );
        assert!(err.is_err());
    }
}
