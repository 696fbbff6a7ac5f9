use crate::errors::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// Content attributes of a chat message, one flag per kind of payload it carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentFlags {
    pub animation: bool,
    pub text: bool,
    pub audio: bool,
    pub photo: bool,
    pub sticker: bool,
    pub video: bool,
    pub voice: bool,
    pub document: bool,
    pub video_note: bool,
    /// Forwarded from a user.
    pub forward: bool,
    /// Forwarded from a chat or channel.
    pub repost: bool,
    pub edited: bool,
}

/// Canonical chat message extracted from a platform update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// 0 when the platform reports no sender (e.g. anonymous channel posts).
    pub sender_id: i64,
    pub chat_id: i64,
    pub message_id: i32,
    pub text: String,
    pub flags: ContentFlags,
}

/// Platform-neutral view of one update. Only new and edited messages are carried;
/// every other update kind arrives with both slots empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformUpdate {
    pub message: Option<InboundMessage>,
    pub edited_message: Option<InboundMessage>,
}

impl PlatformUpdate {
    pub fn new_message(msg: InboundMessage) -> Self {
        Self {
            message: Some(msg),
            edited_message: None,
        }
    }

    pub fn edited(msg: InboundMessage) -> Self {
        Self {
            message: None,
            edited_message: Some(msg),
        }
    }

    /// Pick the canonical message: the new message if present, else the edited one.
    pub fn into_message(self) -> RelayResult<InboundMessage> {
        self.message
            .or(self.edited_message)
            .ok_or(RelayError::NoMessage)
    }
}

/// Classified message published to the events topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub user_id: i64,
    pub chat_id: i64,
    pub message_id: i32,
    pub text: String,
    pub types: Vec<String>,
    pub timestamp: i64,
}

/// Instruction consumed from the commands topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub chat_id: i64,
    /// 0 means "not a reply".
    #[serde(default)]
    pub reply_to_message_id: i32,
    #[serde(default)]
    pub text: String,
}

impl SendRequest {
    /// Check every rule and report all violations together.
    pub fn validate(&self) -> RelayResult<()> {
        let mut violations = Vec::new();
        if self.chat_id == 0 {
            violations.push("no chat id".to_string());
        }
        if self.text.is_empty() {
            violations.push("no text".to_string());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RelayError::Validation(violations))
        }
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_message_id != 0
    }
}
