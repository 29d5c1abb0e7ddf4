use serde::{Deserialize, Serialize};

/// Role of a sender inside a group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    #[default]
    Member,
    Admin,
    Owner,
}

impl SenderRole {
    /// Whether this role may change group-level state.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }
}

impl std::str::FromStr for SenderRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(format!("unknown sender role: {other}")),
        }
    }
}

/// A message posted in a group chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMessage {
    /// Platform message id, referenced by replies.
    pub message_id: i64,
    pub group_id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub sender_role: SenderRole,
    /// Raw message text.
    pub text: String,
}

impl GroupMessage {
    /// Build a text reply to this message.
    pub fn reply(&self, text: impl Into<String>) -> OutgoingMessage {
        OutgoingMessage {
            target: ReplyTarget::Group(self.group_id),
            reply_to: Some(self.message_id),
            text: text.into(),
        }
    }
}

/// A message posted in a private chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub message_id: i64,
    pub sender_id: i64,
    pub text: String,
}

impl PrivateMessage {
    /// Build a text reply to this message.
    pub fn reply(&self, text: impl Into<String>) -> OutgoingMessage {
        OutgoingMessage {
            target: ReplyTarget::Private(self.sender_id),
            reply_to: Some(self.message_id),
            text: text.into(),
        }
    }
}

/// An inbound message together with the destination it arrived in.
///
/// Immutable for the lifetime of its handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageContext {
    Group(GroupMessage),
    Private(PrivateMessage),
}

impl MessageContext {
    pub fn text(&self) -> &str {
        match self {
            Self::Group(m) => &m.text,
            Self::Private(m) => &m.text,
        }
    }

    pub fn message_id(&self) -> i64 {
        match self {
            Self::Group(m) => m.message_id,
            Self::Private(m) => m.message_id,
        }
    }

    pub fn sender_id(&self) -> i64 {
        match self {
            Self::Group(m) => m.sender_id,
            Self::Private(m) => m.sender_id,
        }
    }

    /// Build a text reply that references this message.
    pub fn reply(&self, text: impl Into<String>) -> OutgoingMessage {
        match self {
            Self::Group(m) => m.reply(text),
            Self::Private(m) => m.reply(text),
        }
    }
}

/// Routing target for an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ReplyTarget {
    Group(i64),
    Private(i64),
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub target: ReplyTarget,
    /// Id of the message being replied to, if any.
    #[serde(default)]
    pub reply_to: Option<i64>,
    pub text: String,
}
