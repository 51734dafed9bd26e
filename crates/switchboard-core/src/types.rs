//! Conversation model — typed messages and the mutable chat history.
//!
//! Messages here are provider-neutral. Each provider's transformer in
//! `switchboard-providers` maps them into that API's wire shape; nothing in
//! this module knows about any particular provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Role + Message
// ─────────────────────────────────────────────

/// The author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in a conversation.
///
/// `is_context` marks messages injected as background material (a quoted
/// selection, file contents) rather than something the user typed. It is
/// omitted from JSON when false so identity-transform providers see plain
/// `{role, content}` objects for ordinary turns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_context: bool,
}

impl Message {
    /// Create a system (instruction) message.
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
            is_context: false,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            is_context: false,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
            is_context: false,
        }
    }

    /// Create an auto-injected context message (user role, `is_context` set).
    pub fn context(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            is_context: true,
        }
    }
}

// ─────────────────────────────────────────────
// ChatHistory
// ─────────────────────────────────────────────

/// Metadata carried alongside a conversation, consumed by persistence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryMeta {
    /// Model that produced the assistant turns (resolved id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Identifier of the persisted chat, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    /// Label of the action/prompt that started the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An ordered, append-only-in-spirit conversation.
///
/// Appending never reorders earlier turns. `clear` keeps a leading system
/// message so an ongoing conversation can be reset without losing its
/// instruction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<Message>,
    #[serde(default)]
    pub meta: HistoryMeta,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        ChatHistory {
            messages: Vec::new(),
            meta: HistoryMeta {
                created_at: Some(Utc::now()),
                ..HistoryMeta::default()
            },
        }
    }

    /// Create a history seeded with a system instruction.
    pub fn with_system(instruction: impl Into<String>) -> Self {
        let mut history = ChatHistory::new();
        history.push(Message::system(instruction));
        history
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.meta.updated_at = Some(Utc::now());
    }

    /// Remove and return the last message, if any.
    pub fn pop(&mut self) -> Option<Message> {
        let message = self.messages.pop();
        if message.is_some() {
            self.meta.updated_at = Some(Utc::now());
        }
        message
    }

    /// Drop all turns except a leading system message, if present.
    pub fn clear(&mut self) {
        let keep_system = matches!(self.messages.first(), Some(m) if m.role == Role::System);
        if keep_system {
            self.messages.truncate(1);
        } else {
            self.messages.clear();
        }
        self.meta.updated_at = Some(Utc::now());
    }

    /// The ordered message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
