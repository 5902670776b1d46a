//! Turn-level wire types: inbound events and outbound response intents.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quick-reply button labels are capped by the platform.
pub const MAX_LABEL_LEN: usize = 20;

/// One inbound turn event, already translated from the wire format.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub user_id: String,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn text(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn quick_reply(user_id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::QuickReply(payload.into()),
        }
    }

    pub fn attachment(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Attachment,
        }
    }
}

/// What kind of input the user sent.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Free text typed by the user.
    Text(String),
    /// A quick-reply button press; carries the button's payload.
    QuickReply(String),
    /// Any attachment (image, audio, sticker). Content is ignored.
    Attachment,
}

/// One quick-reply button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplyOption {
    pub label: String,
    pub payload: String,
}

impl QuickReplyOption {
    /// Build an option, truncating the label to the platform cap.
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        let label: String = label.into();
        let label = if label.chars().count() > MAX_LABEL_LEN {
            label.chars().take(MAX_LABEL_LEN).collect()
        } else {
            label
        };
        Self {
            label,
            payload: payload.into(),
        }
    }
}

/// An outbound response, abstracted from the delivery wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseIntent {
    Text { text: String },
    Image { url: String },
    QuickReplies {
        text: String,
        options: Vec<QuickReplyOption>,
    },
}

impl ResponseIntent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }
}

/// A response intent plus its offset from the start of the turn.
///
/// Delays are relative to the turn, not to the previous intent; the
/// dispatcher sleeps out the gaps in submission order.
#[derive(Debug, Clone)]
pub struct ScheduledResponse {
    pub delay: Duration,
    pub intent: ResponseIntent,
}

impl ScheduledResponse {
    /// An intent sent immediately.
    pub fn now(intent: ResponseIntent) -> Self {
        Self {
            delay: Duration::ZERO,
            intent,
        }
    }

    /// An intent sent `delay` after the turn started.
    pub fn after(delay: Duration, intent: ResponseIntent) -> Self {
        Self { delay, intent }
    }
}
