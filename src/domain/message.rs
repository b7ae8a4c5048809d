use chrono::{DateTime, Local, Utc};

/// Label shown instead of a timestamp the server did not provide.
const UNKNOWN_TIME_LABEL: &str = "--:--";

/// Label shown for messages without a sender handle.
const UNKNOWN_SENDER_LABEL: &str = "Unknown";

/// When a message was sent, as far as the wire told us.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SentAt {
    /// Display string produced by the server, shown verbatim.
    Preformatted(String),
    /// Absolute instant, rendered as local `HH:MM`.
    At(DateTime<Utc>),
    #[default]
    Unknown,
}

impl SentAt {
    pub fn display(&self) -> String {
        match self {
            Self::Preformatted(label) => label.clone(),
            Self::At(instant) => instant.with_timezone(&Local).format("%H:%M").to_string(),
            Self::Unknown => UNKNOWN_TIME_LABEL.to_owned(),
        }
    }
}

/// A chat message as held by the message log. Never mutated once logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub body: String,
    pub sent_at: SentAt,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>, sent_at: SentAt) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            sent_at,
        }
    }

    /// Returns the sender label, `You` for messages sent under `own_name`.
    pub fn sender_label(&self, own_name: &str) -> &str {
        if self.sender.is_empty() {
            UNKNOWN_SENDER_LABEL
        } else if !own_name.is_empty() && self.sender == own_name {
            "You"
        } else {
            &self.sender
        }
    }

    pub fn is_from(&self, name: &str) -> bool {
        !name.is_empty() && self.sender == name
    }
}
