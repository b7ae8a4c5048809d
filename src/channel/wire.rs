//! Wire shapes of the chat server's named events and their normalization
//! into domain types.
//!
//! Every legacy payload variant is resolved here, so nothing past the channel
//! boundary needs to know about `message`/`text` or `time`/`timestamp`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{
    events::{InboundEvent, OutboundEvent},
    message::{ChatMessage, SentAt},
};

pub const CONNECT_EVENT: &str = "connect";
pub const HISTORY_EVENT: &str = "pesan lama";
pub const CHAT_MESSAGE_EVENT: &str = "chat message";
pub const USER_COUNT_EVENT: &str = "user count";
pub const TYPING_EVENT: &str = "typing";
pub const STOP_TYPING_EVENT: &str = "stop typing";
pub const USER_JOINED_EVENT: &str = "user joined";

/// One named event as carried by a WebSocket text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// Message payload with every field kept loose, so one odd field falls back
/// on its own without taking the rest of the message with it.
#[derive(Debug, Default, Deserialize)]
struct WireMessage {
    username: Option<Value>,
    message: Option<Value>,
    text: Option<Value>,
    timestamp: Option<Value>,
    time: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePresence {
    Bare(u32),
    Object { count: u32 },
}

impl WireMessage {
    fn normalize(self) -> ChatMessage {
        let body = scalar_text(self.message)
            .or_else(|| scalar_text(self.text))
            .unwrap_or_default();

        // A string `timestamp` is a display label; a numeric one is an
        // instant like `time`.
        let sent_at = match self.timestamp {
            Some(Value::String(label)) if !label.is_empty() => SentAt::Preformatted(label),
            Some(number @ Value::Number(_)) => {
                instant(&number).map_or(SentAt::Unknown, SentAt::At)
            }
            _ => self
                .time
                .as_ref()
                .and_then(instant)
                .map_or(SentAt::Unknown, SentAt::At),
        };

        ChatMessage {
            sender: scalar_text(self.username).unwrap_or_default(),
            body,
            sent_at,
        }
    }
}

/// Epoch millis (integer or fractional) or an RFC 3339 string.
fn instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => {
            let ms = number.as_i64().or_else(|| number.as_f64().map(|ms| ms as i64))?;
            Utc.timestamp_millis_opt(ms).single()
        }
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// Non-empty text of a scalar field. Numbers and booleans are stringified;
/// arrays, objects and null count as absent.
fn scalar_text(value: Option<Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Maps a single message payload; undecodable payloads become an empty message.
pub fn decode_message(data: &Value) -> ChatMessage {
    WireMessage::deserialize(data)
        .unwrap_or_default()
        .normalize()
}

/// Maps a history payload. `null` or a non-list payload is an empty history.
pub fn decode_history(data: &Value) -> Vec<ChatMessage> {
    match data {
        Value::Array(entries) => entries.iter().map(decode_message).collect(),
        _ => Vec::new(),
    }
}

pub fn decode_presence(data: &Value) -> Option<u32> {
    match WirePresence::deserialize(data).ok()? {
        WirePresence::Bare(count) | WirePresence::Object { count } => Some(count),
    }
}

/// Decodes a payload by event name. Returns `None` for unknown events or
/// payloads that carry no usable value.
pub fn decode(event: &str, data: &Value) -> Option<InboundEvent> {
    match event {
        CONNECT_EVENT => Some(InboundEvent::Connected),
        HISTORY_EVENT => Some(InboundEvent::HistoryReplay(decode_history(data))),
        CHAT_MESSAGE_EVENT => Some(InboundEvent::NewMessage(decode_message(data))),
        USER_COUNT_EVENT => decode_presence(data).map(InboundEvent::PresenceUpdate),
        TYPING_EVENT => Some(InboundEvent::Typing),
        STOP_TYPING_EVENT => Some(InboundEvent::StopTyping),
        _ => None,
    }
}

pub fn encode(event: &OutboundEvent) -> Frame {
    match event {
        OutboundEvent::UserJoined(name) => Frame::new(USER_JOINED_EVENT, json!(name)),
        OutboundEvent::ChatMessage { username, message } => Frame::new(
            CHAT_MESSAGE_EVENT,
            json!({ "username": username, "message": message }),
        ),
        OutboundEvent::Typing(name) => Frame::new(TYPING_EVENT, json!(name)),
        OutboundEvent::StopTyping => Frame::new(STOP_TYPING_EVENT, Value::Null),
    }
}
