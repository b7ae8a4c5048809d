use super::message::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    /// Bracketed paste, delivered as one edit.
    Paste(String),
    Inbound(InboundEvent),
    ConnectivityChanged(ConnectivityStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Server events after normalization at the channel boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Connected,
    HistoryReplay(Vec<ChatMessage>),
    NewMessage(ChatMessage),
    PresenceUpdate(u32),
    Typing,
    StopTyping,
}

/// Events the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    UserJoined(String),
    ChatMessage { username: String, message: String },
    Typing(String),
    StopTyping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}
