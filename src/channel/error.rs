use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel is not connected")]
    NotConnected,
    #[error("channel transport is closed")]
    Closed,
    #[error("failed to start channel runtime: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to encode frame for event `{event}`: {source}")]
    Encode {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
