//! Event channel layer: named publish/subscribe over a server connection.

mod adapter;
mod error;
#[cfg(test)]
pub mod memory;
mod transport;
pub mod websocket;
pub mod wire;

pub use adapter::EventChannel;
pub use error::ChannelError;
pub use transport::Transport;

/// Returns the channel module name for smoke checks.
pub fn module_name() -> &'static str {
    "channel"
}
