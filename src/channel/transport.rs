use std::sync::mpsc::Sender;

use super::{error::ChannelError, wire::Frame};

/// A bidirectional carrier of named event frames.
///
/// Reconnects and backoff are the transport's business; the adapter only
/// sees frames arrive (or stop arriving).
pub trait Transport {
    /// Starts delivering inbound frames to `inbound`.
    fn open(&mut self, inbound: Sender<Frame>) -> Result<(), ChannelError>;

    fn send(&mut self, frame: Frame) -> Result<(), ChannelError>;

    fn close(&mut self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn open(&mut self, inbound: Sender<Frame>) -> Result<(), ChannelError> {
        (**self).open(inbound)
    }

    fn send(&mut self, frame: Frame) -> Result<(), ChannelError> {
        (**self).send(frame)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
