use std::{
    collections::{HashMap, VecDeque},
    sync::mpsc::{self, Receiver},
};

use serde::Serialize;
use serde_json::Value;

use crate::{domain::events::OutboundEvent, usecases::contracts::EventEmitter};

use super::{
    error::ChannelError,
    transport::Transport,
    wire::{self, Frame},
};

/// Frames kept for event names nobody has subscribed to yet.
const PENDING_FRAME_LIMIT: usize = 256;

const CHANNEL_OPENED: &str = "CHANNEL_OPENED";
const CHANNEL_CLOSED: &str = "CHANNEL_CLOSED";
const CHANNEL_HANDLER_REPLACED: &str = "CHANNEL_HANDLER_REPLACED";
const CHANNEL_PENDING_OVERFLOW: &str = "CHANNEL_PENDING_OVERFLOW";
const CHANNEL_EMIT_FAILED: &str = "CHANNEL_EMIT_FAILED";

pub type Handler = Box<dyn FnMut(&Value)>;

/// Outcome of [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    Installed,
    /// A handler was already registered for the name and has been dropped.
    Replaced,
}

/// Named publish/subscribe channel over a [`Transport`].
///
/// Owns at most one handler per event name. Inbound frames are dispatched
/// only from [`EventChannel::pump`], on the caller's thread; frames for names
/// without a handler wait in a bounded queue until one subscribes.
pub struct EventChannel<T: Transport> {
    transport: T,
    inbound: Option<Receiver<Frame>>,
    handlers: HashMap<String, Handler>,
    pending: VecDeque<Frame>,
}

impl<T: Transport> EventChannel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            inbound: None,
            handlers: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inbound.is_some()
    }

    /// Opens the transport. Calling it again on an open channel is a no-op.
    pub fn connect(&mut self) -> Result<(), ChannelError> {
        if self.is_open() {
            return Ok(());
        }

        let (inbound_tx, inbound_rx) = mpsc::channel();
        self.transport.open(inbound_tx)?;
        self.inbound = Some(inbound_rx);

        tracing::info!(code = CHANNEL_OPENED, "event channel opened");
        Ok(())
    }

    pub fn subscribe<F>(&mut self, event: &str, handler: F) -> Subscription
    where
        F: FnMut(&Value) + 'static,
    {
        let outcome = match self.handlers.insert(event.to_owned(), Box::new(handler)) {
            Some(_) => {
                tracing::warn!(
                    code = CHANNEL_HANDLER_REPLACED,
                    event,
                    "existing handler replaced"
                );
                Subscription::Replaced
            }
            None => Subscription::Installed,
        };

        self.flush_pending(event);
        outcome
    }

    pub fn unsubscribe(&mut self, event: &str) -> bool {
        self.handlers.remove(event).is_some()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_subscribed(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Sends an event without waiting for, or reporting, delivery.
    pub fn emit<P>(&mut self, event: &str, payload: P)
    where
        P: Serialize,
    {
        let result = serde_json::to_value(payload)
            .map_err(|source| ChannelError::Encode {
                event: event.to_owned(),
                source,
            })
            .and_then(|data| self.send_frame(Frame::new(event, data)));

        if let Err(error) = result {
            tracing::warn!(
                code = CHANNEL_EMIT_FAILED,
                event,
                error = %error,
                "outbound event dropped"
            );
        }
    }

    /// Dispatches every inbound frame received so far. Returns how many
    /// frames reached a handler.
    pub fn pump(&mut self) -> usize {
        let frames: Vec<Frame> = match &self.inbound {
            Some(inbound) => inbound.try_iter().collect(),
            None => return 0,
        };

        frames
            .into_iter()
            .map(|frame| self.dispatch(frame))
            .filter(|dispatched| *dispatched)
            .count()
    }

    /// Detaches all handlers, drops buffered frames and closes the transport.
    pub fn close(&mut self) {
        self.handlers.clear();
        self.pending.clear();

        if self.inbound.take().is_some() {
            self.transport.close();
            tracing::info!(code = CHANNEL_CLOSED, "event channel closed");
        }
    }

    fn send_frame(&mut self, frame: Frame) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::NotConnected);
        }
        self.transport.send(frame)
    }

    fn dispatch(&mut self, frame: Frame) -> bool {
        tracing::debug!(event = %frame.event, "inbound event received");

        match self.handlers.get_mut(&frame.event) {
            Some(handler) => {
                handler(&frame.data);
                true
            }
            None => {
                self.buffer(frame);
                false
            }
        }
    }

    fn buffer(&mut self, frame: Frame) {
        if self.pending.len() >= PENDING_FRAME_LIMIT {
            if let Some(dropped) = self.pending.pop_front() {
                tracing::warn!(
                    code = CHANNEL_PENDING_OVERFLOW,
                    event = %dropped.event,
                    "oldest unhandled inbound event dropped"
                );
            }
        }
        self.pending.push_back(frame);
    }

    fn flush_pending(&mut self, event: &str) {
        let Some(handler) = self.handlers.get_mut(event) else {
            return;
        };

        let (matching, rest): (VecDeque<Frame>, VecDeque<Frame>) = self
            .pending
            .drain(..)
            .partition(|frame| frame.event == event);
        self.pending = rest;

        for frame in matching {
            handler(&frame.data);
        }
    }
}

impl<T: Transport> EventEmitter for EventChannel<T> {
    fn emit_event(&mut self, event: OutboundEvent) {
        let frame = wire::encode(&event);
        self.emit(&frame.event, frame.data);
    }
}

impl<T: Transport> Drop for EventChannel<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use serde_json::json;

    use super::*;
    use crate::channel::memory::MemoryTransport;

    fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl FnMut(&Value) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |data: &Value| sink.borrow_mut().push(data.clone()))
    }

    #[test]
    fn connect_is_idempotent() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);

        channel.connect().expect("first connect should succeed");
        channel.connect().expect("second connect should be a no-op");

        assert_eq!(handle.open_count(), 1);
        assert!(channel.is_open());
    }

    #[test]
    fn dispatches_frames_to_the_subscribed_handler() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");
        let (seen, handler) = recorder();
        channel.subscribe("typing", handler);

        handle.deliver(Frame::new("typing", json!("Bob")));
        handle.deliver(Frame::new("typing", json!("Eve")));

        assert_eq!(channel.pump(), 2);
        assert_eq!(*seen.borrow(), vec![json!("Bob"), json!("Eve")]);
    }

    #[test]
    fn second_subscription_replaces_the_first() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();

        assert_eq!(channel.subscribe("typing", first), Subscription::Installed);
        assert_eq!(channel.subscribe("typing", second), Subscription::Replaced);

        handle.deliver(Frame::new("typing", Value::Null));
        channel.pump();

        assert!(first_seen.borrow().is_empty());
        assert_eq!(second_seen.borrow().len(), 1);
    }

    #[test]
    fn frames_before_subscribe_are_flushed_in_order() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");

        handle.deliver(Frame::new("chat message", json!(1)));
        handle.deliver(Frame::new("typing", Value::Null));
        handle.deliver(Frame::new("chat message", json!(2)));
        assert_eq!(channel.pump(), 0);

        let (seen, handler) = recorder();
        channel.subscribe("chat message", handler);

        assert_eq!(*seen.borrow(), vec![json!(1), json!(2)]);
        assert!(!channel.pending.is_empty(), "typing frame stays buffered");
    }

    #[test]
    fn pending_queue_is_bounded() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");

        for idx in 0..(PENDING_FRAME_LIMIT + 10) {
            handle.deliver(Frame::new("chat message", json!(idx)));
        }
        channel.pump();

        assert_eq!(channel.pending.len(), PENDING_FRAME_LIMIT);
        assert_eq!(
            channel.pending.front().map(|frame| frame.data.clone()),
            Some(json!(10))
        );
    }

    #[test]
    fn unsubscribe_removes_handler() {
        let (transport, _handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        let (_seen, handler) = recorder();
        channel.subscribe("typing", handler);

        assert!(channel.unsubscribe("typing"));
        assert!(!channel.unsubscribe("typing"));
        assert!(!channel.is_subscribed("typing"));
    }

    #[test]
    fn emit_sends_frame_through_transport() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");

        channel.emit("user joined", "Alice");

        assert_eq!(handle.sent(), vec![Frame::new("user joined", json!("Alice"))]);
    }

    #[test]
    fn emit_before_connect_is_dropped() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);

        channel.emit("user joined", "Alice");

        assert!(handle.sent().is_empty());
    }

    #[test]
    fn outbound_events_are_encoded_on_emit() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");

        channel.emit_event(OutboundEvent::StopTyping);

        assert_eq!(handle.sent(), vec![Frame::new("stop typing", Value::Null)]);
    }

    #[test]
    fn close_detaches_handlers_and_closes_transport() {
        let (transport, handle) = MemoryTransport::new();
        let mut channel = EventChannel::new(transport);
        channel.connect().expect("connect should succeed");
        let (seen, handler) = recorder();
        channel.subscribe("typing", handler);

        channel.close();
        handle.deliver(Frame::new("typing", Value::Null));

        assert_eq!(channel.pump(), 0);
        assert!(seen.borrow().is_empty());
        assert!(!channel.is_subscribed("typing"));
        assert!(handle.is_closed());
    }
}
