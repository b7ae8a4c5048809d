//! Routing of inbound channel events into the application event loop.

use std::sync::mpsc::Sender;

use crate::{
    channel::{
        wire::{
            self, CHAT_MESSAGE_EVENT, CONNECT_EVENT, HISTORY_EVENT, STOP_TYPING_EVENT,
            TYPING_EVENT, USER_COUNT_EVENT,
        },
        EventChannel, Transport,
    },
    domain::events::AppEvent,
};

const INBOUND_PAYLOAD_REJECTED: &str = "INBOUND_PAYLOAD_REJECTED";
const INBOUND_SINK_CLOSED: &str = "INBOUND_SINK_CLOSED";

/// Events the chat view listens to for its whole lifetime.
pub const ROUTED_EVENTS: [&str; 6] = [
    CONNECT_EVENT,
    HISTORY_EVENT,
    CHAT_MESSAGE_EVENT,
    USER_COUNT_EVENT,
    TYPING_EVENT,
    STOP_TYPING_EVENT,
];

/// Subscribes one handler per routed event. Each handler normalizes its
/// payload and forwards it to `sink` as [`AppEvent::Inbound`].
pub fn install<T: Transport>(channel: &mut EventChannel<T>, sink: &Sender<AppEvent>) {
    for event in ROUTED_EVENTS {
        let sink = sink.clone();
        channel.subscribe(event, move |data| match wire::decode(event, data) {
            Some(inbound) => {
                if sink.send(AppEvent::Inbound(inbound)).is_err() {
                    tracing::warn!(code = INBOUND_SINK_CLOSED, event, "inbound event dropped");
                }
            }
            None => {
                tracing::warn!(
                    code = INBOUND_PAYLOAD_REJECTED,
                    event,
                    payload = %data,
                    "inbound payload ignored"
                );
            }
        });
    }
}

/// Detaches every routed handler.
pub fn remove<T: Transport>(channel: &mut EventChannel<T>) {
    for event in ROUTED_EVENTS {
        channel.unsubscribe(event);
    }
}
