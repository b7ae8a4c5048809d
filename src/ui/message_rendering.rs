//! Message list rendering logic.
//!
//! Handles visual formatting of messages including:
//! - Multi-line message display (time + sender on first line, text below)
//! - Sender grouping (consecutive messages from same sender show name only once)
//! - `You` labelling for the user's own messages

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::message::ChatMessage;

use super::styles;

/// Shown in place of a message body that is empty.
pub const EMPTY_MESSAGE_LABEL: &str = "[Empty message]";

/// Shown when the log holds no messages at all.
pub const EMPTY_LOG_PLACEHOLDER: &str = "No messages yet. Start the conversation!";

/// Represents a visual element in the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// Shown alone when there is nothing to list.
    Placeholder,
    /// A message with optional sender display.
    Message {
        time: String,
        sender: Option<String>,
        own: bool,
        content: String,
    },
}

/// Builds the visual elements for `messages`, grouping consecutive messages
/// from the same sender. `own_name` is the joined display name, empty if the
/// user has not joined yet.
pub fn build_message_list_elements(
    messages: &[ChatMessage],
    own_name: &str,
) -> Vec<MessageListElement> {
    if messages.is_empty() {
        return vec![MessageListElement::Placeholder];
    }

    let mut elements = Vec::with_capacity(messages.len());
    let mut prev_sender: Option<&str> = None;

    for message in messages {
        let label = message.sender_label(own_name);
        let sender = (prev_sender != Some(label)).then(|| label.to_owned());

        elements.push(MessageListElement::Message {
            time: message.sent_at.display(),
            sender,
            own: message.is_from(own_name),
            content: message.body.clone(),
        });

        prev_sender = Some(label);
    }

    elements
}

/// Converts a list element to a ListItem for ratatui rendering.
pub fn element_to_list_item(element: &MessageListElement) -> ListItem<'static> {
    match element {
        MessageListElement::Placeholder => ListItem::new(Line::from(Span::styled(
            EMPTY_LOG_PLACEHOLDER,
            styles::placeholder_style(),
        ))),
        MessageListElement::Message {
            time,
            sender,
            own,
            content,
        } => message_item(time, sender.as_deref(), *own, content),
    }
}

fn message_item(time: &str, sender: Option<&str>, own: bool, content: &str) -> ListItem<'static> {
    let mut lines = Vec::new();
    let indent = "      "; // aligns with the time column

    if let Some(name) = sender {
        let sender_style = if own {
            styles::own_sender_style()
        } else {
            styles::message_sender_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>5} ", time), styles::message_time_style()),
            Span::styled(format!("{name}:"), sender_style),
        ]));
        lines.extend(content_lines(content).map(|spans| {
            let mut line = vec![Span::raw(indent)];
            line.extend(spans);
            Line::from(line)
        }));
    } else {
        let mut rows = content_lines(content);
        if let Some(first) = rows.next() {
            let mut spans = vec![Span::styled(
                format!("{:>5} ", time),
                styles::message_time_style(),
            )];
            spans.extend(first);
            lines.push(Line::from(spans));
        }
        lines.extend(rows.map(|spans| {
            let mut line = vec![Span::raw(indent)];
            line.extend(spans);
            Line::from(line)
        }));
    }

    ListItem::new(lines)
}

/// One span list per body line; an empty body yields the empty marker.
fn content_lines(content: &str) -> impl Iterator<Item = Vec<Span<'static>>> + '_ {
    let marker = content
        .is_empty()
        .then(|| vec![Span::styled(EMPTY_MESSAGE_LABEL, styles::placeholder_style())]);

    content
        .lines()
        .map(|text| vec![Span::styled(text.to_owned(), styles::message_text_style())])
        .chain(marker)
}
