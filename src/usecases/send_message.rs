//! Use case for sending the composer draft to the chat.
//!
//! The message is not appended to the local log here: the server broadcasts
//! it back like any other new message.

use crate::domain::{composer::ComposerDraft, events::OutboundEvent, session::Session};

use super::contracts::EventEmitter;

/// Domain-level errors for the send operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Draft is empty after trimming whitespace.
    EmptyMessage,
    /// The session has not joined yet.
    NotJoined,
}

/// Sends the draft as a chat message.
///
/// The untrimmed draft text is sent under the session's display name, the
/// draft is cleared and a `stop typing` event follows. A blank draft is left
/// untouched and nothing is emitted.
///
/// # Errors
/// Returns `SendMessageError::EmptyMessage` if the draft is empty/whitespace
/// and `SendMessageError::NotJoined` before the session is active.
pub fn send_message(
    draft: &mut ComposerDraft,
    session: &Session,
    emitter: &mut dyn EventEmitter,
) -> Result<(), SendMessageError> {
    if !session.is_active() {
        return Err(SendMessageError::NotJoined);
    }
    if !draft.has_content() {
        return Err(SendMessageError::EmptyMessage);
    }

    emitter.emit_event(OutboundEvent::ChatMessage {
        username: session.display_name().to_owned(),
        message: draft.text().to_owned(),
    });
    tracing::debug!(chars = draft.text().chars().count(), "chat message sent");

    draft.clear();
    emitter.emit_event(OutboundEvent::StopTyping);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingEmitter;

    fn joined(name: &str) -> Session {
        let mut session = Session::default();
        session.activate(name);
        session
    }

    fn draft(text: &str) -> ComposerDraft {
        let mut draft = ComposerDraft::default();
        draft.set_text(text);
        draft
    }

    #[test]
    fn rejects_empty_draft() {
        let mut draft = ComposerDraft::default();
        let mut emitter = RecordingEmitter::default();

        let result = send_message(&mut draft, &joined("Alice"), &mut emitter);

        assert_eq!(result, Err(SendMessageError::EmptyMessage));
        assert!(emitter.emitted.is_empty());
    }

    #[test]
    fn whitespace_only_draft_is_a_no_op() {
        let mut draft = draft("  ");
        let mut emitter = RecordingEmitter::default();

        let result = send_message(&mut draft, &joined("Alice"), &mut emitter);

        assert_eq!(result, Err(SendMessageError::EmptyMessage));
        assert_eq!(draft.text(), "  ", "draft must not be cleared");
        assert!(emitter.emitted.is_empty());
    }

    #[test]
    fn sends_message_then_clears_and_stops_typing() {
        let mut draft = draft("hi");
        let mut emitter = RecordingEmitter::default();

        send_message(&mut draft, &joined("Alice"), &mut emitter).expect("send should succeed");

        assert_eq!(draft.text(), "");
        assert_eq!(
            emitter.emitted,
            vec![
                OutboundEvent::ChatMessage {
                    username: "Alice".to_owned(),
                    message: "hi".to_owned(),
                },
                OutboundEvent::StopTyping,
            ]
        );
    }

    #[test]
    fn sends_untrimmed_text() {
        let mut draft = draft("  hello world  ");
        let mut emitter = RecordingEmitter::default();

        send_message(&mut draft, &joined("Alice"), &mut emitter).expect("send should succeed");

        assert!(matches!(
            &emitter.emitted[0],
            OutboundEvent::ChatMessage { message, .. } if message == "  hello world  "
        ));
    }

    #[test]
    fn rejects_send_before_join() {
        let mut draft = draft("hi");
        let mut emitter = RecordingEmitter::default();

        let result = send_message(&mut draft, &Session::default(), &mut emitter);

        assert_eq!(result, Err(SendMessageError::NotJoined));
        assert_eq!(draft.text(), "hi");
        assert!(emitter.emitted.is_empty());
    }
}
