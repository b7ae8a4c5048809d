//! Joining the chat under a display name.

use crate::domain::{events::OutboundEvent, session::Session};

use super::contracts::EventEmitter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Display name is empty after trimming whitespace.
    EmptyName,
    /// The session already joined; there is no second join.
    AlreadyJoined,
}

/// Activates `session` under the trimmed name and returns it.
///
/// Validation failures leave the session untouched. The server learns about
/// the join only through [`announce`], which the caller sends once the
/// connection is up.
pub fn join(session: &mut Session, display_name: &str) -> Result<String, JoinError> {
    if session.is_active() {
        return Err(JoinError::AlreadyJoined);
    }

    let name = session
        .activate(display_name)
        .map(ToOwned::to_owned)
        .ok_or(JoinError::EmptyName)?;

    tracing::info!(display_name = %name, "joined chat");
    Ok(name)
}

/// Emits the `user joined` event for an activated session.
pub fn announce(emitter: &mut dyn EventEmitter, display_name: String) {
    emitter.emit_event(OutboundEvent::UserJoined(display_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingEmitter;

    #[test]
    fn rejects_empty_name() {
        let mut session = Session::default();

        let result = join(&mut session, "");

        assert_eq!(result, Err(JoinError::EmptyName));
        assert!(!session.is_active());
    }

    #[test]
    fn rejects_whitespace_only_name() {
        let mut session = Session::default();

        let result = join(&mut session, "   ");

        assert_eq!(result, Err(JoinError::EmptyName));
        assert!(!session.is_active());
    }

    #[test]
    fn activates_session_with_trimmed_name() {
        let mut session = Session::default();

        let name = join(&mut session, "  Alice  ").expect("join should succeed");

        assert_eq!(name, "Alice");
        assert!(session.is_active());
        assert_eq!(session.display_name(), "Alice");
    }

    #[test]
    fn second_join_is_rejected() {
        let mut session = Session::default();
        join(&mut session, "Alice").expect("join should succeed");

        let result = join(&mut session, "Bob");

        assert_eq!(result, Err(JoinError::AlreadyJoined));
        assert_eq!(session.display_name(), "Alice");
    }

    #[test]
    fn announce_emits_user_joined() {
        let mut emitter = RecordingEmitter::default();

        announce(&mut emitter, "Alice".to_owned());

        assert_eq!(
            emitter.emitted,
            vec![OutboundEvent::UserJoined("Alice".to_owned())]
        );
    }
}
