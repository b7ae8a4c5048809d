//! Typing signals driven by composer edits.

use crate::domain::{composer::ComposerDraft, events::OutboundEvent, session::Session};

use super::contracts::EventEmitter;

/// How the composer reports that the user stopped typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingPolicy {
    /// Emit `stop typing` when an edit leaves the draft blank.
    pub stop_typing_on_empty: bool,
}

impl Default for TypingPolicy {
    fn default() -> Self {
        Self {
            stop_typing_on_empty: true,
        }
    }
}

/// Replaces the draft verbatim and signals the new typing state. A value
/// over the draft limit is rejected: the draft is kept and nothing is
/// signalled. Returns whether the value was accepted.
pub fn update_text(
    draft: &mut ComposerDraft,
    value: &str,
    session: &Session,
    emitter: &mut dyn EventEmitter,
    policy: TypingPolicy,
) -> bool {
    if !draft.set_text(value) {
        tracing::debug!(chars = value.chars().count(), "draft update rejected: too long");
        return false;
    }
    signal_edit(draft, session, emitter, policy);
    true
}

/// Emits `typing` for a draft with content, `stop typing` (per policy) for a
/// blank one.
pub fn signal_edit(
    draft: &ComposerDraft,
    session: &Session,
    emitter: &mut dyn EventEmitter,
    policy: TypingPolicy,
) {
    if draft.has_content() {
        emitter.emit_event(OutboundEvent::Typing(session.display_name().to_owned()));
    } else if policy.stop_typing_on_empty {
        emitter.emit_event(OutboundEvent::StopTyping);
    }
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

    #[test]
    fn non_empty_edit_emits_typing_with_display_name() {
        let mut draft = ComposerDraft::default();
        let mut emitter = RecordingEmitter::default();

        update_text(
            &mut draft,
            "h",
            &joined("Alice"),
            &mut emitter,
            TypingPolicy::default(),
        );

        assert_eq!(draft.text(), "h");
        assert_eq!(
            emitter.emitted,
            vec![OutboundEvent::Typing("Alice".to_owned())]
        );
    }

    #[test]
    fn blank_edit_emits_stop_typing_by_default() {
        let mut draft = ComposerDraft::default();
        let mut emitter = RecordingEmitter::default();

        update_text(
            &mut draft,
            "  ",
            &joined("Alice"),
            &mut emitter,
            TypingPolicy::default(),
        );

        assert_eq!(draft.text(), "  ");
        assert_eq!(emitter.emitted, vec![OutboundEvent::StopTyping]);
    }

    #[test]
    fn over_long_update_keeps_draft_and_stays_silent() {
        let mut draft = ComposerDraft::default();
        draft.set_text("draft");
        let mut emitter = RecordingEmitter::default();

        let accepted = update_text(
            &mut draft,
            &"x".repeat(5_000),
            &joined("Alice"),
            &mut emitter,
            TypingPolicy::default(),
        );

        assert!(!accepted);
        assert_eq!(draft.text(), "draft");
        assert!(emitter.emitted.is_empty());
    }

    #[test]
    fn blank_edit_is_silent_when_policy_disables_stop_typing() {
        let mut draft = ComposerDraft::default();
        let mut emitter = RecordingEmitter::default();

        update_text(
            &mut draft,
            "",
            &joined("Alice"),
            &mut emitter,
            TypingPolicy {
                stop_typing_on_empty: false,
            },
        );

        assert!(emitter.emitted.is_empty());
    }
}
