//! Short-lived UI signals driven by inbound events: the "someone is typing"
//! indicator and the online user count.

use std::time::{Duration, Instant};

/// Quiescent window after which the typing indicator expires.
pub const TYPING_DECAY: Duration = Duration::from_millis(2_000);

/// Presence shown before the server reports a count (the local user).
const DEFAULT_PRESENCE: u32 = 1;

/// A cancellable, re-armable one-shot deadline.
///
/// At most one deadline is armed; arming always replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecayTimer {
    deadline: Option<Instant>,
}

impl DecayTimer {
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarms and returns true when the deadline has passed at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingIndicator {
    is_typing: bool,
    timer: DecayTimer,
    decay: Duration,
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::with_decay(TYPING_DECAY)
    }
}

impl TypingIndicator {
    pub fn with_decay(decay: Duration) -> Self {
        Self {
            is_typing: false,
            timer: DecayTimer::default(),
            decay,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn timer(&self) -> &DecayTimer {
        &self.timer
    }

    pub fn on_typing(&mut self, now: Instant) {
        self.is_typing = true;
        self.timer.cancel();
        self.timer.arm(now, self.decay);
    }

    pub fn on_stop_typing(&mut self) {
        self.is_typing = false;
        self.timer.cancel();
    }

    /// Expires the indicator if its deadline passed. Returns true on change.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) && self.is_typing {
            self.is_typing = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceCount(u32);

impl Default for PresenceCount {
    fn default() -> Self {
        Self(DEFAULT_PRESENCE)
    }
}

impl PresenceCount {
    pub fn get(self) -> u32 {
        self.0
    }

    pub fn replace(&mut self, count: u32) {
        self.0 = count;
    }
}

/// All transient signals owned by one chat view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransientSignals {
    typing: TypingIndicator,
    presence: PresenceCount,
}

impl TransientSignals {
    pub fn typing(&self) -> &TypingIndicator {
        &self.typing
    }

    pub fn typing_mut(&mut self) -> &mut TypingIndicator {
        &mut self.typing
    }

    pub fn presence(&self) -> PresenceCount {
        self.presence
    }

    pub fn presence_mut(&mut self) -> &mut PresenceCount {
        &mut self.presence
    }

    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.typing.on_tick(now)
    }

    /// Clears pending timers when the view goes away.
    pub fn teardown(&mut self) {
        self.typing.on_stop_typing();
    }
}
