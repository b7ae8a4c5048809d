//! Domain layer: chat entities and state transitions.

pub mod composer;
pub mod events;
pub mod message;
pub mod message_log;
pub mod session;
pub mod shell_state;
pub mod signals;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
