//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod compose;
pub mod context;
pub mod contracts;
pub mod join;
pub mod send_message;
pub mod shell;
pub mod subscriptions;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
