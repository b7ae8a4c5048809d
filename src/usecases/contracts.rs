use anyhow::Result;

use crate::domain::{
    events::{AppEvent, OutboundEvent},
    shell_state::ShellState,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Fire-and-forget sink for events bound to the server.
pub trait EventEmitter {
    fn emit_event(&mut self, event: OutboundEvent);
}

impl<T: EventEmitter + ?Sized> EventEmitter for &mut T {
    fn emit_event(&mut self, event: OutboundEvent) {
        (**self).emit_event(event)
    }
}
