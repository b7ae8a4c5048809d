use std::sync::{Mutex, MutexGuard};

use crate::{
    domain::events::OutboundEvent,
    infra::{config::AppConfig, contracts::ConfigAdapter},
    usecases::contracts::EventEmitter,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

/// Emitter that records every outbound event in order.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    pub emitted: Vec<OutboundEvent>,
}

impl EventEmitter for RecordingEmitter {
    fn emit_event(&mut self, event: OutboundEvent) {
        self.emitted.push(event);
    }
}

/// Config source that always yields the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> anyhow::Result<AppConfig> {
        Ok(AppConfig::default())
    }
}
