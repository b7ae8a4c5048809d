use super::{
    composer::ComposerDraft, events::ConnectivityStatus, message_log::MessageLog,
    session::Session, signals::TransientSignals,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    connectivity_status: ConnectivityStatus,
    session: Session,
    name_input: ComposerDraft,
    composer: ComposerDraft,
    log: MessageLog,
    signals: TransientSignals,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            connectivity_status: ConnectivityStatus::Connecting,
            session: Session::default(),
            name_input: ComposerDraft::default(),
            composer: ComposerDraft::default(),
            log: MessageLog::default(),
            signals: TransientSignals::default(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity_status
    }

    pub fn set_connectivity_status(&mut self, status: ConnectivityStatus) {
        self.connectivity_status = status;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Name typed into the join form.
    pub fn name_input(&self) -> &ComposerDraft {
        &self.name_input
    }

    pub fn name_input_mut(&mut self) -> &mut ComposerDraft {
        &mut self.name_input
    }

    pub fn composer(&self) -> &ComposerDraft {
        &self.composer
    }

    /// Composer and session borrowed together, for sending and typing signals.
    pub fn composer_with_session(&mut self) -> (&mut ComposerDraft, &Session) {
        (&mut self.composer, &self.session)
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    pub fn signals(&self) -> &TransientSignals {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut TransientSignals {
        &mut self.signals
    }
}
