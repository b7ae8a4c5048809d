use std::time::Instant;

use anyhow::Result;

use crate::{
    channel::{EventChannel, Transport},
    domain::{
        events::{AppEvent, ConnectivityStatus, InboundEvent, KeyInput},
        shell_state::ShellState,
    },
};

use super::{
    compose::{self, TypingPolicy},
    contracts::ShellOrchestrator,
    join::{self, JoinError},
    send_message::{self, SendMessageError},
    subscriptions,
};

pub struct DefaultShellOrchestrator<T: Transport> {
    state: ShellState,
    channel: EventChannel<T>,
    typing_policy: TypingPolicy,
    server_ready: bool,
    /// Name of a join made before the server connection was up.
    pending_announcement: Option<String>,
}

impl<T: Transport> DefaultShellOrchestrator<T> {
    pub fn new(channel: EventChannel<T>, typing_policy: TypingPolicy) -> Self {
        Self {
            state: ShellState::default(),
            channel,
            typing_policy,
            server_ready: false,
            pending_announcement: None,
        }
    }

    /// Joins with `display_name` as if it had been typed into the join form.
    ///
    /// The `user joined` announcement goes out immediately when connected,
    /// otherwise on the first connection.
    pub fn join(&mut self, display_name: &str) {
        match join::join(self.state.session_mut(), display_name) {
            Ok(name) => {
                self.state.name_input_mut().clear();
                if self.server_ready {
                    join::announce(&mut self.channel, name);
                } else {
                    tracing::debug!(
                        display_name = %name,
                        "join announcement deferred until connected"
                    );
                    self.pending_announcement = Some(name);
                }
            }
            Err(JoinError::EmptyName) => tracing::debug!("join ignored: empty display name"),
            Err(JoinError::AlreadyJoined) => tracing::debug!("join ignored: already joined"),
        }
    }

    fn on_server_ready(&mut self) {
        self.server_ready = true;
        if let Some(name) = self.pending_announcement.take() {
            join::announce(&mut self.channel, name);
        }
    }

    fn apply_inbound(&mut self, event: InboundEvent, now: Instant) {
        match event {
            InboundEvent::Connected => {
                tracing::info!("connected to chat server");
                self.on_server_ready();
            }
            InboundEvent::HistoryReplay(messages) => {
                tracing::debug!(count = messages.len(), "history replay received");
                self.state.log_mut().replace(messages);
            }
            InboundEvent::NewMessage(message) => {
                tracing::debug!(sender = %message.sender, "new message received");
                self.state.log_mut().append(message);
            }
            InboundEvent::PresenceUpdate(count) => {
                self.state.signals_mut().presence_mut().replace(count);
            }
            InboundEvent::Typing => self.state.signals_mut().typing_mut().on_typing(now),
            InboundEvent::StopTyping => self.state.signals_mut().typing_mut().on_stop_typing(),
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            if key.key == "c" {
                self.shutdown();
            }
            return;
        }

        if self.state.session().is_active() {
            self.handle_composer_key(&key.key);
        } else {
            self.handle_join_key(&key.key);
        }
    }

    fn handle_join_key(&mut self, key: &str) {
        let input = self.state.name_input_mut();
        match key {
            "enter" => {
                let name = input.text().to_owned();
                self.join(&name);
            }
            "backspace" => {
                input.backspace();
            }
            "delete" => {
                input.delete();
            }
            "left" => input.move_left(),
            "right" => input.move_right(),
            "home" => input.move_home(),
            "end" => input.move_end(),
            other => {
                if let Some(ch) = single_char(other) {
                    input.insert(ch);
                }
            }
        }
    }

    fn handle_composer_key(&mut self, key: &str) {
        let policy = self.typing_policy;
        let (composer, session) = self.state.composer_with_session();

        let edited = match key {
            "enter" => {
                match send_message::send_message(composer, session, &mut self.channel) {
                    Ok(()) => {}
                    Err(SendMessageError::EmptyMessage) => {
                        tracing::debug!("send ignored: empty message")
                    }
                    Err(SendMessageError::NotJoined) => {
                        tracing::debug!("send ignored: session not joined")
                    }
                }
                false
            }
            "backspace" => composer.backspace(),
            "delete" => composer.delete(),
            "left" => {
                composer.move_left();
                false
            }
            "right" => {
                composer.move_right();
                false
            }
            "home" => {
                composer.move_home();
                false
            }
            "end" => {
                composer.move_end();
                false
            }
            other => single_char(other).is_some_and(|ch| composer.insert(ch)),
        };

        if edited {
            compose::signal_edit(composer, session, &mut self.channel, policy);
        }
    }

    fn handle_paste(&mut self, pasted: &str) {
        if !self.state.session().is_active() {
            let input = self.state.name_input_mut();
            pasted.chars().filter(|ch| !ch.is_control()).for_each(|ch| {
                input.insert(ch);
            });
            return;
        }

        let policy = self.typing_policy;
        let (composer, session) = self.state.composer_with_session();
        let value = format!(
            "{}{}{}",
            composer.text_before_cursor(),
            pasted,
            composer.text_after_cursor()
        );
        compose::update_text(composer, &value, session, &mut self.channel, policy);
    }

    fn shutdown(&mut self) {
        subscriptions::remove(&mut self.channel);
        self.channel.close();
        self.state.signals_mut().teardown();
        self.state.stop();
    }
}

impl<T: Transport> ShellOrchestrator for DefaultShellOrchestrator<T> {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        self.handle_event_at(event, Instant::now());
        Ok(())
    }
}

impl<T: Transport> DefaultShellOrchestrator<T> {
    /// Handles `event` as of `now`. Due deadlines expire before every event,
    /// not only on idle ticks.
    fn handle_event_at(&mut self, event: AppEvent, now: Instant) {
        self.channel.pump();

        if self.state.signals_mut().on_tick(now) {
            tracing::debug!("typing indicator expired");
        }

        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.shutdown(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::Paste(text) => self.handle_paste(&text),
            AppEvent::Inbound(inbound) => self.apply_inbound(inbound, now),
            AppEvent::ConnectivityChanged(status) => {
                tracing::info!(status = status.as_label(), "connectivity changed");
                self.state.set_connectivity_status(status);
                match status {
                    ConnectivityStatus::Connected => self.on_server_ready(),
                    ConnectivityStatus::Disconnected => {
                        self.server_ready = false;
                        self.state.signals_mut().typing_mut().on_stop_typing();
                    }
                    ConnectivityStatus::Connecting => {}
                }
            }
        }
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
