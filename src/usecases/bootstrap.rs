use std::{
    path::Path,
    sync::{
        mpsc::{self, Sender},
        Arc,
    },
    time::Duration,
};

use crate::{
    channel::{
        websocket::{ConnectionSettings, StatusCallback, WebSocketTransport},
        EventChannel, Transport,
    },
    domain::events::AppEvent,
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    ui::TerminalEventSource,
    usecases::{
        compose::TypingPolicy,
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
        subscriptions,
    },
};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub display_name: Option<String>,
}

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<AppContext, AppError> {
    let config = build_config(&FileConfigAdapter::new(config_path), overrides)?;
    let layout = StorageLayout::resolve()?;
    let log_guard = infra::logging::init(&config.logging, &layout)?;

    tracing::info!(log_file = %layout.log_file().display(), "logging initialized");
    Ok(AppContext::new(config, Some(log_guard)))
}

/// Loads config without touching the global logger. Used by `show-config`.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<infra::config::AppConfig, AppError> {
    build_config(&FileConfigAdapter::new(config_path), overrides)
}

fn build_config(
    adapter: &dyn ConfigAdapter,
    overrides: &Overrides,
) -> Result<infra::config::AppConfig, AppError> {
    let mut config = adapter.load().map_err(AppError::Other)?;

    if let Some(url) = overrides.server_url.as_ref() {
        config.server.url = url.clone();
    }

    Ok(config)
}

/// Wires the live channel, its subscriptions, and the terminal event source
/// into a ready-to-run shell.
pub fn compose_shell(
    context: &AppContext,
    display_name: Option<&str>,
) -> Result<ShellComposition, AppError> {
    let (app_tx, app_rx) = mpsc::channel();

    let settings = ConnectionSettings {
        url: context.config.server.url.clone(),
        reconnect_delay: Duration::from_millis(context.config.server.reconnect_delay_ms),
    };
    let transport = WebSocketTransport::new(settings, status_forwarder(app_tx.clone()));
    let policy = TypingPolicy {
        stop_typing_on_empty: context.config.composer.stop_typing_on_empty,
    };
    let orchestrator = assemble(transport, &app_tx, policy, display_name)?;

    Ok(ShellComposition {
        event_source: Box::new(TerminalEventSource::new(app_rx)),
        orchestrator: Box::new(orchestrator),
    })
}

/// Connects `transport`, routes its events to `app_tx` and joins under
/// `display_name` if one was given. The join is announced once the server
/// connection comes up.
fn assemble<T: Transport>(
    transport: T,
    app_tx: &Sender<AppEvent>,
    policy: TypingPolicy,
    display_name: Option<&str>,
) -> Result<DefaultShellOrchestrator<T>, AppError> {
    let mut channel = EventChannel::new(transport);
    channel.connect()?;
    subscriptions::install(&mut channel, app_tx);

    let mut orchestrator = DefaultShellOrchestrator::new(channel, policy);
    if let Some(name) = display_name {
        orchestrator.join(name);
    }

    Ok(orchestrator)
}

fn status_forwarder(sink: Sender<AppEvent>) -> StatusCallback {
    Arc::new(move |status| {
        if sink.send(AppEvent::ConnectivityChanged(status)).is_err() {
            tracing::debug!(status = status.as_label(), "status dropped: app loop gone");
        }
    })
}
