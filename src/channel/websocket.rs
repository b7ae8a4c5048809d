use std::{
    sync::{mpsc::Sender, Arc},
    time::Duration,
};

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{
    net::TcpStream,
    runtime::Runtime,
    sync::{
        mpsc::{self as tokio_mpsc, UnboundedReceiver, UnboundedSender},
        watch,
    },
};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::domain::events::ConnectivityStatus;

use super::{
    error::ChannelError,
    transport::Transport,
    wire::{Frame, CONNECT_EVENT},
};

const WS_CONNECTED: &str = "CHANNEL_WS_CONNECTED";
const WS_CONNECT_FAILED: &str = "CHANNEL_WS_CONNECT_FAILED";
const WS_CONNECTION_LOST: &str = "CHANNEL_WS_CONNECTION_LOST";
const WS_STOPPED: &str = "CHANNEL_WS_STOPPED";
const WS_MALFORMED_FRAME: &str = "CHANNEL_WS_MALFORMED_FRAME";
const WS_OUTBOUND_DROPPED: &str = "CHANNEL_WS_OUTBOUND_DROPPED";

const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

pub type StatusCallback = Arc<dyn Fn(ConnectivityStatus) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub url: String,
    pub reconnect_delay: Duration,
}

/// WebSocket transport carrying one JSON [`Frame`] per text message.
///
/// Runs its connection loop on a private tokio runtime. Lost connections are
/// retried after `reconnect_delay`; frames sent while not connected are
/// dropped, not queued.
pub struct WebSocketTransport {
    settings: ConnectionSettings,
    on_status: StatusCallback,
    runtime: Option<Runtime>,
    outbound_tx: Option<UnboundedSender<Frame>>,
    stop_tx: Option<watch::Sender<bool>>,
}

enum SessionEnd {
    Stopped,
    Lost,
}

impl WebSocketTransport {
    pub fn new(settings: ConnectionSettings, on_status: StatusCallback) -> Self {
        Self {
            settings,
            on_status,
            runtime: None,
            outbound_tx: None,
            stop_tx: None,
        }
    }
}

impl Transport for WebSocketTransport {
    fn open(&mut self, inbound: Sender<Frame>) -> Result<(), ChannelError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("seachat-channel")
            .enable_all()
            .build()
            .map_err(ChannelError::RuntimeInit)?;

        let (outbound_tx, outbound_rx) = tokio_mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);

        runtime.spawn(run_connection(
            self.settings.clone(),
            inbound,
            outbound_rx,
            stop_rx,
            Arc::clone(&self.on_status),
        ));

        self.runtime = Some(runtime);
        self.outbound_tx = Some(outbound_tx);
        self.stop_tx = Some(stop_tx);
        Ok(())
    }

    fn send(&mut self, frame: Frame) -> Result<(), ChannelError> {
        let outbound = self.outbound_tx.as_ref().ok_or(ChannelError::NotConnected)?;
        outbound.send(frame).map_err(|_| ChannelError::Closed)
    }

    fn close(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
        self.outbound_tx = None;

        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
        }
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_connection(
    settings: ConnectionSettings,
    inbound: Sender<Frame>,
    mut outbound: UnboundedReceiver<Frame>,
    mut stop_rx: watch::Receiver<bool>,
    on_status: StatusCallback,
) {
    loop {
        on_status(ConnectivityStatus::Connecting);

        let connect = connect_async(settings.url.as_str());
        tokio::pin!(connect);
        let result = loop {
            tokio::select! {
                _ = stop_rx.changed() => {
                    tracing::info!(code = WS_STOPPED, "websocket transport stopped");
                    return;
                }
                result = &mut connect => break result,
                Some(frame) = outbound.recv() => drop_offline(&frame),
            }
        };

        match result {
            Ok((stream, _)) => {
                tracing::info!(code = WS_CONNECTED, url = %settings.url, "websocket connected");
                on_status(ConnectivityStatus::Connected);

                if inbound.send(Frame::new(CONNECT_EVENT, Value::Null)).is_err() {
                    return;
                }

                if let SessionEnd::Stopped =
                    serve(stream, &inbound, &mut outbound, &mut stop_rx).await
                {
                    on_status(ConnectivityStatus::Disconnected);
                    tracing::info!(code = WS_STOPPED, "websocket transport stopped");
                    return;
                }
            }
            Err(error) => {
                tracing::warn!(
                    code = WS_CONNECT_FAILED,
                    url = %settings.url,
                    error = %error,
                    "websocket connect failed"
                );
            }
        }

        on_status(ConnectivityStatus::Disconnected);

        let retry = tokio::time::sleep(settings.reconnect_delay);
        tokio::pin!(retry);
        loop {
            tokio::select! {
                _ = &mut retry => break,
                _ = stop_rx.changed() => {
                    tracing::info!(code = WS_STOPPED, "websocket transport stopped");
                    return;
                }
                Some(frame) = outbound.recv() => drop_offline(&frame),
            }
        }
    }
}

async fn serve(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    inbound: &Sender<Frame>,
    outbound: &mut UnboundedReceiver<Frame>,
    stop_rx: &mut watch::Receiver<bool>,
) -> SessionEnd {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            _ = stop_rx.changed() => {
                let _ = sink.close().await;
                return SessionEnd::Stopped;
            }
            outgoing = outbound.recv() => {
                let Some(frame) = outgoing else {
                    let _ = sink.close().await;
                    return SessionEnd::Stopped;
                };
                let text = match serde_json::to_string(&frame) {
                    Ok(text) => text,
                    Err(error) => {
                        tracing::warn!(event = %frame.event, error = %error, "frame encode failed");
                        continue;
                    }
                };
                if let Err(error) = sink.send(Message::Text(text)).await {
                    tracing::warn!(code = WS_CONNECTION_LOST, error = %error, "websocket send failed");
                    return SessionEnd::Lost;
                }
            }
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => {
                        if inbound.send(frame).is_err() {
                            return SessionEnd::Stopped;
                        }
                    }
                    Err(error) => {
                        tracing::warn!(code = WS_MALFORMED_FRAME, error = %error, "inbound frame ignored");
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    tracing::warn!(code = WS_CONNECTION_LOST, "websocket closed by server");
                    return SessionEnd::Lost;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::warn!(code = WS_CONNECTION_LOST, error = %error, "websocket read failed");
                    return SessionEnd::Lost;
                }
            }
        }
    }
}

fn drop_offline(frame: &Frame) {
    tracing::warn!(
        code = WS_OUTBOUND_DROPPED,
        event = %frame.event,
        "outbound event dropped while disconnected"
    );
}
