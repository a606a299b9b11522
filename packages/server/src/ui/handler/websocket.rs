//! WebSocket relay handler.
//!
//! Each connection runs two tasks:
//! - a reader that decodes inbound frames and relays them (and enforces the idle timeout)
//! - a pusher that drains the bounded outbound queue to the socket and sends keepalive pings
//!
//! When the registry evicts the connection, the reader is stopped at once and the
//! pusher gets `EVICTION_DRAIN_TIMEOUT` to flush what was queued and send Close.

use std::{ops::ControlFlow, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, MalformedFrame, OutboundFrame, RelayError},
    infrastructure::dto::conversion::{decode_chat_frame, encode_chat_frame},
    ui::state::AppState,
};

/// How long an evicted connection's pusher may keep flushing before the socket is dropped.
const EVICTION_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// `GET /ws`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let max_message_bytes = state.relay_config.max_message_bytes;
    ws.max_message_size(max_message_bytes)
        .max_frame_size(max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return;
        }
    };

    // The registry holds the only sender: eviction closes the queue.
    let (tx, rx) = mpsc::channel(state.relay_config.outbound_queue_capacity);

    let (mut connection, mut evicted) = match state
        .connect_peer_usecase
        .execute(connection_id, tx)
        .await
    {
        Ok(registered) => registered,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };

    let (sender, receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender, state.relay_config.ping_interval);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        connection.id.clone(),
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
        Ok(cause) = &mut evicted => {
            recv_task.abort();
            tracing::info!("Connection '{}' evicted ({}), closing", connection.id, cause);
            if tokio::time::timeout(EVICTION_DRAIN_TIMEOUT, &mut send_task)
                .await
                .is_err()
            {
                send_task.abort();
            }
        }
    };

    state.disconnect_peer_usecase.execute(&mut connection).await;
}

/// Drains the outbound queue to the socket and pings every `ping_interval`.
///
/// When the queue is closed (the connection was evicted), the frames already
/// queued are sent first, then a Close frame.
fn pusher_loop(
    mut rx: mpsc::Receiver<OutboundFrame>,
    mut sender: SplitSink<WebSocket, Message>,
    ping_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ping = tokio::time::interval_at(Instant::now() + ping_interval, ping_interval);

        loop {
            tokio::select! {
                frame = rx.recv() => {
                    let Some(frame) = frame else {
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    };
                    if sender.send(Message::Text(frame.to_string().into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Reads frames until the peer closes, errors, or stays silent for `idle_timeout`.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    let idle_timeout = state.relay_config.idle_timeout;

    loop {
        let message = match tokio::time::timeout(idle_timeout, receiver.next()).await {
            Ok(Some(Ok(message))) => message,
            Ok(Some(Err(e))) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            Ok(None) => break,
            Err(_) => {
                tracing::info!(
                    "Connection '{}' idle for {:?}, closing",
                    connection_id,
                    idle_timeout
                );
                break;
            }
        };

        match message {
            Message::Text(text) => {
                if relay_text_frame(&state, &connection_id, text.as_str())
                    .await
                    .is_break()
                {
                    break;
                }
            }
            Message::Binary(data) => {
                reject_frame(&connection_id, MalformedFrame::Binary { len: data.len() });
            }
            Message::Ping(_) | Message::Pong(_) => {
                tracing::trace!("Keepalive from '{}'", connection_id);
            }
            Message::Close(_) => {
                tracing::debug!("Connection '{}' requested close", connection_id);
                break;
            }
        }
    }
}

/// Relays one text frame. Breaks when the connection may no longer relay.
async fn relay_text_frame(
    state: &AppState,
    from: &ConnectionId,
    payload: &str,
) -> ControlFlow<()> {
    let message = match decode_chat_frame(payload, &state.relay_config) {
        Ok(message) => message,
        Err(e) => {
            reject_frame(from, e);
            return ControlFlow::Continue(());
        }
    };

    let frame = match encode_chat_frame(&message) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("Failed to encode frame from '{}': {}", from, e);
            return ControlFlow::Continue(());
        }
    };

    match state
        .relay_message_usecase
        .execute(from, &message, frame)
        .await
    {
        Ok(_) => ControlFlow::Continue(()),
        Err(e) => {
            tracing::info!("Stopped reading from '{}': {}", from, e);
            ControlFlow::Break(())
        }
    }
}

/// Malformed frames are dropped; the connection stays open.
fn reject_frame(from: &ConnectionId, reason: MalformedFrame) {
    let error = RelayError::from(reason);
    tracing::warn!("Dropped frame from '{}': {}", from, error);
}
