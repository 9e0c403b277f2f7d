//! WebSocket handler
//!
//! Accepts upgrades, replays history, and relays chat and reaction frames.

use crate::connection::{Connection, ConnectionState};
use crate::protocol::{decode, OutboundFrame, Request};
use crate::server::RelayState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Channel buffer size for outgoing frames
const FRAME_BUFFER_SIZE: usize = 100;

/// WebSocket upgrade handler
pub async fn ws_handler(State(state): State<RelayState>, ws: WebSocketUpgrade) -> Response {
    if state.is_closing() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    ws.on_upgrade(|socket| handle_socket(state, socket))
        .into_response()
}

/// Drive one upgraded WebSocket connection to completion
async fn handle_socket(state: RelayState, socket: WebSocket) {
    let connection_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::channel::<String>(FRAME_BUFFER_SIZE);

    let connection = Arc::new(Connection::new(connection_id.clone(), tx));
    connection.set_state(ConnectionState::Open).await;
    state.registry().add(connection.clone());

    tracing::info!(
        connection_id = %connection_id,
        connections = state.registry().count(),
        "WebSocket connection established"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Replay history before any live traffic is read from this peer.
    send_history(&state, &connection).await;

    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Receive frames from the peer.
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    handle_frame(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                    Ok(text) => handle_frame(&state_recv, &connection_recv, text).await,
                    Err(_) => {
                        tracing::warn!(
                            connection_id = %connection_recv.id(),
                            "Dropping binary frame that is not valid UTF-8"
                        );
                    }
                },
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        connection_id = %connection_recv.id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let connection_send = connection.clone();

    // Drain the outbound queue into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(json) = rx.recv().await {
            if ws_sink.send(Message::Text(json)).await.is_err() {
                tracing::warn!(
                    connection_id = %connection_send.id(),
                    "Failed to write frame to socket"
                );
                break;
            }
        }

        let _ = ws_sink.close().await;
    });

    // Whichever side finishes first ends the connection; the other task is
    // left to drain. In-flight store work keeps running to completion.
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    state.registry().remove(&connection_id).await;

    tracing::info!(
        connection_id = %connection_id,
        connections = state.registry().count(),
        "Connection closed"
    );
}

/// Replay the full message history to a newly connected client.
///
/// A build fault is logged and the replay skipped; the connection stays open.
async fn send_history(state: &RelayState, connection: &Connection) {
    let entries = match state.assembler().build().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                connection_id = %connection.id(),
                error = %e,
                "Failed to build history; skipping replay"
            );
            return;
        }
    };

    let frame = OutboundFrame::history(entries);
    let Ok(json) = frame.to_json() else {
        tracing::error!(
            connection_id = %connection.id(),
            "Failed to serialize history frame"
        );
        return;
    };

    if connection.send(json).await.is_err() {
        tracing::warn!(
            connection_id = %connection.id(),
            "Failed to enqueue history frame"
        );
    }
}

/// Decode one inbound frame and apply it. Undecodable frames are dropped.
async fn handle_frame(state: &RelayState, connection: &Connection, raw: &str) {
    match decode(raw) {
        Ok(request) => handle_request(state, connection, request).await,
        Err(e) => {
            tracing::warn!(
                connection_id = %connection.id(),
                error = %e,
                "Dropping undecodable frame"
            );
        }
    }
}

/// Apply a decoded request: persist, then fan the result out to every
/// connection including the originator.
///
/// A failed chat append is logged and dropped; the sender gets no error
/// frame. The publish lock is held across persist and enqueue so delivery
/// order matches id order on every connection.
async fn handle_request(state: &RelayState, connection: &Connection, request: Request) {
    match request {
        Request::Chat(chat) => {
            let _publish = state.publish_lock().lock().await;

            let message = match state.messages().append(&chat.sender, &chat.text).await {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        error = %e,
                        "Failed to persist chat message; dropping"
                    );
                    return;
                }
            };

            tracing::debug!(
                connection_id = %connection.id(),
                message_id = %message.id,
                "Chat message persisted"
            );

            let frame = OutboundFrame::chat(&message);
            state.router().broadcast(&frame, None).await;
        }
        Request::Reaction(reaction) => {
            let _publish = state.publish_lock().lock().await;

            if let Err(e) = state
                .reactions()
                .append(reaction.message_id, &reaction.emoji, &reaction.user)
                .await
            {
                if e.is_referential_violation() {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        message_id = %reaction.message_id,
                        "Reaction references unknown message; dropping"
                    );
                } else {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        error = %e,
                        "Failed to persist reaction; dropping"
                    );
                }
                return;
            }

            let tallies = match state.reactions().tally(reaction.message_id).await {
                Ok(tallies) => tallies,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        message_id = %reaction.message_id,
                        error = %e,
                        "Failed to tally reactions after append"
                    );
                    return;
                }
            };

            let frame = OutboundFrame::reaction(reaction.message_id, tallies);
            state.router().broadcast(&frame, None).await;
        }
    }
}
