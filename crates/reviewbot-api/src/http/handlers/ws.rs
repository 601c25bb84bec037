//! WebSocket endpoint for live review sessions.
//!
//! `/api/ws/{email}` upgrades the connection, splits the socket and hands both
//! halves to the relay: the write half lives in the session entry, the read
//! half drives the relay loop for as long as the connection lasts.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};

use reviewbot_core::relay::{Frame, FrameSink, FrameSource};
use reviewbot_types::error::TransportError;

use crate::state::AppState;

/// Write half of a customer WebSocket.
pub struct WsFrameSink {
    sender: SplitSink<WebSocket, Message>,
}

impl WsFrameSink {
    pub fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self { sender }
    }

    /// Send a close frame. The peer may already be gone.
    pub async fn close(&mut self) {
        if let Err(e) = self.sender.close().await {
            tracing::debug!(error = %e, "WebSocket already closed");
        }
    }
}

impl FrameSink for WsFrameSink {
    async fn send(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.sender
            .send(message_from_frame(frame))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

/// Read half of a customer WebSocket.
pub struct WsFrameSource {
    receiver: SplitStream<WebSocket>,
}

impl WsFrameSource {
    pub fn new(receiver: SplitStream<WebSocket>) -> Self {
        Self { receiver }
    }
}

impl FrameSource for WsFrameSource {
    async fn next_frame(&mut self) -> Result<Frame, TransportError> {
        loop {
            let message = match self.receiver.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Err(TransportError::Protocol(e.to_string())),
                None => return Err(TransportError::Closed),
            };
            if let Some(frame) = frame_from_message(message) {
                return frame;
            }
        }
    }
}

/// Map a WebSocket message to a relay frame. Control frames yield `None`.
fn frame_from_message(message: Message) -> Option<Result<Frame, TransportError>> {
    match message {
        Message::Text(text) => Some(Ok(Frame::Text(text.as_str().to_owned()))),
        Message::Binary(bytes) => Some(Ok(Frame::Binary(bytes.to_vec()))),
        Message::Ping(_) | Message::Pong(_) => None,
        Message::Close(_) => Some(Err(TransportError::Closed)),
    }
}

fn message_from_frame(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.into()),
        Frame::Binary(bytes) => Message::Binary(bytes.into()),
    }
}

/// GET /api/ws/{email} - Open a live review session for a registered customer.
pub async fn review_socket(
    ws: WebSocketUpgrade,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let identity = email.trim().to_string();
    ws.on_upgrade(move |socket| serve_socket(socket, identity, state))
}

async fn serve_socket(socket: WebSocket, identity: String, state: AppState) {
    let (sender, receiver) = socket.split();

    let entry = match state
        .relay
        .establish(&identity, WsFrameSink::new(sender))
        .await
    {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!(identity = %identity, error = %e, "Rejected review session");
            return;
        }
    };

    let Err(cause) = state
        .relay
        .run(std::sync::Arc::clone(&entry), WsFrameSource::new(receiver))
        .await;
    entry.lock().await.sink.close().await;

    tracing::info!(identity = %identity, cause = %cause, "Review session ended");
}
