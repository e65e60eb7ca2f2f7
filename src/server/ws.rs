//! WebSocket frame stream.
//!
//! Clients connect to `/ws/stream`, receive a `status` message, then send one
//! text message per frame:
//!
//! ```json
//! {"width": 640, "height": 480, "detections": [{"x1": 0, "y1": 0, "x2": 40, "y2": 40, "confidence": 0.9, "class": 0}]}
//! ```
//!
//! Every frame is answered with a `detections` message carrying track ids, or
//! an `error` message if the frame was skipped.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use tracing::{debug, info, warn};

use crate::integration::{RelayDetector, StreamSession};
use crate::protocol::{FrameMessage, ServerMessage};

use super::state::AppState;

#[tracing::instrument(skip(state, ws))]
pub async fn stream_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection. The session lives on this task only and every frame
/// is answered before the next message is read.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let guard = state.open_session();
    let config = state.tracker_config().clone();
    let mut session = match StreamSession::new(guard.id(), RelayDetector, config) {
        Ok(session) => session,
        Err(e) => {
            warn!(session_id = guard.id(), error = %e, "invalid tracker config");
            let _ = send(&mut socket, &ServerMessage::error(e.to_string())).await;
            return;
        }
    };
    info!(session_id = guard.id(), "stream connected");

    if send(&mut socket, &ServerMessage::connected()).await.is_err() {
        session.close();
        return;
    }

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!(session_id = guard.id(), error = %e, "stream receive failed");
                break;
            }
        };

        let reply = match msg {
            Message::Text(text) => handle_frame(&mut session, &text),
            Message::Binary(_) => ServerMessage::error("binary frames are not supported"),
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => {
                debug!(session_id = guard.id(), "client closed stream");
                break;
            }
        };

        if send(&mut socket, &reply).await.is_err() {
            break;
        }
    }

    session.close();
    info!(session_id = guard.id(), "stream disconnected");
}

/// Process one text frame and build its reply.
pub(crate) fn handle_frame(
    session: &mut StreamSession<RelayDetector>,
    text: &str,
) -> ServerMessage {
    let frame = match FrameMessage::parse(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(session_id = session.id(), error = %e, "rejected frame message");
            return ServerMessage::error(e.to_string());
        }
    };

    match session.process_frame(frame.payload(), frame.width, frame.height) {
        Ok(result) => ServerMessage::Detections(result),
        Err(e) => {
            warn!(session_id = session.id(), error = %e, "frame skipped");
            ServerMessage::error(e.to_string())
        }
    }
}

async fn send(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), axum::Error> {
    socket.send(Message::Text(msg.to_json())).await
}
