//! WebSocket server for browser front-ends.
//!
//! Each connection owns one [`Session`]; every client message replaces it
//! (or reads it) and is answered with a single server message.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use lastdigit_core::{
    digit::Digits, sequence, BoardConfig, BoardSvg, CanvasInput, Factor, GradeSvg, Report, Session,
};

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    pub board: BoardConfig,
}

/// Messages from client to server
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Switch multiplication table
    SelectFactor { factor: Factor },
    /// Grade the current drawing
    Grade { canvas: CanvasInput },
    /// Clear the drawing, keep the factor
    Reset,
    /// Ping to keep connection alive
    Ping,
}

/// Messages from server to client
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Fresh board for the current factor
    Board {
        factor: Factor,
        sequence: String,
        cycle: String,
        resets: u32,
        svg: String,
    },
    /// Grading result
    Graded { report: Report, svg: String },
    /// User-correctable problem ("draw something first")
    Warning { message: String },
    /// Error occurred
    Error { message: String },
    /// Pong response
    Pong,
}

impl ServerMessage {
    pub fn board(session: &Session) -> Self {
        let layout = session.layout();
        ServerMessage::Board {
            factor: session.factor(),
            sequence: Digits(&session.sequence()).to_string(),
            cycle: sequence::describe_cycle(session.factor()),
            resets: session.resets(),
            svg: BoardSvg::new(session.config(), &layout).to_string(),
        }
    }
}

/// Apply one client message: returns the next session and the reply.
pub fn handle_message(session: Session, msg: ClientMessage) -> (Session, ServerMessage) {
    match msg {
        ClientMessage::SelectFactor { factor } => {
            let next = session.with_factor(factor);
            let reply = ServerMessage::board(&next);
            (next, reply)
        }
        ClientMessage::Reset => {
            let next = session.reset();
            let reply = ServerMessage::board(&next);
            (next, reply)
        }
        ClientMessage::Grade { canvas } => {
            let reply = match session.grade(&canvas) {
                Ok(grade) => {
                    let layout = session.layout();
                    let expected = session.expected();
                    let svg = GradeSvg::new(session.config(), &layout, &expected, &grade).to_string();
                    ServerMessage::Graded { report: grade.report(), svg }
                }
                Err(e) => ServerMessage::Warning { message: e.to_string() },
            };
            (session, reply)
        }
        ClientMessage::Ping => (session, ServerMessage::Pong),
    }
}

pub fn router(config: ServerConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(Arc::new(config))
}

/// Serve on an already-bound listener
pub async fn serve(listener: TcpListener, config: ServerConfig) -> std::io::Result<()> {
    axum::serve(listener, router(config)).await
}

/// Run the WebSocket server
pub async fn run_server(port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("WebSocket server listening on ws://{}/ws", addr);
    serve(listener, config).await?;
    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(config): State<Arc<ServerConfig>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

async fn handle_socket(socket: WebSocket, config: Arc<ServerConfig>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel for sending messages back to the client
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(16);

    // Task to forward messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize {:?}: {}", msg, e);
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut session = Session::new(config.board.clone());
    let _ = tx.send(ServerMessage::board(&session)).await;

    // Handle incoming messages
    while let Some(result) = receiver.next().await {
        let msg = match result {
            Ok(m) => m,
            Err(_) => break,
        };
        match msg {
            Message::Text(text) => {
                let reply = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        let (next, reply) = handle_message(session, client_msg);
                        session = next;
                        reply
                    }
                    Err(e) => {
                        warn!("invalid message: {}", e);
                        ServerMessage::Error { message: format!("Invalid message: {}", e) }
                    }
                };
                if tx.send(reply).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    // Clean up
    drop(tx);
    let _ = send_task.await;
}
