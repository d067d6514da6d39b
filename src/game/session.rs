//! Lifecycle of one game channel
//!
//! A session is transport-agnostic: inbound text arrives on one queue and
//! outbound frames leave on another. The WebSocket glue in `api::ws` owns the
//! socket halves.

use super::protocol::{ClientFrame, ServerFrame};
use super::style::{style, Tag};
use super::{CommandRouter, ConversationAgent, GenerationFailure, SessionError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const GREETING: &str = "Welcome to Northstar!";

/// One connected player: their agent, the router, and the outbound queue.
pub struct ConnectionSession {
    id: Uuid,
    router: CommandRouter,
    agent: ConversationAgent,
    outbound: mpsc::Sender<ServerFrame>,
}

impl ConnectionSession {
    pub fn new(
        id: Uuid,
        router: CommandRouter,
        agent: ConversationAgent,
        outbound: mpsc::Sender<ServerFrame>,
    ) -> Self {
        Self {
            id,
            router,
            agent,
            outbound,
        }
    }

    /// Greet the player. Called once, before any inbound message.
    pub async fn open(&self) -> Result<(), SessionError> {
        tracing::info!(conn_id = %self.id, "Player connected");
        self.send(ServerFrame::welcome(GREETING)).await
    }

    /// Handle one inbound text frame: echo the command, then answer it.
    pub async fn handle_text(&mut self, raw: &str) -> Result<(), SessionError> {
        let ClientFrame { command } = ClientFrame::parse(raw)?;
        tracing::debug!(conn_id = %self.id, %command, "Received command");

        self.send(ServerFrame::response(style(Tag::Echo, &format!("▶ {command}"))))
            .await?;

        let reply = match self.router.route(&command, &mut self.agent).await {
            Ok(reply) => reply,
            Err(e) => failure_line(&e),
        };
        self.send(ServerFrame::response(reply)).await
    }

    /// Process inbound frames one at a time until the queue closes or the
    /// connection is cancelled. Cancellation is only observed between frames.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<String>, cancel: CancellationToken) {
        if self.open().await.is_err() {
            tracing::debug!(conn_id = %self.id, "Channel gone before greeting");
            self.close();
            return;
        }

        loop {
            let raw = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                raw = inbound.recv() => match raw {
                    Some(raw) => raw,
                    None => break,
                },
            };

            match self.handle_text(&raw).await {
                Ok(()) => {}
                Err(SessionError::MalformedMessage(e)) => {
                    tracing::warn!(conn_id = %self.id, error = %e, "Dropping malformed message");
                }
                Err(SessionError::ChannelGone) => {
                    tracing::debug!(conn_id = %self.id, "Channel gone; discarding response");
                    break;
                }
            }
        }

        self.close();
    }

    /// Release the session. The agent and its transcript go with it.
    pub fn close(self) {
        tracing::info!(
            conn_id = %self.id,
            transcript_len = self.agent.transcript().len(),
            "Player disconnected"
        );
    }

    async fn send(&self, frame: ServerFrame) -> Result<(), SessionError> {
        self.outbound
            .send(frame)
            .await
            .map_err(|_| SessionError::ChannelGone)
    }
}

/// Provider messages can carry whole response bodies; only the kind is shown.
fn failure_line(e: &GenerationFailure) -> String {
    let reason = match e {
        GenerationFailure::Llm(llm) => llm.kind.summary().to_string(),
        other => other.to_string(),
    };
    style(Tag::Error, &format!("The forest falls silent. ({reason})"))
}
