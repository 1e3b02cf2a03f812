//! Driving one chat exchange from request to final snapshot.
//!
//! The orchestrator sends the turn, then pulls the response body through
//! the frame decoder, the event parser and the reducer, yielding the
//! updated [`AssistantMessage`] after every applied event. Nothing happens
//! until the returned stream is polled, and dropping it closes the response.
//!
//! Failures never surface as errors to the caller:
//! - a request that cannot be sent, or is answered with a non-success
//!   status, yields one snapshot carrying [`TRANSPORT_FAILURE_TEXT`];
//! - a body that breaks off yields a final snapshot whose text is replaced
//!   by [`TRANSPORT_FAILURE_TEXT`] (tool invocations are kept);
//! - records that do not parse are logged and skipped.

use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::adapters::ReqwestHttpClient;
use crate::client::ChatClient;
use crate::models::{AssistantMessage, ChatRequest, ConversationTurn};
use crate::reducer::reduce;
use crate::sse::{frames, parse_event, SseParseError};
use crate::traits::{HttpClient, HttpError};

/// Reply text shown when the exchange fails at the transport level.
pub const TRANSPORT_FAILURE_TEXT: &str = "❌ Failed to send message. Please try again.";

/// Snapshots of the assistant message, in publication order.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = AssistantMessage> + Send>>;

type FrameStream = Pin<Box<dyn Stream<Item = Result<String, HttpError>> + Send>>;

/// Everything a caller needs to render one exchange.
pub struct Exchange {
    /// The user's turn as submitted
    pub turn: ConversationTurn,
    /// Empty reply shown until the first event arrives
    pub placeholder: AssistantMessage,
    /// Updated replies, one per applied event
    pub snapshots: SnapshotStream,
}

/// Sends chat turns and reconstructs the streamed replies.
pub struct ChatOrchestrator<C: HttpClient = ReqwestHttpClient> {
    client: ChatClient<C>,
}

impl<C: HttpClient> Clone for ChatOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C: HttpClient + 'static> ChatOrchestrator<C> {
    pub fn new(client: ChatClient<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ChatClient<C> {
        &self.client
    }

    /// Start an exchange for `text` within `conversation_id`.
    pub fn begin(&self, text: &str, conversation_id: &str) -> Exchange {
        let turn = ConversationTurn::new(text);
        let placeholder = AssistantMessage::placeholder();
        let snapshots = self.drive(
            placeholder.clone(),
            ChatRequest::new(text, conversation_id),
        );

        Exchange {
            turn,
            placeholder,
            snapshots,
        }
    }

    /// Send `text` and stream the reconstructed reply.
    pub fn send(&self, text: &str, conversation_id: &str) -> SnapshotStream {
        self.begin(text, conversation_id).snapshots
    }

    fn drive(&self, placeholder: AssistantMessage, request: ChatRequest) -> SnapshotStream {
        let state = DriveState {
            client: self.client.clone(),
            current: placeholder,
            phase: Phase::Start(request),
            applied: 0,
        };

        Box::pin(stream::unfold(state, |mut state| async move {
            state.next_snapshot().await.map(|snapshot| (snapshot, state))
        }))
    }
}

enum Phase {
    Start(ChatRequest),
    Streaming(FrameStream),
    Done,
}

struct DriveState<C: HttpClient> {
    client: ChatClient<C>,
    current: AssistantMessage,
    phase: Phase,
    applied: usize,
}

impl<C: HttpClient> DriveState<C> {
    async fn next_snapshot(&mut self) -> Option<AssistantMessage> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Start(request) => {
                    tracing::info!(
                        conversation_id = %request.conversation_id,
                        message_id = %self.current.id,
                        "Sending chat message"
                    );
                    match self.client.open_chat(&request).await {
                        Ok(body) => self.phase = Phase::Streaming(Box::pin(frames(body))),
                        Err(err) => {
                            tracing::error!(error = %err, "Chat request failed");
                            return Some(self.fail());
                        }
                    }
                }
                Phase::Streaming(mut body) => match body.next().await {
                    Some(Ok(payload)) => {
                        self.phase = Phase::Streaming(body);
                        if let Some(snapshot) = self.apply(&payload) {
                            return Some(snapshot);
                        }
                    }
                    Some(Err(err)) => {
                        tracing::warn!(
                            error = %err,
                            applied = self.applied,
                            "Chat stream broke off"
                        );
                        return Some(self.fail());
                    }
                    None => {
                        tracing::info!(
                            message_id = %self.current.id,
                            applied = self.applied,
                            "Chat stream complete"
                        );
                        return None;
                    }
                },
                Phase::Done => return None,
            }
        }
    }

    fn apply(&mut self, payload: &str) -> Option<AssistantMessage> {
        match parse_event(payload) {
            Ok(event) => {
                tracing::debug!(event_type = event.event_type_name(), "Applying event");
                self.current = reduce(&self.current, &event);
                self.applied += 1;
                Some(self.current.clone())
            }
            Err(SseParseError::UnknownEventType(kind)) => {
                tracing::debug!(event_type = %kind, "Skipping unhandled event type");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, payload = %payload, "Dropping malformed record");
                None
            }
        }
    }

    fn fail(&mut self) -> AssistantMessage {
        self.current.content = TRANSPORT_FAILURE_TEXT.to_string();
        self.current.clone()
    }
}
