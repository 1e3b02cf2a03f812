//! One conversation for the lifetime of the process.
//!
//! The session owns the conversation id sent with every turn, the in-memory
//! transcript of this run and a watch cell holding the reply currently
//! being streamed. [`Session::submit`] borrows the session mutably for the
//! whole exchange, so a second turn cannot start while one is in flight.

use std::io;

use futures::StreamExt;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::models::{AssistantMessage, ConversationTurn, TranscriptEntry};
use crate::orchestrator::ChatOrchestrator;
use crate::traits::HttpClient;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The submitted text was empty or whitespace
    #[error("Message is empty")]
    EmptyInput,
    /// The observer failed to write output
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

/// Receives the progress of an exchange.
pub trait ExchangeObserver {
    /// The user's turn was accepted.
    fn on_turn(&mut self, turn: &ConversationTurn) -> io::Result<()>;

    /// A new snapshot of the reply was published.
    fn on_snapshot(&mut self, snapshot: &AssistantMessage) -> io::Result<()>;

    /// The reply is final.
    fn on_complete(&mut self, _message: &AssistantMessage) -> io::Result<()> {
        Ok(())
    }
}

pub struct Session<C: HttpClient = ReqwestHttpClient> {
    conversation_id: Uuid,
    orchestrator: ChatOrchestrator<C>,
    transcript: Vec<TranscriptEntry>,
    current: watch::Sender<Option<AssistantMessage>>,
}

impl<C: HttpClient + 'static> Session<C> {
    pub fn new(orchestrator: ChatOrchestrator<C>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            conversation_id: Uuid::new_v4(),
            orchestrator,
            transcript: Vec::new(),
            current,
        }
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Turns and replies of this run, oldest first. A reply holds its
    /// latest snapshot, so an interrupted one stays partial.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Watch the reply being streamed. Holds the last reply once the
    /// exchange is over and `None` before the first one.
    pub fn subscribe(&self) -> watch::Receiver<Option<AssistantMessage>> {
        self.current.subscribe()
    }

    /// Send one turn and stream the reply to `observer`.
    ///
    /// Surrounding whitespace is trimmed before sending. Transport
    /// failures do not error here; they arrive as the reply text.
    pub async fn submit<O>(
        &mut self,
        text: &str,
        observer: &mut O,
    ) -> Result<AssistantMessage, SessionError>
    where
        O: ExchangeObserver + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let exchange = self
            .orchestrator
            .begin(text, &self.conversation_id.to_string());

        self.transcript
            .push(TranscriptEntry::User(exchange.turn.clone()));
        let reply_at = self.transcript.len();
        self.transcript
            .push(TranscriptEntry::Assistant(exchange.placeholder.clone()));
        self.current.send_replace(Some(exchange.placeholder.clone()));
        observer.on_turn(&exchange.turn)?;

        // The reply entry always holds the latest snapshot.
        let mut snapshots = exchange.snapshots;
        let mut last = exchange.placeholder;
        while let Some(snapshot) = snapshots.next().await {
            self.record_reply(reply_at, &snapshot);
            observer.on_snapshot(&snapshot)?;
            last = snapshot;
        }

        tracing::debug!(
            message_id = %last.id,
            tools = last.tool_invocations.len(),
            "Reply complete"
        );
        observer.on_complete(&last)?;
        Ok(last)
    }

    fn record_reply(&mut self, at: usize, snapshot: &AssistantMessage) {
        if let Some(entry) = self.transcript.get_mut(at) {
            *entry = TranscriptEntry::Assistant(snapshot.clone());
        }
        self.current.send_replace(Some(snapshot.clone()));
    }
}
