use super::message::{Message, Sender, now_timestamp};
use super::session::SessionBinder;
use super::store::MessageStore;
use super::suggestions;
use crate::backend::{ChatBackend, ChatRequest, ChatResponse};
use crate::core::error::MmateError;
use std::time::Duration;
use tracing::{debug, info};

/// Shown in place of a reply whenever the backend call fails for any reason.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// `is_typing` implies `is_loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnState {
    pub is_loading: bool,
    pub is_typing: bool,
}

impl TurnState {
    pub const IDLE: TurnState = TurnState {
        is_loading: false,
        is_typing: false,
    };
    const TYPING: TurnState = TurnState {
        is_loading: true,
        is_typing: true,
    };
    const SETTLING: TurnState = TurnState {
        is_loading: true,
        is_typing: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input or a turn already in flight; nothing changed.
    Rejected,
    Replied,
    FellBack,
}

/// Receives every observable transition of the controller.
pub trait ChatObserver: Send {
    fn message_appended(&mut self, _message: &Message) {}
    fn turn_state_changed(&mut self, _state: TurnState) {}
}

struct Silent;

impl ChatObserver for Silent {}

/// Owns the message history, the session token and the turn flags, and runs
/// one request/response cycle at a time.
pub struct TurnController {
    backend: Box<dyn ChatBackend>,
    observer: Box<dyn ChatObserver>,
    store: MessageStore,
    session: SessionBinder,
    state: TurnState,
    input: String,
    typing_delay: Duration,
}

impl TurnController {
    pub fn new(backend: Box<dyn ChatBackend>, typing_delay: Duration) -> Self {
        Self {
            backend,
            observer: Box::new(Silent),
            store: MessageStore::new(),
            session: SessionBinder::default(),
            state: TurnState::IDLE,
            input: String::new(),
            typing_delay,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn ChatObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.get()
    }

    #[cfg(test)]
    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn suggestions_enabled(&self) -> bool {
        !self.state.is_loading
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Runs a whole turn for `text`. Failures end in the fallback reply and
    /// are never returned as errors.
    pub async fn submit(&mut self, text: &str) -> TurnOutcome {
        let Some(request) = self.begin_turn(text) else {
            return TurnOutcome::Rejected;
        };

        if !self.typing_delay.is_zero() {
            tokio::time::sleep(self.typing_delay).await;
        }

        let result = self.backend.send(&request).await;
        self.finish_turn(result)
    }

    /// Submits whatever is in the input buffer.
    pub async fn submit_input(&mut self) -> TurnOutcome {
        let text = self.input.clone();
        self.submit(&text).await
    }

    pub async fn submit_suggestion(&mut self, index: usize) -> TurnOutcome {
        match suggestions::suggestion(index) {
            Some(prompt) => self.submit(prompt).await,
            None => {
                debug!(index, "no such suggestion");
                TurnOutcome::Rejected
            }
        }
    }

    /// Guard plus the first half of a turn: records the user message, clears
    /// the input and raises both flags. Returns the request to send, or
    /// `None` when the submission is ignored.
    pub fn begin_turn(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            debug!("ignoring empty submission");
            return None;
        }
        if self.state.is_loading {
            debug!("turn already in flight, ignoring submission");
            return None;
        }

        let message = self.store.append(Sender::User, text, now_timestamp());
        self.observer.message_appended(message);
        self.input.clear();
        self.set_state(TurnState::TYPING);

        Some(ChatRequest {
            message: text.to_string(),
            session_id: self.session.get().map(str::to_string),
        })
    }

    /// Second half of a turn: merges the backend result into the history.
    pub fn finish_turn(&mut self, result: Result<ChatResponse, MmateError>) -> TurnOutcome {
        if !self.state.is_loading {
            debug!("no turn in flight, dropping backend result");
            return TurnOutcome::Rejected;
        }

        self.set_state(TurnState::SETTLING);

        let outcome = match result {
            Ok(response) => {
                let message = self.store.append(
                    Sender::Assistant,
                    response.message,
                    response.timestamp,
                );
                self.observer.message_appended(message);
                self.session.set(response.session_id);
                TurnOutcome::Replied
            }
            Err(err) => {
                info!(error = %err, "chat request failed, showing fallback reply");
                let message = self
                    .store
                    .append(Sender::Assistant, FALLBACK_REPLY, now_timestamp());
                self.observer.message_appended(message);
                TurnOutcome::FellBack
            }
        };

        self.set_state(TurnState::IDLE);
        outcome
    }

    fn set_state(&mut self, state: TurnState) {
        self.state = state;
        self.observer.turn_state_changed(state);
    }
}
