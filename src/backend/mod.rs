use crate::core::error::MmateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::HttpBackend;

/// Body of `POST /api/chat`. `session_id` goes out as `null` until the
/// backend has handed one out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
    /// Kept as sent by the backend; never parsed.
    pub timestamp: String,
}

/// The remote conversational backend. One call per turn.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, MmateError>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// In-memory backend that replays queued results and records requests.
    #[derive(Clone, Default)]
    pub struct ScriptedBackend {
        replies: Arc<Mutex<VecDeque<Result<ChatResponse, MmateError>>>>,
        requests: Arc<Mutex<Vec<ChatRequest>>>,
        journal: Option<Arc<Mutex<Vec<String>>>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, message: &str, session_id: &str, timestamp: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(ChatResponse {
                message: message.to_string(),
                session_id: session_id.to_string(),
                timestamp: timestamp.to_string(),
            }));
            self
        }

        pub fn fail(self, err: MmateError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        /// Shares a log with a test observer so call order can be asserted.
        pub fn with_journal(mut self, journal: Arc<Mutex<Vec<String>>>) -> Self {
            self.journal = Some(journal);
            self
        }

        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, MmateError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(journal) = &self.journal {
                journal
                    .lock()
                    .unwrap()
                    .push(format!("backend:{}", request.message));
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(MmateError::Network("no scripted reply".to_string())))
        }
    }
}
