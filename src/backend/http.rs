use super::{ChatBackend, ChatRequest, ChatResponse};
use crate::core::error::MmateError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const CHAT_PATH: &str = "api/chat";

/// `ChatBackend` speaking JSON over HTTP to `{base}/api/chat`.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    /// Builds the client. Without a timeout a hung request keeps the turn
    /// in flight until the connection drops.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, MmateError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), CHAT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, MmateError> {
        debug!(
            endpoint = %self.endpoint,
            has_session = request.session_id.is_some(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MmateError::Api(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        debug!(session_id = %parsed.session_id, "chat reply received");

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn hello(session_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: "Hello".to_string(),
            session_id: session_id.map(str::to_string),
        }
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/", None).unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:8000/api/chat");
    }

    #[tokio::test]
    async fn posts_message_and_parses_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "Hello", "session_id": null })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Hi",
                "session_id": "abc",
                "timestamp": "T"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(&mock_server.uri(), None).unwrap();
        let response = backend.send(&hello(None)).await.unwrap();

        assert_eq!(
            response,
            ChatResponse {
                message: "Hi".to_string(),
                session_id: "abc".to_string(),
                timestamp: "T".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn sends_bound_session_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({ "message": "Hello", "session_id": "abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Welcome back",
                "session_id": "abc",
                "timestamp": "T2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(&mock_server.uri(), None).unwrap();
        let response = backend.send(&hello(Some("abc"))).await.unwrap();
        assert_eq!(response.message, "Welcome back");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(422).set_body_string("message required"))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(&mock_server.uri(), None).unwrap();
        let err = backend.send(&hello(None)).await.unwrap_err();

        match err {
            MmateError::Api(msg) => assert!(msg.contains("422")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_serialization_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(&mock_server.uri(), None).unwrap();
        let err = backend.send(&hello(None)).await.unwrap_err();
        assert!(matches!(err, MmateError::Serialization(_)));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(json!({
                        "message": "late",
                        "session_id": "abc",
                        "timestamp": "T"
                    })),
            )
            .mount(&mock_server)
            .await;

        let backend =
            HttpBackend::new(&mock_server.uri(), Some(Duration::from_millis(100))).unwrap();
        let err = backend.send(&hello(None)).await.unwrap_err();
        assert!(matches!(err, MmateError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1", None).unwrap();
        let err = backend.send(&hello(None)).await.unwrap_err();
        assert!(matches!(err, MmateError::Network(_)));
    }
}
