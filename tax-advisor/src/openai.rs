//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::client::{CompletionClient, CompletionError, CompletionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings. `base_url` is the API root, without the
/// `/chat/completions` suffix.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends one request per call; no retries and no timeout beyond the
/// HTTP client's defaults.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let url = self.config.completions_url();
        debug!(%url, model = %request.model, "sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: body.trim_end().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no message content".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
    use axum::routing::post;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::client::ChatMessage;

    type Seen = Arc<Mutex<Option<(Option<String>, Value)>>>;

    /// Serves `router` on an ephemeral local port and returns its API root.
    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    /// A mock that records the auth header and body, then answers `reply`.
    fn recording_router(
        seen: Seen,
        status: StatusCode,
        reply: Value,
    ) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen.clone();
                let reply = reply.clone();
                async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.lock().unwrap() = Some((auth, body));
                    (status, Json(reply))
                }
            }),
        )
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::system("You are a tax advisor."),
                ChatMessage::user("filingStatus: single"),
            ],
            temperature: 0.7,
            max_tokens: 750,
        }
    }

    fn client_for(base_url: String) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig {
            api_key: "sk-test".to_string(),
            base_url,
        })
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let config = OpenAiConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9000/v1/".to_string(),
        };

        assert_eq!(
            config.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", OpenAiConfig::new("sk-secret"));

        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains(DEFAULT_BASE_URL));
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let seen: Seen = Arc::default();
        let reply = json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Claim your education expenses."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        let base = spawn_mock(recording_router(seen.clone(), StatusCode::OK, reply)).await;

        let advice = client_for(base).complete(&request()).await.unwrap();

        assert_eq!(advice, "Claim your education expenses.");
    }

    #[tokio::test]
    async fn complete_sends_bearer_key_and_request_body() {
        let seen: Seen = Arc::default();
        let reply = json!({"choices": [{"message": {"role": "assistant", "content": "ok"}}]});
        let base = spawn_mock(recording_router(seen.clone(), StatusCode::OK, reply)).await;

        client_for(base).complete(&request()).await.unwrap();

        let (auth, body) = seen.lock().unwrap().take().expect("mock was not called");
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body, serde_json::to_value(request()).unwrap());
    }

    #[tokio::test]
    async fn complete_maps_error_status_to_api_error() {
        let reply = json!({"error": {"message": "Incorrect API key provided"}});
        let base = spawn_mock(recording_router(
            Arc::default(),
            StatusCode::UNAUTHORIZED,
            reply,
        ))
        .await;

        let err = client_for(base).complete(&request()).await.unwrap_err();

        match err {
            CompletionError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_rejects_response_without_choices() {
        let base = spawn_mock(recording_router(
            Arc::default(),
            StatusCode::OK,
            json!({"choices": []}),
        ))
        .await;

        let err = client_for(base).complete(&request()).await.unwrap_err();

        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn complete_rejects_null_content() {
        let base = spawn_mock(recording_router(
            Arc::default(),
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": null}}]}),
        ))
        .await;

        let err = client_for(base).complete(&request()).await.unwrap_err();

        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn complete_reports_unreachable_host_as_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{addr}/v1"))
            .complete(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
