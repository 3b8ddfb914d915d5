//! Advisory orchestration: validate, render the prompt, ask the model.

use std::sync::Arc;

use serde_json::{Map, Value};
use tax_core::{AdvisoryInput, ValidationError, parse_advisory_input};
use thiserror::Error;
use tracing::{debug, info};

use crate::client::{ChatMessage, CompletionClient, CompletionError, CompletionRequest};
use crate::prompt::build_prompt;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const SYSTEM_PROMPT: &str = "You are a tax advisor. Provide practical suggestions.";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 750;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Model and sampling settings sent with every advisory request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub model: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl AdvisorConfig {
    /// Default settings with a different model.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Produces tax advice for one request at a time.
///
/// The completion client is built once at startup and shared; the advisor
/// itself holds no per-request state.
#[derive(Clone)]
pub struct TaxAdvisor {
    client: Arc<dyn CompletionClient>,
    config: AdvisorConfig,
}

impl TaxAdvisor {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        config: AdvisorConfig,
    ) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// The system + user conversation for `input`. Comments are rendered as
    /// their own block, never as a data field.
    pub fn completion_request(
        &self,
        input: &AdvisoryInput,
    ) -> CompletionRequest {
        let prompt = build_prompt(&input.tax.prompt_fields(), &input.user_comments);

        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.as_str()),
                ChatMessage::user(prompt),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Asks the model for advice on an already validated input.
    ///
    /// # Errors
    ///
    /// [`AdvisoryError::Completion`] when the client fails. Nothing is
    /// retried.
    pub async fn advise(
        &self,
        input: &AdvisoryInput,
    ) -> Result<String, AdvisoryError> {
        let request = self.completion_request(input);
        debug!(
            model = %request.model,
            has_comments = !input.user_comments.is_empty(),
            "requesting tax advice"
        );

        let advice = self.client.complete(&request).await?;
        info!(bytes = advice.len(), "received tax advice");
        Ok(advice)
    }

    /// Validates a raw request object against the advisory schema, then
    /// behaves like [`TaxAdvisor::advise`].
    pub async fn advise_request(
        &self,
        request: &Map<String, Value>,
    ) -> Result<String, AdvisoryError> {
        let input = parse_advisory_input(request)?;
        self.advise(&input).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tax_core::{FilingStatus, TaxInput};

    use super::*;
    use crate::client::ChatRole;

    // =========================================================================
    // stub clients
    // =========================================================================
    /// Records the last request and answers with a fixed reply.
    #[derive(Default)]
    struct RecordingClient {
        called: AtomicBool,
        last: Mutex<Option<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.called.store(true, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            Ok("Keep receipts for education expenses.".to_string())
        }
    }

    /// Always fails, to check errors are returned rather than raised.
    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            Err(CompletionError::Transport("connection reset".to_string()))
        }
    }

    fn recording_advisor() -> (TaxAdvisor, Arc<RecordingClient>) {
        let client = Arc::new(RecordingClient::default());
        let advisor = TaxAdvisor::new(client.clone(), AdvisorConfig::default());
        (advisor, client)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test fixture is not an object: {other}"),
        }
    }

    // =========================================================================
    // config
    // =========================================================================
    #[test]
    fn default_config_uses_fixed_sampling() {
        let config = AdvisorConfig::default();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 750);
        assert_eq!(
            config.system_prompt,
            "You are a tax advisor. Provide practical suggestions."
        );
    }

    #[test]
    fn with_model_keeps_other_defaults() {
        let config = AdvisorConfig::with_model("gpt-4o-mini");

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    // =========================================================================
    // request building
    // =========================================================================
    #[test]
    fn completion_request_has_system_then_user_message() {
        let (advisor, _) = recording_advisor();
        let mut tax = TaxInput::new(FilingStatus::MarriedJoint);
        tax.employment_income = dec!(25000);
        tax.dependents = 2;
        let input = AdvisoryInput {
            tax,
            user_comments: "Should I open a pension?".to_string(),
        };

        let request = advisor.completion_request(&input);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[1].role, ChatRole::User);
        let prompt = &request.messages[1].content;
        assert!(prompt.contains("filingStatus: marriedJoint\nemploymentIncome: 25000\n"));
        assert!(prompt.contains("dependents: 2\n\n"));
        assert!(prompt.contains("Should I open a pension?"));
        assert!(!prompt.contains("userComments"));
    }

    // =========================================================================
    // advise
    // =========================================================================
    #[tokio::test]
    async fn advise_returns_client_text() {
        let (advisor, client) = recording_advisor();
        let input = AdvisoryInput {
            tax: TaxInput::new(FilingStatus::Single),
            user_comments: String::new(),
        };

        let advice = advisor.advise(&input).await.unwrap();

        assert_eq!(advice, "Keep receipts for education expenses.");
        assert!(client.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn advise_request_validates_before_calling_client() {
        let (advisor, client) = recording_advisor();

        let result = advisor
            .advise_request(&object(json!({"employmentIncome": 100})))
            .await;

        assert!(matches!(
            result,
            Err(AdvisoryError::Validation(ValidationError::MissingField { .. }))
        ));
        assert!(
            !client.called.load(Ordering::SeqCst),
            "client must not be called for invalid input"
        );
    }

    #[tokio::test]
    async fn advise_request_sends_configured_sampling() {
        let (advisor, client) = recording_advisor();

        advisor
            .advise_request(&object(json!({
                "filingStatus": "single",
                "userComments": "first year freelancing"
            })))
            .await
            .unwrap();

        let sent = client.last.lock().unwrap().clone().expect("no request sent");
        assert_eq!(sent.model, "gpt-4o");
        assert_eq!(sent.temperature, 0.7);
        assert_eq!(sent.max_tokens, 750);
        assert!(sent.messages[1].content.contains("first year freelancing"));
    }

    #[tokio::test]
    async fn client_failure_is_returned_as_error() {
        let advisor = TaxAdvisor::new(Arc::new(FailingClient), AdvisorConfig::default());

        let result = advisor
            .advise_request(&object(json!({"filingStatus": "marriedSeparate"})))
            .await;

        match result {
            Err(AdvisoryError::Completion(err)) => {
                assert_eq!(err.to_string(), "completion request failed: connection reset");
            }
            other => panic!("expected completion error, got {other:?}"),
        }
    }
}
