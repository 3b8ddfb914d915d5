//! Tax advice through a chat-completion model.
//!
//! [`prompt`] renders validated inputs into the user message, [`client`]
//! defines the completion boundary and [`openai`] implements it over HTTP.
//! [`TaxAdvisor`] ties the three together for a single request.

pub mod advisor;
pub mod client;
pub mod openai;
pub mod prompt;

pub use advisor::{AdvisorConfig, AdvisoryError, TaxAdvisor};
pub use client::{ChatMessage, ChatRole, CompletionClient, CompletionError, CompletionRequest};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use prompt::build_prompt;
