//! Process configuration: command-line flags with environment fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tax_advisor::advisor::DEFAULT_MODEL;
use tax_advisor::openai::DEFAULT_BASE_URL;
use tax_advisor::{AdvisorConfig, OpenAiConfig};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OpenAI API key is missing (set OPENAI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("model name must not be empty")]
    EmptyModel,
}

/// Income tax calculator and advisory HTTP service.
///
/// Serves `POST /calculate-tax` and `POST /tax-advice`.
#[derive(Clone, Parser)]
#[command(name = "tax-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// API key for the chat-completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Interface to listen on.
    #[arg(long, env = "TAX_SERVER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "TAX_SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Model used for advice.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Root of the OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Log filter, a level ("debug") or any EnvFilter directive.
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also append log lines to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Configuration the server runs with, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub openai: OpenAiConfig,
    pub advisor: AdvisorConfig,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Checks the flags and produces the runtime configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingApiKey`] when no non-blank key was given;
    /// the service must not start without one.
    pub fn validate(&self) -> Result<AppConfig, ConfigError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = self.api_base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }

        let model = self.model.trim();
        if model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        Ok(AppConfig {
            addr: self.socket_addr(),
            openai: OpenAiConfig {
                api_key: api_key.to_string(),
                base_url: base_url.to_string(),
            },
            advisor: AdvisorConfig::with_model(model),
        })
    }
}
