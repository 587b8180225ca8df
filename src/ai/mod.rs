//! Model provider integrations
//!
//! The prompt assembler only sees [`ModelClient`]; transport, auth and
//! error reporting live in the provider modules.

pub mod gemini;
pub mod openai;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::config::{Config, ProviderConfig};

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Anything that can turn a prompt into a model reply
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Human readable provider name, used in messages
    fn name(&self) -> &str;

    /// Send the fully assembled prompt and return the reply text
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Supported hosted providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Provider::OpenAi),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => anyhow::bail!("Unknown provider '{}' (expected openai or gemini)", other),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::Gemini => write!(f, "Gemini"),
        }
    }
}

impl Provider {
    fn settings<'a>(&self, config: &'a Config) -> &'a ProviderConfig {
        match self {
            Provider::OpenAi => &config.ai.providers.openai,
            Provider::Gemini => &config.ai.providers.gemini,
        }
    }
}

/// Look up the API key named by the provider settings
fn api_key(provider: Provider, settings: &ProviderConfig) -> Result<String> {
    std::env::var(&settings.api_key_env).with_context(|| {
        format!(
            "{} API key not found. Set the {} environment variable.",
            provider, settings.api_key_env
        )
    })
}

/// Build the client for `provider`, or for the configured default
pub fn client_from_config(
    config: &Config,
    provider: Option<&str>,
) -> Result<Box<dyn ModelClient>> {
    let provider: Provider = provider
        .unwrap_or(config.ai.default_provider.as_str())
        .parse()?;
    let settings = provider.settings(config);
    let key = api_key(provider, settings)?;

    let client: Box<dyn ModelClient> = match provider {
        Provider::OpenAi => Box::new(OpenAiClient::from_settings(key, settings)?),
        Provider::Gemini => Box::new(GeminiClient::from_settings(key, settings)?),
    };

    tracing::debug!("Using provider: {} ({})", provider, settings.model);
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("Gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = Config::default();
        config.ai.providers.openai.api_key_env = "NEUROCLI_TEST_UNSET_KEY".to_string();

        let err = client_from_config(&config, Some("openai")).err().unwrap();
        assert!(err.to_string().contains("NEUROCLI_TEST_UNSET_KEY"));
    }
}
