//! Google Gemini `generateContent` client

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ModelClient;
use crate::config::ProviderConfig;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
    status: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
        })
    }

    pub fn from_settings(api_key: String, settings: &ProviderConfig) -> Result<Self> {
        let mut client = Self::new(api_key)?.with_model(&settings.model);
        if let Some(endpoint) = &settings.endpoint {
            client.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        client.max_tokens = settings.max_tokens;
        client.temperature = settings.temperature;
        Ok(client)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn request_for(&self, prompt: &str) -> GenerateRequest {
        let generation_config = (self.max_tokens.is_some() || self.temperature.is_some()).then(|| {
            GenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: self.temperature,
            }
        });

        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config,
        }
    }
}

/// Join the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_for(prompt))
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                anyhow::bail!(
                    "Gemini API error ({}): {}",
                    api_error.error.status.unwrap_or_else(|| status.to_string()),
                    api_error.error.message
                );
            }

            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        extract_text(body).ok_or_else(|| anyhow::anyhow!("No text in Gemini response"))
    }
}
