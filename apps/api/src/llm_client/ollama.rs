//! Self-hosted Ollama transport (`/api/generate`, `/api/tags`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{InferenceProvider, LlmError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<Value>,
}

#[derive(Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            model,
        })
    }

    fn status_error(status: reqwest::StatusCode) -> LlmError {
        LlmError::Api {
            status: status.as_u16(),
            message: format!("Ollama API returned status code {}", status.as_u16()),
        }
    }
}

#[async_trait]
impl InferenceProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response.status()));
        }

        let parsed: GenerateResponse = serde_json::from_str(&response.text().await?)?;
        Ok(parsed.response)
    }

    async fn list_models(&self) -> Result<Vec<Value>, LlmError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response.status()));
        }

        let tags: TagsResponse = serde_json::from_str(&response.text().await?)?;
        Ok(tags.models)
    }
}
