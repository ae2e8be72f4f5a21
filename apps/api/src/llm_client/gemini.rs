//! Hosted Gemini transport (`models/{model}:generateContent`), keyed by API credential.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{InferenceProvider, LlmError};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            api_key,
            model,
        })
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey { provider: "Gemini" })
    }

    /// Maps a non-2xx response to `LlmError::Api`, keeping the upstream message if present.
    async fn error_from(response: Response) -> LlmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<GeminiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        let message = if detail.trim().is_empty() {
            format!("Gemini API returned status code {status}")
        } else {
            format!("Gemini API returned status code {status}: {}", detail.trim())
        };
        LlmError::Api { status, message }
    }
}

#[async_trait]
impl InferenceProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
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
        let api_key = self.api_key()?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part { text: system }],
            }),
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{model}:generateContent",
                self.base_url
            ))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response.text().await?)?;
        parsed.text().ok_or(LlmError::EmptyContent)
    }

    async fn list_models(&self) -> Result<Vec<Value>, LlmError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/v1beta/models", self.base_url))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let models: ModelsResponse = serde_json::from_str(&response.text().await?)?;
        Ok(models.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{AgentResult, Backend};
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider(base_url: String, api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(
            base_url,
            api_key.map(str::to_string),
            "gemini-1.5-flash".into(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_sends_contents_and_system_instruction() {
        let router = Router::new().route(
            "/v1beta/models/:action",
            post(
                |Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(action, "gemini-1.5-flash:generateContent");
                    assert_eq!(headers[API_KEY_HEADER], "test-key");
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
                    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
                    Json(json!({
                        "candidates": [{
                            "content": { "parts": [{ "text": "{\"summary\":" }, { "text": "\"ok\"}" }] }
                        }]
                    }))
                },
            ),
        );
        let gemini = provider(serve(router).await, Some("test-key"));

        let text = gemini
            .generate("gemini-1.5-flash", "hello", "Be brief.")
            .await
            .unwrap();
        assert_eq!(text, r#"{"summary":"ok"}"#);
    }

    #[tokio::test]
    async fn test_system_instruction_omitted_when_absent() {
        let router = Router::new().route(
            "/v1beta/models/:action",
            post(|Json(body): Json<Value>| async move {
                assert!(body.get("systemInstruction").is_none());
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "plain" }] } }] }))
            }),
        );
        let gemini = provider(serve(router).await, Some("k"));

        let text = gemini.generate("gemini-1.5-flash", "p", "").await.unwrap();
        assert_eq!(text, "plain");
    }

    #[tokio::test]
    async fn test_missing_api_key_becomes_error_shape() {
        let backend = Backend {
            provider: Arc::new(provider("http://127.0.0.1:9".into(), None)),
            model: "gemini-1.5-flash".into(),
        };

        let result = backend.invoke("prompt", None).await;
        assert_eq!(
            result,
            AgentResult::error("Gemini API key is not configured")
        );
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_kept() {
        let router = Router::new().route(
            "/v1beta/models/:action",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": { "message": "API key not valid" } })),
                )
            }),
        );
        let gemini = provider(serve(router).await, Some("bad"));

        let err = gemini.generate("gemini-1.5-flash", "p", "").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gemini API returned status code 400: API key not valid"
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let router = Router::new().route(
            "/v1beta/models/:action",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let gemini = provider(serve(router).await, Some("k"));

        let err = gemini.generate("gemini-1.5-flash", "p", "").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
