use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    classification::{ClassificationRequest, GenerationParams},
    common::{LLMConfig, entities::app_errors::CoreError},
    label_scan::ports::LLMClient,
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    endpoint: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl From<GenerationParams> for GenerationConfig {
    fn from(params: GenerationParams) -> Self {
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(api_key: String, model_name: String, endpoint: String) -> Self {
        Self {
            api_key,
            model_name,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_endpoint.clone(),
        )
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::UpstreamFailure(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::UpstreamFailure(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::UpstreamFailure(format!("Failed to parse LLM response: {}", e))
        })?;

        reply_text(gemini_response)
    }
}

/// Text of the first part of the first candidate, if any.
fn first_candidate_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|p| p.text)
}

/// A reply without candidate text (safety block, empty candidate list) is
/// treated as a reply that broke the contract.
fn reply_text(response: GeminiResponse) -> Result<String, CoreError> {
    first_candidate_text(response).ok_or_else(|| {
        tracing::error!("Gemini response carried no candidate text");
        CoreError::MalformedResponse("model reply has no candidate text".to_string())
    })
}

impl LLMClient for GeminiLLMClient {
    async fn generate(&self, request: ClassificationRequest) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: Some(request.generation.into()),
        };

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: Some(GenerationParams::default().into()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["generation_config"]["top_p"], 1.0);
        assert!(value["generation_config"].get("max_output_tokens").is_none());
    }

    #[test]
    fn test_first_candidate_text() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(first_candidate_text(response), Some("first".to_string()));
    }

    #[test]
    fn test_blocked_candidate_has_no_text() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(first_candidate_text(response), None);

        let empty: GeminiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(first_candidate_text(empty), None);
    }

    #[test]
    fn test_missing_candidate_text_is_malformed() {
        let blocked: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert!(matches!(
            reply_text(blocked),
            Err(CoreError::MalformedResponse(_))
        ));

        let empty: GeminiResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            reply_text(empty),
            Err(CoreError::MalformedResponse(_))
        ));
    }
}
