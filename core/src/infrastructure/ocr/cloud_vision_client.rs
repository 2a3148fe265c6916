use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        common::{OcrConfig, entities::app_errors::CoreError},
        label_scan::{
            ports::OcrClient,
            value_objects::{ImageBytes, OcrText},
        },
    },
    infrastructure::ocr::credentials::VisionCredentials,
};

/// OCR adapter backed by the Google Cloud Vision `images:annotate` API.
#[derive(Debug, Clone)]
pub struct CloudVisionOcrClient {
    endpoint: String,
    credentials: VisionCredentials,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: Image,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct Image {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    full_text_annotation: Option<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl CloudVisionOcrClient {
    pub fn new(endpoint: String, credentials: VisionCredentials) -> Self {
        Self {
            endpoint,
            credentials,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Result<Self, CoreError> {
        let credentials = VisionCredentials::from_config(config)?;
        Ok(Self::new(config.endpoint.clone(), credentials))
    }
}

/// Picks the primary annotation's full text, falling back to the dense
/// document annotation. No annotation at all means no visible text.
fn extract_annotation_text(response: AnnotateResponse) -> Result<OcrText, CoreError> {
    let image_response = response.responses.into_iter().next().unwrap_or_default();

    if let Some(status) = image_response.error {
        tracing::error!(
            "Vision API rejected image: {} - {}",
            status.code,
            status.message
        );
        return Err(CoreError::UpstreamFailure(format!(
            "OCR service returned error code {}",
            status.code
        )));
    }

    let text = image_response
        .text_annotations
        .into_iter()
        .next()
        .map(|annotation| annotation.description)
        .filter(|text| !text.is_empty())
        .or_else(|| image_response.full_text_annotation.map(|a| a.text))
        .unwrap_or_default();

    Ok(OcrText::new(text))
}

impl OcrClient for CloudVisionOcrClient {
    async fn extract_text(&self, image: ImageBytes) -> Result<OcrText, CoreError> {
        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: Image {
                    content: general_purpose::STANDARD.encode(image.data()),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        };

        let builder = self.credentials.authorize(self.client.post(&self.endpoint))?;

        let response = builder.json(&request).send().await.map_err(|e| {
            tracing::error!("Vision API request failed: {}", e);
            CoreError::UpstreamFailure(format!("OCR API error: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, error_text);
            return Err(CoreError::UpstreamFailure(format!(
                "OCR API returned error: {}",
                status
            )));
        }

        let annotate_response: AnnotateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Vision response: {}", e);
            CoreError::UpstreamFailure(format!("Failed to parse OCR response: {}", e))
        })?;

        extract_annotation_text(annotate_response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Result<OcrText, CoreError> {
        extract_annotation_text(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_uses_first_annotation() {
        let text = parse(json!({
            "responses": [{
                "textAnnotations": [
                    { "description": "成分:腰果、糖、蜂蜜\n淨重160公克" },
                    { "description": "成分" }
                ],
                "fullTextAnnotation": { "text": "ignored" }
            }]
        }))
        .unwrap();
        assert_eq!(text.as_str(), "成分:腰果、糖、蜂蜜\n淨重160公克");
    }

    #[test]
    fn test_falls_back_to_full_text() {
        let text = parse(json!({
            "responses": [{ "fullTextAnnotation": { "text": "water, sugar" } }]
        }))
        .unwrap();
        assert_eq!(text.as_str(), "water, sugar");
    }

    #[test]
    fn test_no_text_is_empty_not_error() {
        assert!(parse(json!({ "responses": [{}] })).unwrap().is_blank());
        assert!(parse(json!({})).unwrap().is_blank());
    }

    #[test]
    fn test_per_image_error_is_upstream_failure() {
        let result = parse(json!({
            "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
        }));
        assert!(matches!(result, Err(CoreError::UpstreamFailure(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: Image {
                    content: general_purpose::STANDARD.encode([1u8, 2, 3]),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["requests"][0]["image"]["content"], "AQID");
        assert_eq!(value["requests"][0]["features"][0]["type"], "TEXT_DETECTION");
    }
}
