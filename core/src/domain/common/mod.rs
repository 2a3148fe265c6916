use std::fmt;

use crate::domain::{
    classification::{ContractVersion, GenerationParams},
    common::entities::app_errors::CoreError,
};

pub mod entities;
pub mod services;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Debug)]
pub struct VegScanConfig {
    pub ocr: OcrConfig,
    pub llm: LLMConfig,
    pub contract: ContractConfig,
}

#[derive(Clone)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Base64-encoded service account JSON key.
    pub service_account_key: Option<String>,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_endpoint: String,
}

#[derive(Clone, Debug)]
pub struct ContractConfig {
    pub version: ContractVersion,
    /// Replaces the revision's built-in instruction template when set.
    pub template: Option<String>,
    pub min_content_chars: usize,
    pub generation: GenerationParams,
}

impl fmt::Debug for OcrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcrConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_endpoint", &self.gemini_endpoint)
            .finish()
    }
}

impl VegScanConfig {
    /// Checks that every value the pipeline needs at request time is present
    /// and in range. Called once before the service is built.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.llm.gemini_api_key.trim().is_empty() {
            return Err(CoreError::MissingConfiguration(
                "gemini api key".to_string(),
            ));
        }
        if self.llm.gemini_model.trim().is_empty() {
            return Err(CoreError::MissingConfiguration("gemini model".to_string()));
        }
        if self.llm.gemini_endpoint.trim().is_empty() {
            return Err(CoreError::MissingConfiguration(
                "gemini endpoint".to_string(),
            ));
        }
        if self.ocr.endpoint.trim().is_empty() {
            return Err(CoreError::MissingConfiguration("vision endpoint".to_string()));
        }

        let has_api_key = self
            .ocr
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        let has_service_account = self
            .ocr
            .service_account_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_api_key && !has_service_account {
            return Err(CoreError::MissingConfiguration(
                "vision api key or service account key".to_string(),
            ));
        }

        if self.contract.min_content_chars == 0 {
            return Err(CoreError::InvalidConfiguration(
                "min_content_chars must be at least 1".to_string(),
            ));
        }

        self.contract.generation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VegScanConfig {
        VegScanConfig {
            ocr: OcrConfig {
                endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
                api_key: Some("vision-key".to_string()),
                service_account_key: None,
            },
            llm: LLMConfig {
                gemini_api_key: "gemini-key".to_string(),
                gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
                gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            },
            contract: ContractConfig {
                version: ContractVersion::SeverityV3,
                template: None,
                min_content_chars: 20,
                generation: GenerationParams::default(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_missing_gemini_key() {
        let mut config = config();
        config.llm.gemini_api_key = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(CoreError::MissingConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_vision_credentials() {
        let mut config = config();
        config.ocr.api_key = None;
        assert!(matches!(
            config.validate(),
            Err(CoreError::MissingConfiguration(_))
        ));

        config.ocr.service_account_key = Some("e30=".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_generation() {
        let mut config = config();
        config.contract.generation.top_p = 0.0;
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("vision-key"));
        assert!(!rendered.contains("gemini-key"));
    }
}
