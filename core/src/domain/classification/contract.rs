use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    classification::{
        entities::{ClassificationVerdict, ContractVersion},
        revisions::revision_for,
        templates::{INPUT_PLACEHOLDER, MIN_CHARS_PLACEHOLDER},
    },
    common::{ContractConfig, entities::app_errors::CoreError},
};

/// Sampling parameters forwarded to the generative model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 1.0,
            max_output_tokens: None,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CoreError::InvalidConfiguration(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(CoreError::InvalidConfiguration(format!(
                "top_p must be within (0, 1], got {}",
                self.top_p
            )));
        }
        if self.max_output_tokens == Some(0) {
            return Err(CoreError::InvalidConfiguration(
                "max_output_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One filled prompt, ready to send to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    pub prompt: String,
    pub generation: GenerationParams,
}

/// Behaviour that changes between contract revisions.
pub trait ContractRevision: Send + Sync {
    fn version(&self) -> ContractVersion;

    fn default_template(&self) -> &'static str;

    /// Structural parse of the raw model reply.
    fn parse(&self, raw_reply: &str) -> Result<ClassificationVerdict, CoreError>;

    /// Cross-field consistency of a parsed verdict.
    fn validate(&self, verdict: &ClassificationVerdict) -> Result<(), CoreError>;

    /// Verdict returned when the label text is too short to classify.
    fn insufficient_content_verdict(&self) -> ClassificationVerdict;
}

pub struct PromptContract {
    revision: Box<dyn ContractRevision>,
    template: String,
    min_content_chars: usize,
    generation: GenerationParams,
}

impl fmt::Debug for PromptContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptContract")
            .field("version", &self.revision.version())
            .field("min_content_chars", &self.min_content_chars)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl PromptContract {
    pub fn from_config(config: &ContractConfig) -> Result<Self, CoreError> {
        let revision = revision_for(config.version);
        let template = config
            .template
            .clone()
            .unwrap_or_else(|| revision.default_template().to_string());

        if !template.contains(INPUT_PLACEHOLDER) {
            return Err(CoreError::InvalidConfiguration(format!(
                "prompt template must contain the {} placeholder",
                INPUT_PLACEHOLDER
            )));
        }
        if config.min_content_chars == 0 {
            return Err(CoreError::InvalidConfiguration(
                "min_content_chars must be at least 1".to_string(),
            ));
        }
        config.generation.validate()?;

        Ok(Self {
            revision,
            template,
            min_content_chars: config.min_content_chars,
            generation: config.generation,
        })
    }

    pub fn version(&self) -> ContractVersion {
        self.revision.version()
    }

    pub fn min_content_chars(&self) -> usize {
        self.min_content_chars
    }

    pub fn generation(&self) -> GenerationParams {
        self.generation
    }

    /// Whether `text` has enough non-whitespace characters to be worth
    /// sending to the model.
    pub fn has_sufficient_content(&self, text: &str) -> bool {
        text.chars().filter(|c| !c.is_whitespace()).count() >= self.min_content_chars
    }

    pub fn build_request(&self, text: &str) -> ClassificationRequest {
        let prompt = self
            .template
            .replace(MIN_CHARS_PLACEHOLDER, &self.min_content_chars.to_string())
            .replace(INPUT_PLACEHOLDER, text.trim());

        ClassificationRequest {
            prompt,
            generation: self.generation,
        }
    }

    /// Parses the reply and checks it against the revision's invariants.
    pub fn parse_reply(&self, raw_reply: &str) -> Result<ClassificationVerdict, CoreError> {
        let verdict = self.revision.parse(raw_reply)?;
        self.revision.validate(&verdict)?;
        Ok(verdict)
    }

    pub fn insufficient_content_verdict(&self) -> ClassificationVerdict {
        self.revision.insufficient_content_verdict()
    }
}
