use crate::domain::{
    classification::{
        contract::ContractRevision,
        entities::{ClassificationVerdict, ContractVersion, DietaryVerdict},
        parser::parse_fenced_json,
        templates::{DIETARY_V1_TEMPLATE, INSUFFICIENT_CONTENT_NOTE},
    },
    common::entities::app_errors::CoreError,
};

/// Boolean vegetarian/vegan contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct DietaryRevision;

impl ContractRevision for DietaryRevision {
    fn version(&self) -> ContractVersion {
        ContractVersion::DietaryV1
    }

    fn default_template(&self) -> &'static str {
        DIETARY_V1_TEMPLATE
    }

    fn parse(&self, raw_reply: &str) -> Result<ClassificationVerdict, CoreError> {
        parse_fenced_json::<DietaryVerdict>(raw_reply).map(ClassificationVerdict::Dietary)
    }

    fn validate(&self, verdict: &ClassificationVerdict) -> Result<(), CoreError> {
        let ClassificationVerdict::Dietary(dietary) = verdict else {
            return Err(CoreError::MalformedResponse(format!(
                "expected a {} verdict, got {}",
                self.version(),
                verdict.version()
            )));
        };

        if dietary.reasoning.trim().is_empty() {
            return Err(CoreError::MalformedResponse(
                "reasoning must not be empty".to_string(),
            ));
        }
        if dietary.vegan && !dietary.vegetarian {
            return Err(CoreError::MalformedResponse(
                "a vegan product is also vegetarian".to_string(),
            ));
        }

        let flagged = dietary.risky_keywords.len();
        verdict
            .severity()
            .check_flags(flagged, flagged)
            .map_err(CoreError::MalformedResponse)
    }

    fn insufficient_content_verdict(&self) -> ClassificationVerdict {
        ClassificationVerdict::Dietary(DietaryVerdict {
            vegetarian: false,
            vegan: false,
            reasoning: INSUFFICIENT_CONTENT_NOTE.to_string(),
            risky_keywords: Vec::new(),
        })
    }
}
