use crate::domain::{
    classification::{
        contract::ContractRevision,
        entities::{CategoryVerdict, ClassificationVerdict, ContractVersion, VegetarianCategory},
        parser::parse_fenced_json,
        templates::{CATEGORY_V2_TEMPLATE, INSUFFICIENT_CONTENT_NOTE},
    },
    common::entities::app_errors::CoreError,
};

/// Five-category vegetarian contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRevision;

impl ContractRevision for CategoryRevision {
    fn version(&self) -> ContractVersion {
        ContractVersion::CategoryV2
    }

    fn default_template(&self) -> &'static str {
        CATEGORY_V2_TEMPLATE
    }

    fn parse(&self, raw_reply: &str) -> Result<ClassificationVerdict, CoreError> {
        parse_fenced_json::<CategoryVerdict>(raw_reply).map(ClassificationVerdict::Category)
    }

    fn validate(&self, verdict: &ClassificationVerdict) -> Result<(), CoreError> {
        let ClassificationVerdict::Category(category) = verdict else {
            return Err(CoreError::MalformedResponse(format!(
                "expected a {} verdict, got {}",
                self.version(),
                verdict.version()
            )));
        };

        if category.reasoning.trim().is_empty() {
            return Err(CoreError::MalformedResponse(
                "reasoning must not be empty".to_string(),
            ));
        }

        let flagged = category.risky_keywords.len();
        category
            .category
            .severity()
            .check_flags(flagged, flagged)
            .map_err(CoreError::MalformedResponse)
    }

    fn insufficient_content_verdict(&self) -> ClassificationVerdict {
        ClassificationVerdict::Category(CategoryVerdict {
            category: VegetarianCategory::Indeterminate,
            reasoning: INSUFFICIENT_CONTENT_NOTE.to_string(),
            risky_keywords: Vec::new(),
        })
    }
}
