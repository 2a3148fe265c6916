use crate::domain::{
    classification::{
        contract::ContractRevision,
        entities::{ClassificationVerdict, ContractVersion, FlagLevel, Severity, SeverityVerdict},
        parser::parse_fenced_json,
        templates::{INSUFFICIENT_CONTENT_NOTE, SEVERITY_V3_TEMPLATE},
    },
    common::entities::app_errors::CoreError,
};

/// Severity-scale contract with per-ingredient flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityRevision;

impl ContractRevision for SeverityRevision {
    fn version(&self) -> ContractVersion {
        ContractVersion::SeverityV3
    }

    fn default_template(&self) -> &'static str {
        SEVERITY_V3_TEMPLATE
    }

    fn parse(&self, raw_reply: &str) -> Result<ClassificationVerdict, CoreError> {
        parse_fenced_json::<SeverityVerdict>(raw_reply).map(ClassificationVerdict::Severity)
    }

    fn validate(&self, verdict: &ClassificationVerdict) -> Result<(), CoreError> {
        let ClassificationVerdict::Severity(graded) = verdict else {
            return Err(CoreError::MalformedResponse(format!(
                "expected a {} verdict, got {}",
                self.version(),
                verdict.version()
            )));
        };

        if graded.explanations.iter().all(|line| line.trim().is_empty()) {
            return Err(CoreError::MalformedResponse(
                "at least one explanation is required".to_string(),
            ));
        }
        if graded
            .flags
            .iter()
            .any(|flag| flag.ingredient.trim().is_empty())
        {
            return Err(CoreError::MalformedResponse(
                "flagged ingredient names must not be empty".to_string(),
            ));
        }

        let high_severity = graded
            .flags
            .iter()
            .filter(|flag| flag.level == Some(FlagLevel::Warning))
            .count();

        graded
            .severity
            .check_flags(graded.flags.len(), high_severity)
            .map_err(CoreError::MalformedResponse)
    }

    fn insufficient_content_verdict(&self) -> ClassificationVerdict {
        ClassificationVerdict::Severity(SeverityVerdict {
            severity: Severity::Indeterminate,
            explanations: vec![INSUFFICIENT_CONTENT_NOTE.to_string()],
            flags: Vec::new(),
            suggestion: String::new(),
        })
    }
}
