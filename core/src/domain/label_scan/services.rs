use tracing::instrument;

use crate::domain::{
    common::{
        entities::app_errors::{CoreError, PipelineErrorKind},
        services::Service,
    },
    label_scan::{
        entities::{ScanOutcome, ScanStage},
        ports::{LLMClient, LabelScanService, OcrClient},
        value_objects::{ClassifyLabelInput, ClassifyTextInput, ImageBytes},
    },
};

/// Logs a failure with the stage it happened in and hands the error back.
fn stage_failure(stage: ScanStage, error: CoreError) -> CoreError {
    match error.kind() {
        Some(PipelineErrorKind::InvalidImage | PipelineErrorKind::OcrEmpty) => {
            tracing::warn!(stage = %stage, error = %error, "Label scan rejected");
        }
        _ => {
            tracing::error!(stage = %stage, error = %error, "Label scan failed");
        }
    }
    error
}

fn as_upstream(error: CoreError) -> CoreError {
    match error {
        CoreError::UpstreamFailure(_) => error,
        other => CoreError::UpstreamFailure(other.to_string()),
    }
}

impl<O, L> Service<O, L>
where
    O: OcrClient,
    L: LLMClient,
{
    /// Runs the guard, model call and parse on text that is known not to be
    /// blank.
    async fn classify_ocr_text(&self, ocr_text: String) -> Result<ScanOutcome, CoreError> {
        if !self.contract.has_sufficient_content(&ocr_text) {
            tracing::info!(
                min_content_chars = self.contract.min_content_chars(),
                "Label text below minimum content, skipping model call"
            );
            return Ok(ScanOutcome {
                ocr_text,
                result: self.contract.insufficient_content_verdict(),
            });
        }

        let request = self.contract.build_request(&ocr_text);
        let raw_reply = self
            .llm_client
            .generate(request)
            .await
            .map_err(|e| stage_failure(ScanStage::ClassificationRequested, as_upstream(e)))?;

        let verdict = self
            .contract
            .parse_reply(&raw_reply)
            .map_err(|e| stage_failure(ScanStage::Parsed, e))?;

        tracing::info!(
            stage = %ScanStage::Done,
            severity = ?verdict.severity(),
            flags = verdict.flagged_ingredients().len(),
            "Label classified"
        );

        Ok(ScanOutcome {
            ocr_text,
            result: verdict,
        })
    }
}

impl<O, L> LabelScanService for Service<O, L>
where
    O: OcrClient,
    L: LLMClient,
{
    #[instrument(
        skip_all,
        fields(contract = %self.contract.version(), image_sha256 = tracing::field::Empty)
    )]
    async fn classify_label(&self, input: ClassifyLabelInput) -> Result<ScanOutcome, CoreError> {
        // 1. Validate the upload
        let image = ImageBytes::try_from(input)
            .map_err(|e| stage_failure(ScanStage::ReceivedImage, e))?;

        tracing::Span::current().record("image_sha256", image.fingerprint().as_str());
        tracing::debug!(
            mime_type = image.mime_type(),
            size = image.len(),
            "Image validated"
        );

        // 2. OCR
        let ocr_text = self
            .ocr_client
            .extract_text(image)
            .await
            .map_err(|e| stage_failure(ScanStage::Validated, as_upstream(e)))?;

        if ocr_text.is_blank() {
            return Err(stage_failure(ScanStage::OcrComplete, CoreError::OcrEmpty));
        }

        // 3. Classify
        self.classify_ocr_text(ocr_text.into_inner()).await
    }

    #[instrument(skip_all, fields(contract = %self.contract.version()))]
    async fn classify_text(&self, input: ClassifyTextInput) -> Result<ScanOutcome, CoreError> {
        if input.text.trim().is_empty() {
            return Err(stage_failure(ScanStage::OcrComplete, CoreError::OcrEmpty));
        }

        self.classify_ocr_text(input.text).await
    }
}
