use std::future::Future;

use crate::domain::{
    classification::ClassificationRequest,
    common::entities::app_errors::CoreError,
    label_scan::{
        entities::ScanOutcome,
        value_objects::{ClassifyLabelInput, ClassifyTextInput, ImageBytes, OcrText},
    },
};

/// Text-detection backend.
///
/// An empty [`OcrText`] is a valid answer meaning no text was visible;
/// transport or service errors are [`CoreError::UpstreamFailure`].
#[cfg_attr(test, mockall::automock)]
pub trait OcrClient: Send + Sync {
    fn extract_text(
        &self,
        image: ImageBytes,
    ) -> impl Future<Output = Result<OcrText, CoreError>> + Send;
}

/// LLM Client trait for calling generative models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the text of the first candidate reply.
    fn generate(
        &self,
        request: ClassificationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the label scan pipeline
pub trait LabelScanService: Send + Sync {
    fn classify_label(
        &self,
        input: ClassifyLabelInput,
    ) -> impl Future<Output = Result<ScanOutcome, CoreError>> + Send;

    fn classify_text(
        &self,
        input: ClassifyTextInput,
    ) -> impl Future<Output = Result<ScanOutcome, CoreError>> + Send;
}
