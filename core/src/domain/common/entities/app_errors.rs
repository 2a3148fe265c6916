use thiserror::Error;

/// Failure kinds surfaced by the scan pipeline.
///
/// The per-request kinds carry a diagnostic detail meant for logs only; the
/// transport layer decides what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("no text detected in image")]
    OcrEmpty,

    #[error("upstream service failure: {0}")]
    UpstreamFailure(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Stable identifiers for the per-request failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    InvalidImage,
    OcrEmpty,
    UpstreamFailure,
    MalformedResponse,
}

impl PipelineErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineErrorKind::InvalidImage => "invalid-image",
            PipelineErrorKind::OcrEmpty => "ocr-empty",
            PipelineErrorKind::UpstreamFailure => "upstream-failure",
            PipelineErrorKind::MalformedResponse => "malformed-response",
        }
    }
}

impl CoreError {
    /// Returns the per-request kind, or `None` for startup-only errors.
    pub fn kind(&self) -> Option<PipelineErrorKind> {
        match self {
            CoreError::InvalidImage(_) => Some(PipelineErrorKind::InvalidImage),
            CoreError::OcrEmpty => Some(PipelineErrorKind::OcrEmpty),
            CoreError::UpstreamFailure(_) => Some(PipelineErrorKind::UpstreamFailure),
            CoreError::MalformedResponse(_) => Some(PipelineErrorKind::MalformedResponse),
            CoreError::MissingConfiguration(_) | CoreError::InvalidConfiguration(_) => None,
        }
    }
}
