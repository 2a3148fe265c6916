use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::classification::ClassificationVerdict;

/// Successful result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub ocr_text: String,
    pub result: ClassificationVerdict,
}

/// Stages a scan passes through; used to tag failures in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    ReceivedImage,
    Validated,
    OcrComplete,
    ClassificationRequested,
    Parsed,
    Done,
}

impl ScanStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStage::ReceivedImage => "received_image",
            ScanStage::Validated => "validated",
            ScanStage::OcrComplete => "ocr_complete",
            ScanStage::ClassificationRequested => "classification_requested",
            ScanStage::Parsed => "parsed",
            ScanStage::Done => "done",
        }
    }
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
