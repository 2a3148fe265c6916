use std::fmt;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label_scan::helpers::{image_fingerprint, is_image_mime_type},
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone, Default)]
pub struct ClassifyLabelInput {
    pub image_data: Option<Vec<u8>>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClassifyTextInput {
    pub text: String,
}

/// A validated image payload. Owned by the pipeline for one request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBytes {
    data: Vec<u8>,
    mime_type: String,
}

impl ImageBytes {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Result<Self, CoreError> {
        let mime_type = mime_type.into();

        if !is_image_mime_type(&mime_type) {
            return Err(CoreError::InvalidImage(format!(
                "unsupported content type: {}",
                mime_type
            )));
        }
        if data.is_empty() {
            return Err(CoreError::InvalidImage("image is empty".to_string()));
        }
        if data.len() > MAX_IMAGE_SIZE {
            return Err(CoreError::InvalidImage(format!(
                "image is {} bytes, max is {}",
                data.len(),
                MAX_IMAGE_SIZE
            )));
        }

        Ok(Self { data, mime_type })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn fingerprint(&self) -> String {
        image_fingerprint(&self.data)
    }
}

impl fmt::Debug for ImageBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBytes")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl TryFrom<ClassifyLabelInput> for ImageBytes {
    type Error = CoreError;

    fn try_from(input: ClassifyLabelInput) -> Result<Self, Self::Error> {
        let data = input
            .image_data
            .ok_or_else(|| CoreError::InvalidImage("image is missing".to_string()))?;
        let mime_type = input
            .mime_type
            .ok_or_else(|| CoreError::InvalidImage("content type is missing".to_string()))?;

        ImageBytes::new(data, mime_type)
    }
}

/// Text extracted from an image. Empty means no text was visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrText(String);

impl OcrText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for OcrText {
    fn from(text: String) -> Self {
        Self(text)
    }
}
