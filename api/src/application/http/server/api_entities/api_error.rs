use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;
use vegscan_core::domain::common::entities::app_errors::CoreError;

pub const INVALID_IMAGE_MESSAGE: &str = "圖片無效";
pub const OCR_EMPTY_MESSAGE: &str = "OCR 未偵測到文字";
pub const ANALYSIS_FAILED_MESSAGE: &str = "OCR/GPT 分析失敗";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    InternalServerError(String),
    #[error("{0}")]
    BadGateway(String),
}

/// Body of every non-2xx response.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Core errors surface as fixed messages; the cause stays in the logs.
impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidImage(_) => ApiError::BadRequest(INVALID_IMAGE_MESSAGE.to_string()),
            CoreError::OcrEmpty => ApiError::UnprocessableEntity(OCR_EMPTY_MESSAGE.to_string()),
            CoreError::UpstreamFailure(_) => {
                ApiError::BadGateway(ANALYSIS_FAILED_MESSAGE.to_string())
            }
            CoreError::MalformedResponse(_)
            | CoreError::MissingConfiguration(_)
            | CoreError::InvalidConfiguration(_) => {
                ApiError::InternalServerError(ANALYSIS_FAILED_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor that runs `validator` rules before the handler sees the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
