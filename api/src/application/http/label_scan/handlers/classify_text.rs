use axum::extract::State;
use vegscan_core::domain::label_scan::{
    entities::ScanOutcome, ports::LabelScanService, value_objects::ClassifyTextInput,
};

use crate::application::http::{
    label_scan::validators::ClassifyTextRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorBody, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/scan/text",
    tag = "label-scan",
    summary = "Classify ingredient text",
    description = "Classifies already-extracted ingredient text, skipping OCR",
    request_body = ClassifyTextRequest,
    responses(
        (status = 200, body = ScanOutcome),
        (status = 400, description = "Text missing or out of bounds", body = ErrorBody),
        (status = 422, description = "Text is blank", body = ErrorBody),
        (status = 500, description = "Model reply did not follow the contract", body = ErrorBody),
        (status = 502, description = "Model service failed", body = ErrorBody)
    )
)]
pub async fn classify_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ClassifyTextRequest>,
) -> Result<Response<ScanOutcome>, ApiError> {
    let outcome = state
        .service
        .classify_text(ClassifyTextInput { text: payload.text })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(outcome))
}
