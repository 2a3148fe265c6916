use axum::extract::{Multipart, State, multipart::MultipartRejection};
use vegscan_core::domain::label_scan::{
    entities::ScanOutcome, ports::LabelScanService, value_objects::ClassifyLabelInput,
};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ErrorBody, INVALID_IMAGE_MESSAGE},
        response::Response,
    },
    app_state::AppState,
};

const IMAGE_FIELD: &str = "image";

fn invalid_image(cause: impl std::fmt::Display) -> ApiError {
    tracing::warn!("Rejected scan upload: {}", cause);
    ApiError::BadRequest(INVALID_IMAGE_MESSAGE.to_string())
}

#[utoipa::path(
    post,
    path = "/scan",
    tag = "label-scan",
    summary = "Classify an ingredient label photo",
    description = "Runs OCR on the uploaded image and classifies the extracted ingredients for vegetarian suitability",
    request_body(content_type = "multipart/form-data", description = "Multipart form with a single `image` file field"),
    responses(
        (status = 200, body = ScanOutcome),
        (status = 400, description = "Missing, empty or non-image upload", body = ErrorBody),
        (status = 422, description = "No text detected in the image", body = ErrorBody),
        (status = 500, description = "Model reply did not follow the contract", body = ErrorBody),
        (status = 502, description = "OCR or model service failed", body = ErrorBody)
    )
)]
pub async fn classify_label(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<ScanOutcome>, ApiError> {
    let mut multipart = multipart.map_err(invalid_image)?;
    let mut input = ClassifyLabelInput::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_image)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        input.mime_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(invalid_image)?;
        input.image_data = Some(data.to_vec());
        break;
    }

    let outcome = state
        .service
        .classify_label(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(outcome))
}
