use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;
use vegscan_core::domain::label_scan::value_objects::MAX_IMAGE_SIZE;

use super::handlers::{
    classify_label::{__path_classify_label, classify_label},
    classify_text::{__path_classify_text, classify_text},
};
use crate::application::http::server::app_state::AppState;

/// Headroom over the image limit for multipart framing.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(classify_label, classify_text))]
pub struct LabelScanApiDoc;

pub fn label_scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/scan", state.args.server.root_path),
            post(classify_label),
        )
        .route(
            &format!("{}/api/scan/text", state.args.server.root_path),
            post(classify_text),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
}
