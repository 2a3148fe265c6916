use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
}

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(
        &format!("{}/health/live", root_path),
        get(|| async { Json(Liveness { status: "ok" }) }),
    )
}
