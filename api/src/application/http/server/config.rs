use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;
use vegscan_core::domain::classification::{ContractVersion, GenerationParams};

use crate::application::http::server::app_state::AppState;

/// Public view of the active configuration. Never carries credentials.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    pub contract_version: ContractVersion,
    pub labels: Vec<String>,
    pub model: String,
    pub min_content_chars: usize,
    pub generation: GenerationParams,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Active classification settings",
    responses(
        (status = 200, body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let contract = state.service.contract();
    let version = contract.version();

    Json(ConfigResponse {
        contract_version: version,
        labels: version.labels().iter().map(|label| label.to_string()).collect(),
        model: state.args.llm.gemini_model.clone(),
        min_content_chars: contract.min_content_chars(),
        generation: contract.generation(),
    })
}
