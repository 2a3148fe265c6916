use crate::{
    domain::{
        classification::PromptContract,
        common::{VegScanConfig, entities::app_errors::CoreError, services::Service},
    },
    infrastructure::{llm::GeminiLLMClient, ocr::CloudVisionOcrClient},
};

pub type VegScanService = Service<CloudVisionOcrClient, GeminiLLMClient>;

/// Validates the configuration and wires the production clients.
///
/// Any error here is fatal: the process must not start serving requests.
pub async fn create_service(config: VegScanConfig) -> Result<VegScanService, CoreError> {
    config.validate()?;

    let contract = PromptContract::from_config(&config.contract)?;
    let ocr_client = CloudVisionOcrClient::from_config(&config.ocr)?;
    let llm_client = GeminiLLMClient::from_config(&config.llm);

    tracing::info!(
        contract = %contract.version(),
        model = %llm_client.model_name(),
        "Label scan service ready"
    );

    Ok(Service::new(ocr_client, llm_client, contract))
}
