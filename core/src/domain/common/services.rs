use std::sync::Arc;

use crate::domain::{
    classification::PromptContract,
    label_scan::ports::{LLMClient, OcrClient},
};

/// Holds the process-wide collaborators of the scan pipeline.
///
/// Everything here is built once at startup and only read afterwards, so
/// cloning the service hands out cheap shared handles.
pub struct Service<O, L>
where
    O: OcrClient,
    L: LLMClient,
{
    pub(crate) ocr_client: Arc<O>,
    pub(crate) llm_client: Arc<L>,
    pub(crate) contract: Arc<PromptContract>,
}

impl<O, L> Service<O, L>
where
    O: OcrClient,
    L: LLMClient,
{
    pub fn new(ocr_client: O, llm_client: L, contract: PromptContract) -> Self {
        Self {
            ocr_client: Arc::new(ocr_client),
            llm_client: Arc::new(llm_client),
            contract: Arc::new(contract),
        }
    }

    pub fn contract(&self) -> &PromptContract {
        &self.contract
    }
}

impl<O, L> Clone for Service<O, L>
where
    O: OcrClient,
    L: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            ocr_client: Arc::clone(&self.ocr_client),
            llm_client: Arc::clone(&self.llm_client),
            contract: Arc::clone(&self.contract),
        }
    }
}
