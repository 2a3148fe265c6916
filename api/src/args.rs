use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser};
use validator::Validate;
use vegscan_core::domain::{
    classification::{ContractVersion, GenerationParams},
    common::{
        ContractConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_VISION_ENDPOINT,
        LLMConfig, OcrConfig, VegScanConfig,
    },
};

#[derive(Clone, Parser, Validate)]
#[command(name = "vegscan-api", version, about = "Ingredient label vegetarian classifier")]
pub struct Args {
    #[command(flatten)]
    #[validate(nested)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    #[validate(nested)]
    pub contract: ContractArgs,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/vegscan`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "vision-endpoint", env = "VISION_ENDPOINT", default_value = DEFAULT_VISION_ENDPOINT)]
    pub endpoint: String,

    #[arg(long = "vision-api-key", env = "GCV_API_KEY")]
    pub api_key: Option<String>,

    /// Base64-encoded service account JSON key.
    #[arg(long = "vision-service-account", env = "GCV_BASE_64")]
    pub service_account_key: Option<String>,
}

#[derive(Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY")]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-endpoint", env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub gemini_endpoint: String,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct ContractArgs {
    #[arg(id = "contract_version", long = "contract-version", env = "CONTRACT_VERSION", default_value = "severity-v3")]
    pub version: ContractVersion,

    /// File whose content replaces the built-in instruction template.
    #[arg(long = "prompt-template-path", env = "PROMPT_TEMPLATE_PATH")]
    pub template_path: Option<PathBuf>,

    #[arg(long = "min-content-chars", env = "MIN_CONTENT_CHARS", default_value_t = 20)]
    #[validate(range(min = 1))]
    pub min_content_chars: usize,

    #[arg(long = "temperature", env = "LLM_TEMPERATURE", default_value_t = 0.1)]
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,

    #[arg(long = "top-p", env = "LLM_TOP_P", default_value_t = 1.0)]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub top_p: f32,

    #[arg(long = "max-output-tokens", env = "LLM_MAX_OUTPUT_TOKENS")]
    #[validate(range(min = 1))]
    pub max_output_tokens: Option<u32>,
}

impl ContractArgs {
    fn load_template(&self) -> Result<Option<String>, anyhow::Error> {
        self.template_path
            .as_ref()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read prompt template {}", path.display()))
            })
            .transpose()
    }
}

impl TryFrom<Args> for VegScanConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let template = args.contract.load_template()?;

        Ok(VegScanConfig {
            ocr: OcrConfig {
                endpoint: args.ocr.endpoint,
                api_key: args.ocr.api_key,
                service_account_key: args.ocr.service_account_key,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_endpoint: args.llm.gemini_endpoint,
            },
            contract: ContractConfig {
                version: args.contract.version,
                template,
                min_content_chars: args.contract.min_content_chars,
                generation: GenerationParams {
                    temperature: args.contract.temperature,
                    top_p: args.contract.top_p,
                    max_output_tokens: args.contract.max_output_tokens,
                },
            },
        })
    }
}
