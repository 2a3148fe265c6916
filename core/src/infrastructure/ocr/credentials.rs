use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use crate::domain::common::{OcrConfig, entities::app_errors::CoreError};

/// Audience of self-signed JWTs presented to the Vision API.
pub const VISION_AUDIENCE: &str = "https://vision.googleapis.com/";
const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Signs short-lived RS256 tokens for a Google service account.
#[derive(Clone)]
pub struct ServiceAccountSigner {
    client_email: String,
    key_id: Option<String>,
    encoding_key: EncodingKey,
}

impl fmt::Debug for ServiceAccountSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountSigner")
            .field("client_email", &self.client_email)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountSigner {
    /// Decodes a base64 service account JSON key and parses its private key.
    pub fn from_base64(encoded: &str) -> Result<Self, CoreError> {
        let raw = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| {
                CoreError::InvalidConfiguration(format!(
                    "service account key is not valid base64: {}",
                    e
                ))
            })?;

        let key: ServiceAccountKey = serde_json::from_slice(&raw).map_err(|e| {
            CoreError::InvalidConfiguration(format!("service account key is not valid JSON: {}", e))
        })?;

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            CoreError::InvalidConfiguration(format!(
                "service account private key is not a valid RSA PEM: {}",
                e
            ))
        })?;

        Ok(Self {
            client_email: key.client_email,
            key_id: key.private_key_id,
            encoding_key,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn sign(&self, issued_at: i64) -> Result<String, CoreError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        let claims = Claims {
            iss: &self.client_email,
            sub: &self.client_email,
            aud: VISION_AUDIENCE,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign Vision access token: {}", e);
            CoreError::UpstreamFailure(format!("failed to sign access token: {}", e))
        })
    }
}

#[derive(Clone)]
pub enum VisionCredentials {
    ApiKey(String),
    ServiceAccount(ServiceAccountSigner),
}

impl fmt::Debug for VisionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionCredentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            VisionCredentials::ServiceAccount(signer) => {
                f.debug_tuple("ServiceAccount").field(signer).finish()
            }
        }
    }
}

impl VisionCredentials {
    /// Prefers the service account key when both are configured.
    pub fn from_config(config: &OcrConfig) -> Result<Self, CoreError> {
        if let Some(encoded) = config
            .service_account_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
        {
            let signer = ServiceAccountSigner::from_base64(encoded)?;
            tracing::info!(
                client_email = signer.client_email(),
                "Vision requests authenticate with a service account"
            );
            return Ok(VisionCredentials::ServiceAccount(signer));
        }

        config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| VisionCredentials::ApiKey(key.to_string()))
            .ok_or_else(|| {
                CoreError::MissingConfiguration(
                    "vision api key or service account key".to_string(),
                )
            })
    }

    pub fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, CoreError> {
        match self {
            VisionCredentials::ApiKey(key) => Ok(builder.header("x-goog-api-key", key)),
            VisionCredentials::ServiceAccount(signer) => {
                let token = signer.sign(chrono::Utc::now().timestamp())?;
                Ok(builder.bearer_auth(token))
            }
        }
    }
}
