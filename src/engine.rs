use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::identifier::IdentifierNamer;
use crate::presets::ObfuscationConfig;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("engine rejected source: {0}")]
    Rejected(String),
    #[error("invalid engine response")]
    InvalidResponse,
}

/// The external transformation engine. Opaque: it receives the source text
/// and the composed option set and either returns the transformed text or
/// fails; its passes are not modeled here.
#[async_trait]
pub trait CodeTransformer: Send + Sync {
    async fn transform(
        &self,
        source: &str,
        config: &ObfuscationConfig,
        namer: &dyn IdentifierNamer,
    ) -> Result<String, TransformError>;
}

// Rename candidates shipped with each request; the engine draws from the
// pool and disambiguates on repeats.
const IDENTIFIER_POOL: usize = 256;

pub struct HttpTransformEngine {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl HttpTransformEngine {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self { endpoint, api_key, client: Client::new() }
    }
}

#[async_trait]
impl CodeTransformer for HttpTransformEngine {
    async fn transform(
        &self,
        source: &str,
        config: &ObfuscationConfig,
        namer: &dyn IdentifierNamer,
    ) -> Result<String, TransformError> {
        let pool: Vec<String> = (0..IDENTIFIER_POOL)
            .map(|_| namer.next_identifier())
            .collect();
        let request_body = serde_json::json!({
            "source": source,
            "options": config.options(),
            "identifierPool": pool,
        });

        let resp: Value = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(reason) = resp["error"].as_str() {
            return Err(TransformError::Rejected(reason.to_string()));
        }
        let output = resp["output"]
            .as_str()
            .ok_or(TransformError::InvalidResponse)?
            .to_string();
        Ok(output)
    }
}
