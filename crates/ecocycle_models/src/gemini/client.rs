//! Google Gemini REST implementation of [`AdviceProvider`].

use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use std::env;
use tracing::{debug, instrument, warn};

use ecocycle_error::{ProviderError, ProviderErrorKind, ProviderResult};
use ecocycle_interface::{AdviceProvider, AdviceRequest};
use ecocycle_rate_limit::ProviderConfig;

use crate::parse_provider_error;

/// Gemini-backed advice provider.
///
/// A missing API key does not fail construction. The gateway is built at
/// startup either way, and the first [`generate`](AdviceProvider::generate)
/// call reports [`ProviderErrorKind::MissingApiKey`].
pub struct GeminiProvider {
    client: Option<Gemini>,
    model_name: String,
    api_key_env: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("model_name", &self.model_name)
            .field("api_key_env", &self.api_key_env)
            .field("configured", &self.client.is_some())
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Unrecognised names use `Model::Custom` with the `models/` prefix the
    /// API requires.
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-1.5-flash" → Model::Custom("models/gemini-1.5-flash")
    /// - "models/gemini-1.5-flash" → Model::Custom("models/gemini-1.5-flash") (preserved)
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Build a provider from configuration, reading the key from `api_key_env`.
    #[instrument(name = "gemini_provider_new", skip(config), fields(model = %config.model))]
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        match env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Self::with_api_key(key, &config.model),
            _ => {
                warn!(env = %config.api_key_env, "API key not set; advice requests will fail");
                Ok(Self {
                    client: None,
                    model_name: config.model.clone(),
                    api_key_env: config.api_key_env.clone(),
                })
            }
        }
    }

    /// Build a provider with an explicit API key.
    pub fn with_api_key(api_key: impl AsRef<str>, model: &str) -> ProviderResult<Self> {
        let client = Gemini::with_model(api_key.as_ref(), Self::model_name_to_enum(model))
            .map_err(|e| ProviderError::new(ProviderErrorKind::ClientCreation(e.to_string())))?;
        debug!(model, "Created Gemini client");
        Ok(Self {
            client: Some(client),
            model_name: model.to_string(),
            api_key_env: String::new(),
        })
    }

    /// Whether an API key was available at construction.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl AdviceProvider for GeminiProvider {
    #[instrument(skip(self, req), fields(model = %self.model_name, prompt_len = req.prompt().len()))]
    async fn generate(&self, req: &AdviceRequest) -> ProviderResult<String> {
        let Some(client) = &self.client else {
            return Err(ProviderError::new(ProviderErrorKind::MissingApiKey(
                self.api_key_env.clone(),
            )));
        };

        let generation = req.generation();
        let response = client
            .generate_content()
            .with_user_message(req.prompt())
            .with_temperature(*generation.temperature())
            .with_top_k(*generation.top_k() as i32)
            .with_top_p(*generation.top_p())
            .with_max_output_tokens(*generation.max_output_tokens() as i32)
            .execute()
            .await
            .map_err(parse_provider_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
        }
        debug!(response_len = text.len(), "Gemini response received");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
