//! Builds per-stage drivers that share one HTTP client and credential.

use crate::{OpenAICompatibleClient, ProviderSettings};
use animatic_error::{ModelsError, ModelsErrorKind, ModelsResult};
use animatic_interface::AnimaticDriver;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

/// Creates model drivers for a single provider.
///
/// The API key is read once, when the factory is built; a missing key is a
/// construction error rather than a failure on first use.
#[derive(Debug, Clone)]
pub struct ModelFactory {
    settings: ProviderSettings,
    api_key: String,
    http: Client,
}

impl ModelFactory {
    /// Create a factory, reading the API key from the provider's environment variable.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if the variable is unset or empty, or
    /// `ClientCreation` if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> ModelsResult<Self> {
        let key_env = settings.key_env();
        let api_key = std::env::var(&key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey(key_env.clone())))?;
        Self::with_api_key(settings, api_key)
    }

    /// Create a factory with an explicit API key.
    pub fn with_api_key(settings: ProviderSettings, api_key: impl Into<String>) -> ModelsResult<Self> {
        let http = OpenAICompatibleClient::build_http_client(&settings)?;
        info!(
            provider = %settings.kind(),
            endpoint = %settings.endpoint(),
            proxy = settings.proxy().is_some(),
            "Model factory ready"
        );
        Ok(Self {
            settings,
            api_key: api_key.into(),
            http,
        })
    }

    /// Settings this factory was built from.
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Driver for the named model.
    pub fn create(&self, model: &str) -> Arc<dyn AnimaticDriver> {
        debug!(model, "Creating model driver");
        Arc::new(self.client(model))
    }

    /// Concrete client for the named model.
    pub fn client(&self, model: &str) -> OpenAICompatibleClient {
        OpenAICompatibleClient::new(self.http.clone(), self.api_key.clone(), model, &self.settings)
    }
}
