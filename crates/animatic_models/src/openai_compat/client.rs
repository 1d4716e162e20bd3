use super::dto::{ChatCompletionRequest, ChatCompletionResponse};
use crate::{ModelProvider, ProviderSettings};
use animatic_core::{GenerateRequest, GenerateResponse, Output};
use animatic_error::{AnimaticResult, ModelsError, ModelsErrorKind, RetryableError};
use animatic_interface::AnimaticDriver;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, instrument, warn};

/// Client for any provider exposing the OpenAI chat-completions API.
///
/// Transient failures (transport errors, 408/429/5xx) are retried with
/// exponential backoff; everything else is returned immediately.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: ModelProvider,
    max_retries: usize,
    retry_backoff_ms: u64,
    temperature: Option<f32>,
}

impl OpenAICompatibleClient {
    /// Creates a client for one model from shared settings and an existing HTTP client.
    pub fn new(
        http: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        settings: &ProviderSettings,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: settings.endpoint(),
            provider: *settings.kind(),
            max_retries: *settings.max_retries(),
            retry_backoff_ms: *settings.retry_backoff_ms(),
            temperature: *settings.temperature(),
        }
    }

    /// Build the shared HTTP client (timeout and optional proxy).
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or TLS initialisation fails.
    pub fn build_http_client(settings: &ProviderSettings) -> Result<Client, ModelsError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(*settings.timeout_secs()));

        if let Some(proxy) = settings.proxy() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                ModelsError::new(ModelsErrorKind::ClientCreation(format!(
                    "Invalid proxy '{}': {}",
                    proxy, e
                )))
            })?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::ClientCreation(e.to_string())))
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One HTTP round trip, no retry.
    async fn send_once(&self, body: &ChatCompletionRequest) -> Result<String, ModelsError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, endpoint = %self.endpoint, "Failed to send chat completion request");
                ModelsError::new(ModelsErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Provider returned error");
            let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                ModelsErrorKind::RateLimit
            } else {
                ModelsErrorKind::Api {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(ModelsError::new(kind));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }

    /// Send with the configured retry strategy.
    async fn send_with_retry(&self, body: &ChatCompletionRequest) -> Result<String, ModelsError> {
        if self.max_retries == 0 {
            return self.send_once(body).await;
        }

        let strategy = ExponentialBackoff::from_millis(self.retry_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(60))
            .map(jitter)
            .take(self.max_retries);

        let client = self;
        Retry::spawn(strategy, move || async move {
            match client.send_once(body).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, model = %client.model, "Transient model failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await
    }
}

#[async_trait]
impl AnimaticDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = %self.provider, model = %self.model, messages = req.messages().len()))]
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse> {
        let body = ChatCompletionRequest::from_generate(req, &self.model, self.temperature);
        let text = self.send_with_retry(&body).await?;
        debug!(response_length = text.len(), "Received chat completion");
        Ok(GenerateResponse::new(vec![Output::Text(text)]))
    }

    fn provider_name(&self) -> &'static str {
        self.provider.into()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
