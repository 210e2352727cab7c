use super::types::*;
use crate::{
    Error, Result,
    config::{API_KEY_ENV, LlmConfig},
};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::{sync::OnceLock, time::Duration};
use tracing::debug;

/// One call against a multimodal text generation service.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the raw text of the model's reply. No retries, no caching.
    async fn generate(&self, input: GenerationInput) -> Result<String>;
}

/// Client for Gemini through its OpenAI-compatible endpoint.
///
/// The underlying HTTP client is built on first use, so a missing API key only
/// surfaces when a request actually needs it.
pub struct GeminiClient {
    config: LlmConfig,
    client: OnceLock<Client<OpenAIConfig>>,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn client(&self) -> Result<&Client<OpenAIConfig>> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "No API key configured; set llm.api_key or {}",
                    API_KEY_ENV
                ))
            })?;

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if !self.config.base_url.is_empty() {
            openai_config =
                openai_config.with_api_base(self.config.base_url.trim_end_matches('/'));
        }

        let mut client = Client::with_config(openai_config);
        if let Some(secs) = self.config.request_timeout_secs {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;
            client = client.with_http_client(http_client);
        }

        debug!("Initialized generation client for model {}", self.config.model);
        Ok(self.client.get_or_init(|| client))
    }

    fn build_request(
        &self,
        input: GenerationInput,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        let text_part = openai_types::ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(input.prompt)
            .build()?;

        let image_url = openai_types::ImageUrlArgs::default()
            .url(input.image.data_url())
            .detail(openai_types::ImageDetail::Auto)
            .build()?;
        let image_part = openai_types::ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(image_url)
            .build()?;

        let message = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(openai_types::ChatCompletionRequestUserMessageContent::Array(
                vec![
                    openai_types::ChatCompletionRequestUserMessageContentPart::Text(text_part),
                    openai_types::ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        image_part,
                    ),
                ],
            ))
            .build()?;

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.config.model)
            .messages(vec![message.into()])
            .response_format(openai_types::ResponseFormat::JsonObject);

        if let Some(temperature) = self.config.temperature {
            request_builder.temperature(temperature);
        }

        Ok(request_builder.build()?)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, input: GenerationInput) -> Result<String> {
        let client = self.client()?;

        debug!(
            "Requesting generation from {} with {} prompt chars and a {} image",
            self.config.model,
            input.prompt.len(),
            input.image.mime_type
        );

        let request = self.build_request(input)?;
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::generation(e.to_string()))?;

        debug!(
            "Received generation response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::generation("Generation service returned no text"))
    }
}
