use super::{
    form::FormSource,
    fsm::{AnalyzeEvent, AnalyzeStateMachine},
};
use crate::{
    Error, Result,
    config::{Config, ImageConfig},
    imaging::{self, ScratchImage, UploadedImage},
    llm::{GeminiClient, GenerationInput, GenerationResult, InlineImage, LlmClient},
    prompt::{self, GenerationRequest},
};
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info, warn};

/// Runs the analyze pipeline: parse, validate, normalize, compose, generate, parse result.
pub struct Analyzer {
    llm_client: Arc<dyn LlmClient>,
    image_config: ImageConfig,
    scratch_dir: PathBuf,
}

impl Analyzer {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        image_config: ImageConfig,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            llm_client,
            image_config,
            scratch_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let scratch_dir = config
            .server
            .scratch_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        info!(
            "Analyzer using model {} with scratch dir {}",
            config.llm.model,
            scratch_dir.display()
        );

        Self::new(
            Arc::new(GeminiClient::new(config.llm.clone())),
            config.image.clone(),
            scratch_dir,
        )
    }

    pub async fn process<F>(&self, source: &mut F) -> Result<GenerationResult>
    where
        F: FormSource + ?Sized,
    {
        let mut fsm = AnalyzeStateMachine::new();

        match self.run(&mut fsm, source).await {
            Ok(result) => {
                info!("Analyze request completed");
                Ok(result)
            }
            Err(e) => {
                fsm.fail(&e);
                Err(e)
            }
        }
    }

    async fn run<F>(
        &self,
        fsm: &mut AnalyzeStateMachine,
        source: &mut F,
    ) -> Result<GenerationResult>
    where
        F: FormSource + ?Sized,
    {
        fsm.transition(AnalyzeEvent::RequestReceived)?;
        let form = source.read_form().await?;
        fsm.transition(AnalyzeEvent::FormParsed)?;

        let (image, theme, options) = form.into_parts()?;
        let request = GenerationRequest::new(theme, options)?;
        info!(
            "Analyzing {} byte upload ({}) for theme '{}'",
            image.bytes.len(),
            image.content_type.as_deref().unwrap_or("unknown type"),
            theme
        );
        fsm.transition(AnalyzeEvent::FieldsValidated)?;

        let (scratch, encoded) = self.prepare_image(image).await?;
        fsm.transition(AnalyzeEvent::ImageNormalized)?;

        let prompt = prompt::compose(&request);
        debug!("Composed prompt:\n{}", prompt);
        fsm.transition(AnalyzeEvent::PromptComposed)?;

        let generated = self
            .llm_client
            .generate(GenerationInput {
                prompt: prompt.into_string(),
                image: InlineImage::new(encoded, imaging::NORMALIZED_MIME_TYPE),
            })
            .await;

        // The scratch file must be gone before leaving Generating, whatever the outcome.
        if let Err(e) = scratch.remove() {
            warn!("Failed to remove scratch image: {}", e);
        }

        let raw = generated?;
        debug!("Generated text:\n{}", raw);
        fsm.transition(AnalyzeEvent::TextGenerated)?;

        let result = GenerationResult::parse(&raw)?;
        fsm.transition(AnalyzeEvent::ResultParsed)?;

        Ok(result)
    }

    /// Normalizes the upload on the blocking pool and spills it to a scratch file.
    async fn prepare_image(&self, image: UploadedImage) -> Result<(ScratchImage, String)> {
        let config = self.image_config.clone();
        let dir = self.scratch_dir.clone();

        tokio::task::spawn_blocking(move || -> Result<(ScratchImage, String)> {
            let normalized = imaging::normalize(&image.bytes, &config)?;
            let scratch = ScratchImage::write(&dir, &normalized)?;
            let encoded = scratch.read_base64()?;
            Ok((scratch, encoded))
        })
        .await
        .map_err(|e| Error::internal(format!("Image processing task failed: {}", e)))?
    }
}
