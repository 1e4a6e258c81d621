pub mod cache;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod normalizer;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod schema;

pub use cache::{CacheSettings, ResponseCache};
pub use error::ExtractError;
pub use fallback::FallbackDataset;
pub use llm::{InferenceBackend, InferenceRequest, LlmProvider, LlmSettings, OllamaClient, OpenAiClient};
pub use normalizer::RecordNormalizer;
pub use parser::{ParseOutcome, recover_records};
pub use retry::{RetryPolicy, RetrySettings};
pub use schema::{CompanyRecord, ExtractionOutcome, RawRecord};

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

impl ExtractionOutcome {
    /// Strict view of the outcome: anything but a non-empty record list is an error.
    pub fn into_records(self) -> Result<Vec<CompanyRecord>, ExtractError> {
        match self {
            Self::Records(records) if records.is_empty() => Err(ExtractError::Empty),
            Self::Records(records) => Ok(records),
            Self::Unparseable { reason, .. } => Err(ExtractError::Unparseable(reason)),
            Self::BackendFailed { error } => Err(ExtractError::Backend(error)),
        }
    }
}

/// Turns document text into company records through an inference backend.
#[derive(Clone)]
pub struct Extractor {
    backend: Arc<dyn InferenceBackend>,
    normalizer: RecordNormalizer,
    temperature: f32,
    max_tokens: u32,
    retry: RetryPolicy,
    cache: Option<ResponseCache>,
}

impl Extractor {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        let defaults = LlmSettings::default();
        Self {
            backend,
            normalizer: RecordNormalizer::new(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            retry: RetryPolicy::none(),
            cache: None,
        }
    }

    pub fn from_settings(
        llm: &LlmSettings,
        retry: &RetrySettings,
        cache: &CacheSettings,
    ) -> Result<Self, ExtractError> {
        let mut extractor = Self::new(llm.build_backend()?)
            .with_generation(llm.temperature, llm.max_tokens)
            .with_retry(RetryPolicy::from_settings(retry));
        extractor.cache = ResponseCache::from_settings(cache);
        Ok(extractor)
    }

    pub fn with_generation(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn build_request(&self, text: &str) -> InferenceRequest {
        InferenceRequest {
            system: prompt::SYSTEM_INSTRUCTION.to_string(),
            user: prompt::build_extraction_prompt(text),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Extract company records from document text. Never fails: backend and
    /// parsing trouble is reported through the outcome variant.
    pub async fn extract_records(&self, text: &str) -> ExtractionOutcome {
        let request = self.build_request(text);

        let response = match self.infer(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "Inference backend call failed");
                return ExtractionOutcome::BackendFailed {
                    error: format!("{:#}", e),
                };
            }
        };

        debug!(backend = self.backend.name(), response = %response, "Raw backend output");

        match recover_records(&response) {
            ParseOutcome::Parsed(raw) => {
                let records = self.normalizer.normalize(&raw);
                debug!(records = records.len(), "Normalized extracted records");
                ExtractionOutcome::Records(records)
            }
            ParseOutcome::Unparseable { raw, reason } => {
                warn!(reason = %reason, "Could not recover records from backend output");
                ExtractionOutcome::Unparseable { raw, reason }
            }
        }
    }

    async fn infer(&self, request: &InferenceRequest) -> Result<String> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(request)) {
            debug!("Using cached backend response");
            return Ok(cached);
        }

        let backend = &self.backend;
        let response = self
            .retry
            .retry("inference", move || backend.complete(request))
            .await?;

        if let Some(cache) = &self.cache {
            cache.insert(request, response.clone());
            debug!(entries = cache.len(), "Cached backend response");
        }

        Ok(response)
    }
}
