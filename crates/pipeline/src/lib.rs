pub mod error;
pub mod fallback_policy;
pub mod preview;

pub use error::PipelineError;
pub use fallback_policy::RecordSource;
pub use preview::display_text;

use extract::{CompanyRecord, Extractor};
use ingest::{Document, FileReader, is_usable};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fail instead of substituting sample records when extraction fails
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub companies: Vec<CompanyRecord>,
    pub extracted_text: String,
    pub source: RecordSource,
}

/// Document in, leveled company records out.
///
/// Stages run strictly in sequence: acquire text, gate on quality, extract and
/// normalize records (or substitute a fallback set), compute levels.
pub struct Pipeline {
    reader: FileReader,
    extractor: Extractor,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(reader: FileReader, extractor: Extractor, config: PipelineConfig) -> Self {
        Self {
            reader,
            extractor,
            config,
        }
    }

    pub async fn run(&self, document: &Document) -> Result<PipelineOutput, PipelineError> {
        info!(
            path = %document.path.display(),
            kind = document.kind.as_str(),
            "Processing document"
        );
        let text = self.reader.read_document(document).await;
        self.run_text(text.as_deref()).await
    }

    /// Everything after acquisition; `None` means acquisition failed.
    pub async fn run_text(&self, text: Option<&str>) -> Result<PipelineOutput, PipelineError> {
        let (records, source) = match text {
            Some(text) if is_usable(Some(text)) => {
                info!(chars = text.chars().count(), "Extracting records from document text");
                let outcome = self.extractor.extract_records(text).await;
                fallback_policy::resolve(outcome, self.config.strict).inspect_err(|e| {
                    warn!(error = %e, "Extraction failed in strict mode");
                })?
            }
            _ => fallback_policy::quality_fallback(),
        };

        let companies = hierarchy::build_hierarchy(records);
        info!(
            companies = companies.len(),
            source = source.as_str(),
            "Pipeline finished"
        );

        Ok(PipelineOutput {
            companies,
            extracted_text: display_text(text),
            source,
        })
    }
}
