use extract::{CompanyRecord, ExtractionOutcome, FallbackDataset};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;

/// Where the records in a pipeline result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Extracted,
    QualityFallback,
    ExtractionFallback,
    BackendSample,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::QualityFallback => "quality_fallback",
            Self::ExtractionFallback => "extraction_fallback",
            Self::BackendSample => "backend_sample",
        }
    }
}

/// Decide which records go forward for an extraction outcome.
///
/// Outside strict mode this never fails: an unparseable or empty result is
/// replaced by the empty-extraction dataset, a failed backend call by the
/// backend sample dataset. In strict mode both become errors.
pub fn resolve(
    outcome: ExtractionOutcome,
    strict: bool,
) -> Result<(Vec<CompanyRecord>, RecordSource), PipelineError> {
    match outcome {
        ExtractionOutcome::Records(records) if !records.is_empty() => {
            Ok((records, RecordSource::Extracted))
        }
        ExtractionOutcome::BackendFailed { .. } if !strict => {
            info!("Backend unavailable, substituting sample records");
            Ok((FallbackDataset::BackendSample.records(), RecordSource::BackendSample))
        }
        ExtractionOutcome::Records(_) | ExtractionOutcome::Unparseable { .. } if !strict => {
            info!("Extraction produced no records, substituting fallback records");
            Ok((FallbackDataset::EmptyExtraction.records(), RecordSource::ExtractionFallback))
        }
        strict_failure => {
            let records = strict_failure.into_records()?;
            Ok((records, RecordSource::Extracted))
        }
    }
}

/// Records for text that did not pass the quality gate.
pub fn quality_fallback() -> (Vec<CompanyRecord>, RecordSource) {
    info!("No usable text extracted, substituting fallback records");
    (FallbackDataset::QualityGate.records(), RecordSource::QualityFallback)
}
