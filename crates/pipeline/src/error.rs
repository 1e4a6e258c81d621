use extract::ExtractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Only raised in strict mode; otherwise extraction failures degrade to sample data
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}
