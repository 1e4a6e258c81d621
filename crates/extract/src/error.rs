use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The backend call failed
    #[error("Backend error: {0}")]
    Backend(String),

    /// The backend answered but no record array could be recovered
    #[error("Unparseable backend output: {0}")]
    Unparseable(String),

    /// The recovered array held no records
    #[error("Backend returned no records")]
    Empty,

    #[error("Configuration error: {0}")]
    Config(String),
}
