use thiserror::Error;

/// Error type for the fallible edges of the aggregation core.
///
/// The calculators themselves are total; these variants only surface from
/// parsing, configuration, and the mutation bookkeeping around a summary.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount `{0}`")]
    Parse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown mutation ticket {0}")]
    UnknownMutation(u64),
    #[error("Data source failed: {0}")]
    Source(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
