use model::pagination::error::ConfigError;
use planner::error::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be turned into an ordering or predicate.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// The request carried an invalid page size or direction.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Input data could not be decoded into rows.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Generic fetch failure.
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
