use connectors::error::SourceError;
use model::pagination::error::{ConfigError, TokenError};
use planner::error::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize JSON: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    #[error("Invalid paging settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to plan the page query: {0}")]
    Plan(#[from] PlanError),

    #[error("Failed to fetch rows: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported SQL dialect: {0}")]
    UnsupportedDialect(String),
}
