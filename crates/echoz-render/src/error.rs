use thiserror::Error;

use echoz_core::error::{ConfigError, DomainError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report not found: {0}")]
    UnknownReport(String),

    #[error("no reports configured")]
    NoReports,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    Domain(#[from] DomainError),
}
