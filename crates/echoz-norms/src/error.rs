use thiserror::Error;

use echoz_core::error::DomainError;

#[derive(Debug, Error)]
pub enum NormsError {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("cannot score '{parameter}': {source}")]
    Domain {
        parameter: String,
        #[source]
        source: DomainError,
    },
}
