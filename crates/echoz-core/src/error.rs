use thiserror::Error;

use crate::validation::Rejection;

/// A configuration document (parameter registry or template set) that cannot
/// be turned into a usable model.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{document} document root must be a mapping")]
    RootNotMapping { document: &'static str },

    #[error("missing required section: {0}")]
    MissingSection(&'static str),

    #[error("section '{section}' must be {expected}")]
    WrongShape {
        section: &'static str,
        expected: &'static str,
    },

    #[error("parameter entry #{index} must be a mapping")]
    ParameterNotMapping { index: usize },

    #[error("parameter entry #{index} has no name")]
    UnnamedParameter { index: usize },

    #[error("parameter '{key}' declares a different name '{name}'")]
    NameMismatch { key: String, name: String },

    #[error("parameter '{parameter}' is missing required field '{field}'")]
    MissingField {
        parameter: String,
        field: &'static str,
    },

    #[error("parameter '{parameter}': field '{field}' is not a real number")]
    NotANumber {
        parameter: String,
        field: &'static str,
    },

    #[error("parameter '{parameter}': field '{field}' must not be negative (got {value})")]
    Negative {
        parameter: String,
        field: &'static str,
        value: f64,
    },

    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error(
        "{document} document version {found} is newer than this build supports ({supported})"
    )]
    UnsupportedVersion {
        document: &'static str,
        found: u64,
        supported: u32,
    },

    #[error("{document} document version must be a non-negative integer")]
    InvalidVersion { document: &'static str },

    #[error("invalid template configuration: {0}")]
    InvalidTemplates(#[from] Rejection),
}

/// A numeric input that violates a mathematical precondition.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("zero standard deviation")]
    ZeroStandardDeviation,

    #[error("non-positive body-surface-area: {0}")]
    NonPositiveBodySurfaceArea(f64),

    #[error("{field} must be a positive real number, got {value}")]
    NonPositiveInput { field: &'static str, value: f64 },
}
