use thiserror::Error;

/// Rule parsing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule has no FREQ part")]
    MissingFrequency,

    #[error("Unsupported frequency: {0}")]
    UnknownFrequency(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
