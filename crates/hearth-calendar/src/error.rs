use thiserror::Error;

/// Calendar layer errors - combines the lower layers
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RuleError(#[from] hearth_rrule::error::RuleError),

    #[error(transparent)]
    CoreError(#[from] hearth_core::error::CoreError),

    #[error("Invalid display window: {0}")]
    InvalidWindow(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
