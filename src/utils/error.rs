use crate::domain::model::EstimateStatus;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Survey not found: {id}")]
    SurveyNotFound { id: Uuid },

    #[error("Organization not found: {id}")]
    OrganizationNotFound { id: Uuid },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Invalid estimate status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: EstimateStatus,
        to: EstimateStatus,
    },

    #[error("Configuration error for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl EstimateError {
    /// HTTP status the calling handler layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            EstimateError::InvalidStatusTransition { .. }
            | EstimateError::ConfigValidationError { .. }
            | EstimateError::InvalidConfigValueError { .. }
            | EstimateError::MissingConfigError { .. }
            | EstimateError::ValidationError { .. } => 400,
            EstimateError::Unauthorized { .. } => 401,
            EstimateError::Forbidden { .. } => 403,
            EstimateError::SurveyNotFound { .. } | EstimateError::OrganizationNotFound { .. } => {
                404
            }
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;
