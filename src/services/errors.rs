//! Error type shared by every service function.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::eligibility::EligibilityError;
use crate::forms::{FieldError, FormError, field_errors};
use crate::repository::errors::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Resource not found.".to_string()),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<EligibilityError> for ServiceError {
    fn from(err: EligibilityError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(field_errors(&errors))
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => errors.into(),
            FormError::Field { field, source } => ServiceError::Validation(vec![FieldError {
                field: field.to_string(),
                message: source.to_string(),
            }]),
        }
    }
}
