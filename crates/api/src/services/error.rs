//! Service error types.

use thiserror::Error;
use validator::ValidationErrors;

use crate::db::RepositoryError;

/// Errors returned by the entity services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body failed field validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
