use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures surfaced by the client repository.
///
/// Reads report "no rows" as an empty result; only keyed writes (update,
/// delete) turn a missing row into [`RepositoryError::NotFound`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Client not found")]
    NotFound,

    /// The store answered but the statement failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No connection to the store could be obtained.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(_, info) => {
                RepositoryError::DatabaseError(info.message().to_string())
            }
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(e.to_string())
            }
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction failed: {err}"))
            }
            _ => RepositoryError::Unexpected(err.to_string()),
        }
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
