use thiserror::Error;

/// Failures raised by the persistence layer
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Unknown project status '{0}' in stored data")]
    InvalidStatus(String),

    #[error("Malformed project number '{0}' in stored data")]
    InvalidProjectNumber(String),

    #[error("Customer {0} does not exist")]
    UnknownCustomer(i64),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Domain-level failures reported by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Project data cannot be null.")]
    MissingInput,

    #[error("{message}")]
    Unexpected {
        message: String,
        #[source]
        source: RepositoryError,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Log the lower-layer failure and hide it behind a generic message
    pub fn unexpected(message: impl Into<String>, source: RepositoryError) -> Self {
        let message = message.into();
        tracing::error!(error = %source, "{}", message);
        Self::Unexpected { message, source }
    }
}
