use thiserror::Error;

/// Errors from the relational song store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not open a connection to the database
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The connection was open but the query failed
    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Classify an sqlx error raised while connecting.
    pub(crate) fn connect(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }

    /// Classify an sqlx error raised by a query on an open connection.
    pub(crate) fn query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Errors that can occur when producing a signed blob URL
#[derive(Debug, Clone, Error)]
pub enum SigningError {
    /// The storage client holds no shared key and cannot sign locally
    #[error("Signing unavailable: blob storage client is not authorized with a shared key")]
    Unavailable,

    /// The blob storage connection string could not be parsed
    #[error("Invalid blob storage connection string: {0}")]
    InvalidConnectionString(String),

    /// A specific blob could not be turned into a signed URL
    #[error("Cannot sign blob '{file_name}': {reason}")]
    Record { file_name: String, reason: String },
}

/// Errors returned by the song listing
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}
