use thiserror::Error;
use tracing::warn;

/// The five caller-facing failure categories. Every handler returns
/// one of these; none are silently recovered. Infrastructure failures
/// (`ceremony_base::Error`, store/batch commit failures) convert into
/// `Internal` via `From`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ceremony_base::Error> for CoreError {
    fn from(err: ceremony_base::Error) -> Self {
        warn!(error = ?err, "store operation failed");
        CoreError::Internal(format!("{err:?}"))
    }
}

/// A dedicated conversion, separate from the generic infrastructure-error
/// `From` above: an [`ceremony_auth::AuthError`] is always a caller-facing
/// `UNAUTHENTICATED`, never an `Internal`.
impl From<ceremony_auth::AuthError> for CoreError {
    fn from(err: ceremony_auth::AuthError) -> Self {
        CoreError::Unauthenticated(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
