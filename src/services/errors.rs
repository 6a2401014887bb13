use thiserror::Error;

/// Typed outcomes of the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Referenced entity (`"category"` or `"business"`) does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A uniqueness rule rejected the write.
    #[error("{0}")]
    Conflict(String),
    /// Structurally malformed identifier.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
