use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, error};

/// The specific business rule a write broke.
///
/// Kept for logs and tests only: the HTTP layer flattens every rejection
/// into one bodiless status, so clients cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("username is blank")]
    BlankUsername,

    #[error("password is missing")]
    MissingPassword,

    #[error("password is shorter than the minimum length")]
    PasswordTooShort,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("no account matches these credentials")]
    BadCredentials,

    #[error("message text is blank")]
    BlankText,

    #[error("message text is too long")]
    TextTooLong,

    #[error("posting account does not exist")]
    UnknownAccount,

    #[error("message does not exist")]
    MessageNotFound,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A validation failure, recovered by the caller as "invalid".
    #[error("invalid: {0}")]
    Invalid(#[from] Rejection),

    /// The store could not be reached or failed mid-operation.
    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            ServiceError::Invalid(rejection) => Some(*rejection),
            ServiceError::Store(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Collapse a service error into the status the client sees. Every
/// rejection maps to `invalid`; store faults are logged and become 500.
pub fn status_for(err: ServiceError, invalid: StatusCode) -> StatusCode {
    match err {
        ServiceError::Invalid(rejection) => {
            debug!("Request rejected: {}", rejection);
            invalid
        }
        ServiceError::Store(e) => {
            error!("Store failure: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
