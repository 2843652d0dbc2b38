// --- File: crates/sharemeal_common/src/error.rs ---
use thiserror::Error;

/// The base error type shared by all ShareMeal crates.
///
/// Domain crates keep their own error enums and implement
/// `From<DomainError> for ShareMealError` so handlers can render any of them
/// the same way.
#[derive(Error, Debug)]
pub enum ShareMealError {
    /// The caller is not signed in or presented bad credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The caller is signed in but may not act on the resource
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The operation conflicts with the current state of the resource
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ShareMealError {
    fn status_code(&self) -> u16 {
        match self {
            ShareMealError::AuthError(_) => 401,
            ShareMealError::ForbiddenError(_) => 403,
            ShareMealError::ValidationError(_) => 400,
            ShareMealError::ConflictError(_) => 409,
            ShareMealError::NotFoundError(_) => 404,
        }
    }
}
