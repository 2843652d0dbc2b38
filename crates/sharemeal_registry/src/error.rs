// --- File: crates/sharemeal_registry/src/error.rs ---
use crate::models::{DonationId, DonationStatus};
use sharemeal_common::ShareMealError;
use thiserror::Error;

/// Rejections produced by the registry, the user directory and the service.
///
/// Every variant is recoverable; callers surface the message to the user and
/// carry on. A rejected operation never mutates state, with one exception:
/// a claim on a listing whose freshness window has passed moves that listing
/// to `expired` before `AlreadyExpired` is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Please sign in to continue")]
    NotAuthenticated,

    #[error("Donation {0} was not found")]
    NotFound(DonationId),

    #[error("You cannot claim your own donation ({0})")]
    SelfClaim(DonationId),

    #[error("Donation {id} is {from} and cannot become {to}")]
    InvalidTransition {
        id: DonationId,
        from: DonationStatus,
        to: DonationStatus,
    },

    #[error("Donation {0} has expired")]
    AlreadyExpired(DonationId),

    #[error("Phone number {0} is already registered. Please sign in.")]
    DuplicateRegistration(String),

    #[error("Invalid phone number or password. Please try again.")]
    InvalidCredentials,

    #[error("Only the donor or the receiver of donation {0} may do that")]
    Forbidden(DonationId),

    #[error("{0}")]
    Validation(String),
}

impl From<RegistryError> for ShareMealError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        match err {
            RegistryError::NotAuthenticated | RegistryError::InvalidCredentials => {
                ShareMealError::AuthError(message)
            }
            RegistryError::NotFound(_) => ShareMealError::NotFoundError(message),
            RegistryError::Forbidden(_) => ShareMealError::ForbiddenError(message),
            RegistryError::Validation(_) => ShareMealError::ValidationError(message),
            RegistryError::SelfClaim(_)
            | RegistryError::InvalidTransition { .. }
            | RegistryError::AlreadyExpired(_)
            | RegistryError::DuplicateRegistration(_) => ShareMealError::ConflictError(message),
        }
    }
}
