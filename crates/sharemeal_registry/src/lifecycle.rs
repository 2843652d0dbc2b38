// --- File: crates/sharemeal_registry/src/lifecycle.rs ---
//! Donation lifecycle.
//!
//! ```text
//! available ──► claimed ──► completed
//!     │            │
//!     │            └──────► cancelled
//!     ├──────────────────► cancelled
//!     └──────────────────► expired
//! ```
//!
//! `completed`, `cancelled` and `expired` are terminal. Nothing ever moves
//! back to `available`.

use crate::error::RegistryError;
use crate::models::{Donation, DonationStatus};

impl DonationStatus {
    pub const ALL: [DonationStatus; 5] = [
        DonationStatus::Available,
        DonationStatus::Claimed,
        DonationStatus::Completed,
        DonationStatus::Cancelled,
        DonationStatus::Expired,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DonationStatus::Completed | DonationStatus::Cancelled | DonationStatus::Expired
        )
    }

    pub fn can_transition_to(self, next: DonationStatus) -> bool {
        use DonationStatus::*;
        matches!(
            (self, next),
            (Available, Claimed)
                | (Available, Cancelled)
                | (Available, Expired)
                | (Claimed, Completed)
                | (Claimed, Cancelled)
        )
    }
}

/// Moves `donation` to `next`, or reports why it cannot.
pub(crate) fn transition(
    donation: &mut Donation,
    next: DonationStatus,
) -> Result<(), RegistryError> {
    if !donation.status.can_transition_to(next) {
        return Err(RegistryError::InvalidTransition {
            id: donation.id.clone(),
            from: donation.status,
            to: next,
        });
    }
    donation.status = next;
    Ok(())
}
