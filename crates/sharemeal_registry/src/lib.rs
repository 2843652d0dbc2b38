// --- File: crates/sharemeal_registry/src/lib.rs ---
//! Donation lifecycle, filtered views, notifications and mock accounts.
//!
//! [`DonationRegistry`] is the pure core: every operation takes `now`
//! explicitly. [`ShareMealService`] layers sessions, notifications and a
//! clock on top and is what the HTTP crate and the sweeper talk to.

pub mod clock;
pub mod distance;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod models;
pub mod notifications;
pub mod registry;
pub mod seed;
pub mod service;
pub mod snapshot;
pub mod sweeper;
pub mod users;

#[cfg(test)]
mod lifecycle_proptest;
#[cfg(test)]
mod service_test;

pub use clock::{Clock, ManualClock, SystemClock};
pub use distance::{DistanceSampler, FixedDistance, UniformDistance};
pub use error::RegistryError;
pub use filter::AvailabilityFilter;
pub use models::{
    Bookings, Donation, DonationDraft, DonationId, DonationStatus, NotificationItem, User, UserId,
};
pub use notifications::NotificationLog;
pub use registry::DonationRegistry;
pub use service::{NotificationFeed, ShareMealService, SharedService};
pub use snapshot::SnapshotDiff;
pub use sweeper::spawn_expiration_sweeper;
pub use users::UserDirectory;
