// --- File: crates/sharemeal_registry/src/models.rs ---
//! Records held by the registry and exchanged with the presentation layer.
//!
//! Field names serialize in camelCase and instants as epoch milliseconds,
//! which is the shape the web front-end already consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filter::parse_distance_km;

pub type DonationId = String;
pub type UserId = String;

/// Lifecycle state of a donation. See [`crate::lifecycle`] for the allowed moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Available,
    Claimed,
    Completed,
    Cancelled,
    Expired,
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DonationStatus::Available => "available",
            DonationStatus::Claimed => "claimed",
            DonationStatus::Completed => "completed",
            DonationStatus::Cancelled => "cancelled",
            DonationStatus::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// A donated-food listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    /// The donor who created the listing.
    pub user_id: UserId,
    pub donor_name: String,
    pub food_items: String,
    pub servings: u32,
    pub location: String,
    pub phone_number: String,
    /// Display-only creation label such as "09:30 AM".
    pub timestamp: String,
    pub status: DonationStatus,
    /// Display distance such as "2.3 km".
    pub distance: String,
    /// The receiver holding the reservation, once claimed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by_user_id: Option<UserId>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64))]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64))]
    pub expires_at: DateTime<Utc>,
}

impl Donation {
    /// True while a receiver may still reserve the listing.
    pub fn is_claimable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == DonationStatus::Available && self.expires_at > now
    }

    /// True for an available listing whose freshness window has passed.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.status == DonationStatus::Available && self.expires_at < now
    }

    pub fn distance_km(&self) -> Option<f64> {
        parse_distance_km(&self.distance)
    }

    /// The donor and the current claimant are the participants of a listing.
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.claimed_by_user_id.as_deref() == Some(user_id)
    }
}

/// Donor-supplied fields for a new listing.
///
/// `donor_name` and `phone_number` fall back to the donor's account details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    pub food_items: String,
    pub servings: u32,
    pub location: String,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Hours until the listing auto-expires.
    pub freshness_hours: u32,
}

/// An account. `phone` doubles as the login handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    // Mock credentials stay inside the process
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// One entry of a user's notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationItem {
    pub id: u64,
    pub text: String,
    /// Relative label such as "Just now" or "2 hours ago".
    pub time: String,
    pub read: bool,
}

/// A receiver's reservations, split the way the bookings view shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Bookings {
    /// Reservations still waiting for pickup (`claimed`).
    pub active: Vec<Donation>,
    /// Everything else the receiver once claimed.
    pub history: Vec<Donation>,
}
