// --- File: crates/sharemeal_registry/src/registry.rs ---
//! The donation registry.
//!
//! Holds every listing newest first and is the only place a listing changes.
//! All operations take the current instant explicitly, so the registry itself
//! never reads a clock.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::distance::{format_distance, DistanceSampler};
use crate::error::RegistryError;
use crate::filter::AvailabilityFilter;
use crate::lifecycle::transition;
use crate::models::{Bookings, Donation, DonationDraft, DonationId, DonationStatus, User};

/// Longest freshness window accepted when none is configured.
pub const DEFAULT_MAX_FRESHNESS_HOURS: u32 = 48;

#[derive(Debug, Clone)]
pub struct DonationRegistry {
    donations: Vec<Donation>,
    max_freshness_hours: u32,
}

impl Default for DonationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationRegistry {
    pub fn new() -> Self {
        Self::with_max_freshness(DEFAULT_MAX_FRESHNESS_HOURS)
    }

    pub fn with_max_freshness(max_freshness_hours: u32) -> Self {
        Self {
            donations: Vec::new(),
            max_freshness_hours,
        }
    }

    /// Builds a registry over existing records, keeping their order.
    pub fn from_donations(donations: Vec<Donation>, max_freshness_hours: u32) -> Self {
        Self {
            donations,
            max_freshness_hours,
        }
    }

    pub fn max_freshness_hours(&self) -> u32 {
        self.max_freshness_hours
    }

    pub fn len(&self) -> usize {
        self.donations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donations.is_empty()
    }

    /// All listings, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Donation> {
        self.donations.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Donation> {
        self.donations.iter().find(|d| d.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Donation, RegistryError> {
        self.donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub(crate) fn replace_all(&mut self, donations: Vec<Donation>) {
        self.donations = donations;
    }

    pub(crate) fn take_all(&mut self) -> Vec<Donation> {
        std::mem::take(&mut self.donations)
    }

    /// Lists a new donation for `owner` and puts it at the front.
    pub fn create(
        &mut self,
        owner: &User,
        draft: DonationDraft,
        sampler: &dyn DistanceSampler,
        now: DateTime<Utc>,
    ) -> Result<Donation, RegistryError> {
        self.validate_draft(&draft)?;
        let expires_at = now
            .checked_add_signed(Duration::hours(i64::from(draft.freshness_hours)))
            .ok_or_else(|| {
                RegistryError::Validation(format!(
                    "A freshness window of {} hours is out of range",
                    draft.freshness_hours
                ))
            })?;

        let donation = Donation {
            id: Uuid::new_v4().to_string(),
            user_id: owner.id.clone(),
            donor_name: non_blank_or(draft.donor_name, &owner.name),
            food_items: draft.food_items.trim().to_string(),
            servings: draft.servings,
            location: draft.location.trim().to_string(),
            phone_number: non_blank_or(draft.phone_number, &owner.phone),
            timestamp: now.format("%I:%M %p").to_string(),
            status: DonationStatus::Available,
            distance: format_distance(sampler.sample_km()),
            claimed_by_user_id: None,
            created_at: now,
            expires_at,
        };

        info!(
            "Donation {} listed by {}: {} ({} servings, {}h)",
            donation.id, owner.id, donation.food_items, donation.servings, draft.freshness_hours
        );
        self.donations.insert(0, donation.clone());
        Ok(donation)
    }

    fn validate_draft(&self, draft: &DonationDraft) -> Result<(), RegistryError> {
        if draft.food_items.trim().is_empty() {
            return Err(RegistryError::Validation(
                "Please describe the food you are donating".to_string(),
            ));
        }
        if draft.location.trim().is_empty() {
            return Err(RegistryError::Validation(
                "Please enter a pickup location".to_string(),
            ));
        }
        if draft.freshness_hours == 0 || draft.freshness_hours > self.max_freshness_hours {
            return Err(RegistryError::Validation(format!(
                "Freshness must be between 1 and {} hours",
                self.max_freshness_hours
            )));
        }
        Ok(())
    }

    /// Reserves an available listing for `receiver_id`.
    ///
    /// Runs against `&mut self`, so the status check and the write cannot be
    /// interleaved with another claim.
    pub fn claim(
        &mut self,
        id: &str,
        receiver_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Donation, RegistryError> {
        let donation = self.get_mut(id)?;

        if donation.status != DonationStatus::Available {
            warn!("Claim on {} rejected: status is {}", id, donation.status);
            return Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                from: donation.status,
                to: DonationStatus::Claimed,
            });
        }
        if donation.user_id == receiver_id {
            warn!("Claim on {} rejected: {} owns it", id, receiver_id);
            return Err(RegistryError::SelfClaim(id.to_string()));
        }
        if !donation.is_claimable_at(now) {
            transition(donation, DonationStatus::Expired)?;
            info!("Donation {} expired at claim time", id);
            return Err(RegistryError::AlreadyExpired(id.to_string()));
        }

        transition(donation, DonationStatus::Claimed)?;
        donation.claimed_by_user_id = Some(receiver_id.to_string());
        info!("Donation {} claimed by {}", id, receiver_id);
        Ok(donation.clone())
    }

    /// Marks a reserved listing as picked up.
    pub fn complete(&mut self, id: &str) -> Result<Donation, RegistryError> {
        let donation = self.get_mut(id)?;
        transition(donation, DonationStatus::Completed)?;
        info!("Donation {} completed", id);
        Ok(donation.clone())
    }

    /// Withdraws an available or reserved listing.
    pub fn cancel(&mut self, id: &str) -> Result<Donation, RegistryError> {
        let donation = self.get_mut(id)?;
        transition(donation, DonationStatus::Cancelled)?;
        info!("Donation {} cancelled", id);
        Ok(donation.clone())
    }

    /// Expires every available listing whose window closed before `now`.
    ///
    /// Returns the ids that changed; a second call with the same `now`
    /// returns nothing.
    pub fn sweep_expirations(&mut self, now: DateTime<Utc>) -> Vec<DonationId> {
        let mut expired = Vec::new();
        for donation in self.donations.iter_mut().filter(|d| d.is_stale_at(now)) {
            donation.status = DonationStatus::Expired;
            expired.push(donation.id.clone());
        }
        if !expired.is_empty() {
            info!("Expired {} donation(s): {:?}", expired.len(), expired);
        }
        expired
    }

    /// Listings created by `user_id`, newest first.
    pub fn list_by_owner(&self, user_id: &str) -> Vec<&Donation> {
        let mine: Vec<&Donation> = self.donations.iter().filter(|d| d.user_id == user_id).collect();
        debug!("{} donation(s) owned by {}", mine.len(), user_id);
        mine
    }

    /// Listings `user_id` has claimed at some point, newest first.
    pub fn list_claimed_by(&self, user_id: &str) -> Vec<&Donation> {
        self.donations
            .iter()
            .filter(|d| d.claimed_by_user_id.as_deref() == Some(user_id))
            .collect()
    }

    /// [`Self::list_claimed_by`] split into pending pickups and the rest.
    pub fn bookings_for(&self, user_id: &str) -> Bookings {
        let (active, history): (Vec<Donation>, Vec<Donation>) = self
            .list_claimed_by(user_id)
            .into_iter()
            .cloned()
            .partition(|d| d.status == DonationStatus::Claimed);
        Bookings { active, history }
    }

    /// Listings a receiver can still claim at `now` that pass `filter`.
    pub fn list_available(&self, filter: &AvailabilityFilter, now: DateTime<Utc>) -> Vec<&Donation> {
        let available: Vec<&Donation> = self
            .donations
            .iter()
            .filter(|d| d.is_claimable_at(now) && filter.matches(d))
            .collect();
        debug!("{} donation(s) available for {:?}", available.len(), filter);
        available
    }
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}
