// --- File: crates/sharemeal_registry/src/service.rs ---
//! Session-aware facade over the registry, the user directory and the
//! notification logs.
//!
//! Every call that acts on behalf of someone takes the acting user id as
//! `Option<&str>`; `None` or an unknown id is [`RegistryError::NotAuthenticated`].

use serde::Serialize;
use sharemeal_config::RegistryConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::distance::{DistanceSampler, UniformDistance};
use crate::error::RegistryError;
use crate::filter::AvailabilityFilter;
use crate::models::{
    Bookings, Donation, DonationDraft, DonationId, NotificationItem, User, UserId,
};
use crate::notifications::NotificationLog;
use crate::registry::DonationRegistry;
use crate::seed::{demo_donations, demo_users};
use crate::snapshot::SnapshotDiff;
use crate::users::UserDirectory;

/// The service as shared between request handlers and the sweeper.
pub type SharedService = Arc<RwLock<ShareMealService>>;

/// A user's notifications together with the badge count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub unread_count: usize,
    pub items: Vec<NotificationItem>,
}

pub struct ShareMealService {
    registry: DonationRegistry,
    users: UserDirectory,
    notifications: HashMap<UserId, NotificationLog>,
    sampler: Box<dyn DistanceSampler>,
    clock: Arc<dyn Clock>,
}

impl ShareMealService {
    /// Empty service on the wall clock, sampling distances from `config`.
    pub fn new(config: &RegistryConfig) -> Self {
        Self::with_parts(
            DonationRegistry::with_max_freshness(config.max_freshness_hours),
            UserDirectory::new(),
            Box::new(UniformDistance::from_config(config)),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        registry: DonationRegistry,
        users: UserDirectory,
        sampler: Box<dyn DistanceSampler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            users,
            notifications: HashMap::new(),
            sampler,
            clock,
        }
    }

    pub fn into_shared(self) -> SharedService {
        Arc::new(RwLock::new(self))
    }

    /// Replaces the listings with the demo set and adds the demo accounts.
    pub fn seed_demo_data(&mut self) {
        let now = self.clock.now();
        self.registry.replace_all(demo_donations(now));
        let added = demo_users()
            .into_iter()
            .filter(|u| self.users.insert(u.clone()))
            .count();
        info!(
            "Seeded {} demo donation(s) and {} demo account(s)",
            self.registry.len(),
            added
        );
    }

    pub fn registry(&self) -> &DonationRegistry {
        &self.registry
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    fn current_user(&self, actor: Option<&str>) -> Result<User, RegistryError> {
        match actor.and_then(|id| self.users.find(id)) {
            Some(user) => Ok(user.clone()),
            None => {
                debug!("No session for {:?}", actor);
                Err(RegistryError::NotAuthenticated)
            }
        }
    }

    fn notify(&mut self, user_id: &str, text: String) {
        let now = self.clock.now();
        self.notifications
            .entry(user_id.to_string())
            .or_insert_with(|| NotificationLog::new(now))
            .push(text, now);
    }

    pub fn register(
        &mut self,
        phone: &str,
        password: &str,
        name: &str,
    ) -> Result<User, RegistryError> {
        let user = self.users.register(phone, password, name)?;
        self.notify(&user.id, format!("Welcome to ShareMeal, {}!", user.name));
        Ok(user)
    }

    pub fn login(&mut self, phone: &str, password: &str) -> Result<User, RegistryError> {
        let user = self.users.authenticate(phone, password)?;
        self.notify(&user.id, format!("Welcome back, {}!", user.name));
        Ok(user)
    }

    pub fn create_donation(
        &mut self,
        actor: Option<&str>,
        draft: DonationDraft,
    ) -> Result<Donation, RegistryError> {
        let owner = self.current_user(actor)?;
        let now = self.clock.now();
        let donation = self
            .registry
            .create(&owner, draft, self.sampler.as_ref(), now)?;
        self.notify(&owner.id, format!("Donation Posted: {}", donation.food_items));
        Ok(donation)
    }

    pub fn claim(&mut self, actor: Option<&str>, id: &str) -> Result<Donation, RegistryError> {
        let receiver = self.current_user(actor)?;
        let now = self.clock.now();
        let donation = self.registry.claim(id, &receiver.id, now)?;
        self.notify(
            &receiver.id,
            format!(
                "Booking Confirmed: {} from {}",
                donation.food_items, donation.donor_name
            ),
        );
        Ok(donation)
    }

    /// Checks that `actor` is signed in and takes part in listing `id`.
    fn participant(&self, actor: Option<&str>, id: &str) -> Result<User, RegistryError> {
        let user = self.current_user(actor)?;
        let donation = self
            .registry
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        if !donation.is_participant(&user.id) {
            warn!("{} is not a participant of donation {}", user.id, id);
            return Err(RegistryError::Forbidden(id.to_string()));
        }
        Ok(user)
    }

    pub fn complete(&mut self, actor: Option<&str>, id: &str) -> Result<Donation, RegistryError> {
        self.participant(actor, id)?;
        self.registry.complete(id)
    }

    pub fn cancel(&mut self, actor: Option<&str>, id: &str) -> Result<Donation, RegistryError> {
        self.participant(actor, id)?;
        self.registry.cancel(id)
    }

    pub fn sweep_expirations(&mut self) -> Vec<DonationId> {
        let now = self.clock.now();
        self.registry.sweep_expirations(now)
    }

    /// What a receiver may claim right now. Open to anonymous callers.
    pub fn available(&self, filter: &AvailabilityFilter) -> Vec<Donation> {
        self.registry
            .list_available(filter, self.clock.now())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn donation(&self, id: &str) -> Result<Donation, RegistryError> {
        self.registry
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn my_donations(&self, actor: Option<&str>) -> Result<Vec<Donation>, RegistryError> {
        let user = self.current_user(actor)?;
        Ok(self
            .registry
            .list_by_owner(&user.id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn my_bookings(&self, actor: Option<&str>) -> Result<Bookings, RegistryError> {
        let user = self.current_user(actor)?;
        Ok(self.registry.bookings_for(&user.id))
    }

    pub fn notifications(&self, actor: Option<&str>) -> Result<NotificationFeed, RegistryError> {
        let user = self.current_user(actor)?;
        let now = self.clock.now();
        let feed = match self.notifications.get(&user.id) {
            Some(log) => NotificationFeed {
                unread_count: log.unread_count(),
                items: log.items(now),
            },
            None => NotificationFeed {
                unread_count: 0,
                items: NotificationLog::new(now).items(now),
            },
        };
        Ok(feed)
    }

    /// Returns how many entries were newly marked read.
    pub fn mark_notifications_read(&mut self, actor: Option<&str>) -> Result<usize, RegistryError> {
        let user = self.current_user(actor)?;
        Ok(self
            .notifications
            .get_mut(&user.id)
            .map(NotificationLog::mark_all_read)
            .unwrap_or(0))
    }

    pub fn apply_snapshot(&mut self, remote: Vec<Donation>) -> SnapshotDiff {
        self.registry.apply_snapshot(remote)
    }
}
