// --- File: crates/sharemeal_registry/src/seed.rs ---
//! Demo data: four listings and two accounts, placed relative to `now` so a
//! fresh process always has something to browse.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Donation, DonationStatus, User};

pub const DEMO_RECEIVER_ID: &str = "user-demo-1";
pub const DEMO_DONOR_ID: &str = "user-donor-1";

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    user_id: &str,
    donor_name: &str,
    food_items: &str,
    servings: u32,
    location: &str,
    phone_number: &str,
    timestamp: &str,
    distance: &str,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Donation {
    Donation {
        id: id.to_string(),
        user_id: user_id.to_string(),
        donor_name: donor_name.to_string(),
        food_items: food_items.to_string(),
        servings,
        location: location.to_string(),
        phone_number: phone_number.to_string(),
        timestamp: timestamp.to_string(),
        status: DonationStatus::Available,
        distance: distance.to_string(),
        claimed_by_user_id: None,
        created_at,
        expires_at,
    }
}

pub fn demo_donations(now: DateTime<Utc>) -> Vec<Donation> {
    let mut bagels = listing(
        "d3",
        DEMO_DONOR_ID,
        "Fresh Bakery",
        "Yesterday's Bagels",
        10,
        "42 Market St, Downtown",
        "555-0123",
        "Yesterday",
        "0.8 km",
        now - Duration::days(1),
        now - Duration::milliseconds(4_000_000),
    );
    bagels.status = DonationStatus::Claimed;
    bagels.claimed_by_user_id = Some(DEMO_RECEIVER_ID.to_string());

    vec![
        listing(
            "d1",
            DEMO_DONOR_ID,
            "Fresh Bakery",
            "Assorted Pastries & Bread",
            15,
            "42 Market St, Downtown",
            "555-0123",
            "09:30 AM",
            "0.8 km",
            now - Duration::hours(1),
            now + Duration::hours(2),
        ),
        listing(
            "d2",
            "user-donor-2",
            "Grand Hotel",
            "Rice, Curry, and Vegetables",
            50,
            "10 Park Avenue",
            "555-0199",
            "11:15 AM",
            "2.3 km",
            now - Duration::minutes(30),
            now + Duration::hours(4),
        ),
        bagels,
        listing(
            "d4",
            "user-donor-2",
            "Suburban Catering",
            "Leftover Event Catering",
            100,
            "North Hills Community Center",
            "555-9876",
            "12:00 PM",
            "18.5 km",
            now - Duration::minutes(10),
            now + Duration::hours(5),
        ),
    ]
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: DEMO_RECEIVER_ID.to_string(),
            name: "Demo Receiver".to_string(),
            phone: "1234567890".to_string(),
            password: Some("123".to_string()),
            is_verified: Some(true),
        },
        User {
            id: DEMO_DONOR_ID.to_string(),
            name: "Fresh Bakery Owner".to_string(),
            phone: "5550123456".to_string(),
            password: Some("123".to_string()),
            is_verified: Some(true),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::AvailabilityFilter;
    use crate::registry::{DonationRegistry, DEFAULT_MAX_FRESHNESS_HOURS};

    #[test]
    fn test_demo_data_shape() {
        let now = Utc::now();
        let registry =
            DonationRegistry::from_donations(demo_donations(now), DEFAULT_MAX_FRESHNESS_HOURS);
        assert_eq!(registry.len(), 4);

        let available = registry.list_available(&AvailabilityFilter::new(), now);
        let ids: Vec<&str> = available.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d4"]);

        let bookings = registry.bookings_for(DEMO_RECEIVER_ID);
        assert_eq!(bookings.active.len(), 1);
        assert_eq!(bookings.active[0].id, "d3");
        assert_eq!(demo_users().len(), 2);
    }
}
