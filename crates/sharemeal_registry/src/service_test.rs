#[cfg(test)]
mod tests {
    use crate::clock::ManualClock;
    use crate::distance::MockDistanceSampler;
    use crate::error::RegistryError;
    use crate::filter::AvailabilityFilter;
    use crate::models::{DonationDraft, DonationStatus};
    use crate::notifications::GREETING;
    use crate::registry::DonationRegistry;
    use crate::seed::{DEMO_DONOR_ID, DEMO_RECEIVER_ID};
    use crate::service::ShareMealService;
    use crate::users::UserDirectory;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap()
    }

    fn service() -> (ShareMealService, Arc<ManualClock>) {
        let mut sampler = MockDistanceSampler::new();
        sampler.expect_sample_km().return_const(1.2);
        let clock = Arc::new(ManualClock::new(start()));
        let service = ShareMealService::with_parts(
            DonationRegistry::new(),
            UserDirectory::new(),
            Box::new(sampler),
            clock.clone(),
        );
        (service, clock)
    }

    fn draft(food: &str, hours: u32) -> DonationDraft {
        DonationDraft {
            food_items: food.to_string(),
            servings: 12,
            location: "42 Market St".to_string(),
            donor_name: None,
            phone_number: None,
            freshness_hours: hours,
        }
    }

    #[test]
    fn test_anonymous_mutations_are_rejected() {
        let (mut service, _) = service();
        assert_eq!(
            service.create_donation(None, draft("Bread", 2)),
            Err(RegistryError::NotAuthenticated)
        );
        assert_eq!(
            service.create_donation(Some("ghost"), draft("Bread", 2)),
            Err(RegistryError::NotAuthenticated)
        );
        assert_eq!(service.claim(None, "d1"), Err(RegistryError::NotAuthenticated));
        assert_eq!(service.my_bookings(None), Err(RegistryError::NotAuthenticated));
        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_donor_and_receiver_flow_with_notifications() {
        let (mut service, clock) = service();
        let donor = service.register("555-0001", "pw", "Fresh Bakery").unwrap();
        let receiver = service.register("555-0002", "pw", "Shelter").unwrap();

        let posted = service
            .create_donation(Some(&donor.id), draft("Bread", 2))
            .unwrap();
        assert_eq!(posted.distance, "1.2 km");
        assert_eq!(posted.donor_name, "Fresh Bakery");

        clock.advance(Duration::minutes(30));
        let claimed = service.claim(Some(&receiver.id), &posted.id).unwrap();
        assert_eq!(claimed.status, DonationStatus::Claimed);

        let donor_feed = service.notifications(Some(&donor.id)).unwrap();
        assert_eq!(donor_feed.unread_count, 2);
        assert_eq!(donor_feed.items[0].text, "Donation Posted: Bread");
        assert_eq!(donor_feed.items[0].time, "30 minutes ago");
        assert_eq!(donor_feed.items[1].text, "Welcome to ShareMeal, Fresh Bakery!");
        assert_eq!(donor_feed.items[2].text, GREETING);

        let receiver_feed = service.notifications(Some(&receiver.id)).unwrap();
        assert_eq!(receiver_feed.items[0].text, "Booking Confirmed: Bread from Fresh Bakery");
        assert_eq!(receiver_feed.items[0].time, "Just now");

        assert_eq!(service.mark_notifications_read(Some(&receiver.id)).unwrap(), 2);
        assert_eq!(service.notifications(Some(&receiver.id)).unwrap().unread_count, 0);

        let bookings = service.my_bookings(Some(&receiver.id)).unwrap();
        assert_eq!(bookings.active.len(), 1);

        let done = service.complete(Some(&receiver.id), &posted.id).unwrap();
        assert_eq!(done.status, DonationStatus::Completed);
        let bookings = service.my_bookings(Some(&receiver.id)).unwrap();
        assert!(bookings.active.is_empty());
        assert_eq!(bookings.history.len(), 1);
    }

    #[test]
    fn test_login_adds_welcome_back() {
        let (mut service, _) = service();
        service.register("555-0001", "pw", "Alice").unwrap();
        let user = service.login(" 555-0001 ", "pw").unwrap();
        let feed = service.notifications(Some(&user.id)).unwrap();
        assert_eq!(feed.items[0].text, "Welcome back, Alice!");
        assert_eq!(service.login("555-0001", "nope"), Err(RegistryError::InvalidCredentials));
    }

    #[test]
    fn test_only_participants_complete_or_cancel() {
        let (mut service, _) = service();
        let donor = service.register("1", "pw", "Donor").unwrap();
        let receiver = service.register("2", "pw", "Receiver").unwrap();
        let stranger = service.register("3", "pw", "Stranger").unwrap();

        let d = service.create_donation(Some(&donor.id), draft("Rice", 4)).unwrap();
        assert_eq!(
            service.cancel(Some(&stranger.id), &d.id),
            Err(RegistryError::Forbidden(d.id.clone()))
        );
        assert_eq!(
            service.cancel(Some(&donor.id), "missing"),
            Err(RegistryError::NotFound("missing".to_string()))
        );

        service.claim(Some(&receiver.id), &d.id).unwrap();
        assert!(service.complete(Some(&stranger.id), &d.id).is_err());
        let cancelled = service.cancel(Some(&donor.id), &d.id).unwrap();
        assert_eq!(cancelled.status, DonationStatus::Cancelled);
    }

    #[test]
    fn test_available_reads_the_clock() {
        let (mut service, clock) = service();
        let donor = service.register("1", "pw", "Donor").unwrap();
        service.create_donation(Some(&donor.id), draft("Rice", 1)).unwrap();

        assert_eq!(service.available(&AvailabilityFilter::new()).len(), 1);
        clock.advance(Duration::hours(1));
        assert!(service.available(&AvailabilityFilter::new()).is_empty());

        clock.advance(Duration::seconds(1));
        let expired = service.sweep_expirations();
        assert_eq!(expired.len(), 1);
        assert_eq!(
            service.donation(&expired[0]).unwrap().status,
            DonationStatus::Expired
        );
    }

    #[test]
    fn test_seed_demo_data() {
        let (mut service, _) = service();
        service.seed_demo_data();
        service.seed_demo_data();

        assert_eq!(service.registry().len(), 4);
        assert_eq!(service.users().len(), 2);
        assert_eq!(service.my_donations(Some(DEMO_DONOR_ID)).unwrap().len(), 2);

        let mine = service.my_bookings(Some(DEMO_RECEIVER_ID)).unwrap();
        assert_eq!(mine.active[0].id, "d3");
        assert_eq!(service.available(&AvailabilityFilter::new()).len(), 3);
        assert_eq!(
            service.claim(Some(DEMO_DONOR_ID), "d1"),
            Err(RegistryError::SelfClaim("d1".to_string()))
        );
    }

    #[test]
    fn test_feed_for_user_without_activity() {
        let (mut service, _) = service();
        service.seed_demo_data();
        let feed = service.notifications(Some(DEMO_RECEIVER_ID)).unwrap();
        assert_eq!(feed.unread_count, 0);
        assert_eq!(feed.items.len(), 1);
        assert_eq!(service.mark_notifications_read(Some(DEMO_RECEIVER_ID)).unwrap(), 0);
    }
}
