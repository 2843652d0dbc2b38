#[cfg(test)]
mod tests {
    use crate::distance::FixedDistance;
    use crate::models::{DonationDraft, DonationStatus, User};
    use crate::registry::DonationRegistry;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    enum Op {
        Claim { listing: usize, receiver: usize },
        Complete { listing: usize },
        Cancel { listing: usize },
        Sweep,
        Advance { minutes: i64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize, 0..3usize).prop_map(|(listing, receiver)| Op::Claim { listing, receiver }),
            (0..4usize).prop_map(|listing| Op::Complete { listing }),
            (0..4usize).prop_map(|listing| Op::Cancel { listing }),
            Just(Op::Sweep),
            (1..180i64).prop_map(|minutes| Op::Advance { minutes }),
        ]
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap()
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            phone: id.to_string(),
            password: None,
            is_verified: None,
        }
    }

    // Four listings by donor "u0" with 1..=4 hour windows
    fn seeded() -> (DonationRegistry, Vec<String>) {
        let mut registry = DonationRegistry::new();
        let ids = (1..=4u32)
            .map(|hours| {
                let draft = DonationDraft {
                    food_items: format!("Meal {}", hours),
                    servings: hours,
                    location: "Market St".to_string(),
                    donor_name: None,
                    phone_number: None,
                    freshness_hours: hours,
                };
                registry
                    .create(&user("u0"), draft, &FixedDistance(1.0), start())
                    .unwrap()
                    .id
            })
            .collect();
        (registry, ids)
    }

    proptest! {
        // Whatever happens, a listing never goes back to available, its
        // deadline never moves and a claimant is only recorded by a claim.
        #[test]
        fn test_random_operations_keep_lifecycle_invariants(ops in prop::collection::vec(op(), 1..40)) {
            let (mut registry, ids) = seeded();
            let deadlines: HashMap<String, DateTime<Utc>> = registry
                .iter()
                .map(|d| (d.id.clone(), d.expires_at))
                .collect();
            let mut now = start();

            for op in ops {
                let before: HashMap<String, DonationStatus> =
                    registry.iter().map(|d| (d.id.clone(), d.status)).collect();

                match op {
                    Op::Claim { listing, receiver } => {
                        let _ = registry.claim(&ids[listing], &format!("u{}", receiver), now);
                    }
                    Op::Complete { listing } => {
                        let _ = registry.complete(&ids[listing]);
                    }
                    Op::Cancel { listing } => {
                        let _ = registry.cancel(&ids[listing]);
                    }
                    Op::Sweep => {
                        registry.sweep_expirations(now);
                        prop_assert!(registry.sweep_expirations(now).is_empty());
                    }
                    Op::Advance { minutes } => now += Duration::minutes(minutes),
                }

                for donation in registry.iter() {
                    let old = before[&donation.id];
                    prop_assert!(old == donation.status || old.can_transition_to(donation.status),
                        "{} moved {} -> {}", donation.id, old, donation.status);
                    prop_assert_eq!(donation.expires_at, deadlines[&donation.id]);
                    if donation.status == DonationStatus::Claimed
                        || donation.status == DonationStatus::Completed
                    {
                        prop_assert!(donation.claimed_by_user_id.is_some());
                    }
                    if let Some(receiver) = &donation.claimed_by_user_id {
                        prop_assert_ne!(receiver, &donation.user_id);
                    }
                    if donation.status == DonationStatus::Expired {
                        prop_assert!(donation.claimed_by_user_id.is_none());
                    }
                }
            }
        }

        // A claim either succeeds for exactly one receiver or leaves the
        // claimant untouched.
        #[test]
        fn test_only_first_claim_wins(receivers in prop::collection::vec(1..6usize, 2..8)) {
            let (mut registry, ids) = seeded();
            let target = &ids[3];
            let outcomes: Vec<bool> = receivers
                .iter()
                .map(|r| registry.claim(target, &format!("u{}", r), start()).is_ok())
                .collect();

            prop_assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
            prop_assert!(outcomes[0]);
            let expected = format!("u{}", receivers[0]);
            prop_assert_eq!(
                registry.get(target).unwrap().claimed_by_user_id.as_deref(),
                Some(expected.as_str())
            );
        }
    }
}
