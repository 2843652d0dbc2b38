// --- File: crates/sharemeal_registry/src/filter.rs ---
use serde::Deserialize;

use crate::models::Donation;

/// Restrictions applied on top of "available and still fresh".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityFilter {
    /// Case-insensitive term matched against location, donor name and food items
    #[cfg_attr(feature = "openapi", param(example = "bakery"))]
    pub search: Option<String>,

    /// Drop listings farther away than this many km
    #[cfg_attr(feature = "openapi", param(example = 5.0))]
    pub max_distance_km: Option<f64>,
}

impl AvailabilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    /// Checks the search term and the distance threshold; status and expiry
    /// are the registry's concern.
    pub fn matches(&self, donation: &Donation) -> bool {
        self.within_distance(donation) && self.matches_search(donation)
    }

    fn within_distance(&self, donation: &Donation) -> bool {
        match self.max_distance_km {
            None => true,
            // an unreadable distance cannot be shown to be in range
            Some(max) => donation.distance_km().is_some_and(|km| km <= max),
        }
    }

    fn matches_search(&self, donation: &Donation) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(term) => term.to_lowercase(),
        };
        [
            &donation.location,
            &donation.donor_name,
            &donation.food_items,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Reads the numeric prefix of a display distance: `"2.3 km"` → `2.3`.
///
/// Leading whitespace is skipped and parsing stops at the first character
/// that cannot continue the number. Returns `None` when there is no number.
pub fn parse_distance_km(distance: &str) -> Option<f64> {
    let trimmed = distance.trim_start();
    let mut seen_dot = false;
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            _ => true,
        })
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());

    trimmed[..end].parse::<f64>().ok()
}
