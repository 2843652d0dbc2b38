// --- File: crates/sharemeal_registry/src/distance.rs ---
//! Simulated donor proximity.
//!
//! There is no geolocation: every new listing gets a distance drawn from a
//! configured range so receivers have something to sort and filter by.

use rand::Rng;
use sharemeal_config::RegistryConfig;

/// Source of the display distance stamped on new listings.
#[cfg_attr(test, mockall::automock)]
pub trait DistanceSampler: Send + Sync {
    /// Distance to the donor in km.
    fn sample_km(&self) -> f64;
}

/// Uniform draw from `[min_km, max_km]`.
#[derive(Debug, Clone, Copy)]
pub struct UniformDistance {
    min_km: f64,
    max_km: f64,
}

impl UniformDistance {
    pub fn new(min_km: f64, max_km: f64) -> Self {
        if min_km <= max_km {
            Self { min_km, max_km }
        } else {
            Self {
                min_km: max_km,
                max_km: min_km,
            }
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.min_distance_km, config.max_distance_km)
    }
}

impl Default for UniformDistance {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

impl DistanceSampler for UniformDistance {
    fn sample_km(&self) -> f64 {
        rand::thread_rng().gen_range(self.min_km..=self.max_km)
    }
}

/// Always the same distance. Handy for demos and deterministic callers.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

impl DistanceSampler for FixedDistance {
    fn sample_km(&self) -> f64 {
        self.0
    }
}

/// Display form used on listings, one decimal: `2.345` → `"2.3 km"`.
pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}
