// --- File: crates/services/sharemeal_backend/src/app_state.rs ---
use sharemeal_config::AppConfig;
use sharemeal_registry::{ShareMealService, SharedService};
use std::sync::Arc;
use tracing::info;

/// Everything the server shares between the router and background tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: SharedService,
}

/// Builder for AppState, mainly so tests and tools can inject a prepared
/// service instead of the one derived from the config.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    service: Option<ShareMealService>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            service: None,
        }
    }

    /// Use `service` as is; demo seeding is left to the caller.
    pub fn with_service(mut self, service: ShareMealService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn build(self) -> AppState {
        let service = match self.service {
            Some(service) => service,
            None => {
                let mut service = ShareMealService::new(&self.config.registry);
                if self.config.seed_demo_data {
                    service.seed_demo_data();
                } else {
                    info!("Starting with an empty registry");
                }
                service
            }
        };

        AppState {
            config: self.config,
            service: service.into_shared(),
        }
    }
}

impl AppState {
    pub fn builder(config: Arc<AppConfig>) -> AppStateBuilder {
        AppStateBuilder::new(config)
    }

    /// Service built from the config, seeded when `seed_demo_data` is set.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::builder(config).build()
    }
}
