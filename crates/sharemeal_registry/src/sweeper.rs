// --- File: crates/sharemeal_registry/src/sweeper.rs ---
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::service::SharedService;

/// Runs the expiration sweep now and then every `every`.
///
/// The task runs until the returned handle is aborted. `every` must be
/// non-zero; the loaded configuration guarantees that.
pub fn spawn_expiration_sweeper(service: SharedService, every: Duration) -> JoinHandle<()> {
    info!("Starting expiration sweeper (every {:?})", every);
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // the first tick completes immediately
            ticker.tick().await;
            let expired = service.write().await.sweep_expirations();
            if expired.is_empty() {
                debug!("Sweep found nothing to expire");
            }
        }
    })
}
