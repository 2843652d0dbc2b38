// --- File: crates/sharemeal_api/src/routes.rs ---
use axum::{
    routing::{get, post},
    Router,
};
use sharemeal_registry::SharedService;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    cancel_handler, claim_handler, complete_handler, create_donation_handler,
    get_donation_handler, health_handler, list_donations_handler, login_handler,
    mark_read_handler, my_bookings_handler, my_donations_handler, notifications_handler,
    register_handler, snapshot_handler, sweep_handler, ApiState,
};

/// Create the ShareMeal routes
///
/// Paths are relative; the backend nests the router under `/api`.
///
/// # Arguments
///
/// * `service` - The shared service every handler reads from or writes to
///
/// # Returns
///
/// An Axum router with the ShareMeal API endpoints
pub fn routes(service: SharedService) -> Router {
    let state = Arc::new(ApiState { service });

    info!("ShareMeal routes initialized");

    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route(
            "/donations",
            get(list_donations_handler).post(create_donation_handler),
        )
        .route("/donations/{id}", get(get_donation_handler))
        .route("/donations/{id}/claim", post(claim_handler))
        .route("/donations/{id}/complete", post(complete_handler))
        .route("/donations/{id}/cancel", post(cancel_handler))
        .route("/me/donations", get(my_donations_handler))
        .route("/me/bookings", get(my_bookings_handler))
        .route("/me/notifications", get(notifications_handler))
        .route("/me/notifications/read", post(mark_read_handler))
        .with_state(state)
}

/// Create the operator routes (`/admin/...`)
///
/// These take no session. The backend only merges them when
/// `server.admin_routes` is set.
pub fn admin_routes(service: SharedService) -> Router {
    let state = Arc::new(ApiState { service });

    info!("ShareMeal admin routes initialized");

    Router::new()
        .route("/admin/sweep", post(sweep_handler))
        .route("/admin/snapshot", post(snapshot_handler))
        .with_state(state)
}
