// File: crates/sharemeal_api/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    HealthResponse, LoginRequest, MarkReadResponse, RegisterRequest, SweepResponse,
};
use sharemeal_registry::{
    Bookings, Donation, DonationDraft, DonationStatus, NotificationFeed, NotificationItem,
    SnapshotDiff, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler,
        crate::handlers::register_handler,
        crate::handlers::login_handler,
        crate::handlers::list_donations_handler,
        crate::handlers::create_donation_handler,
        crate::handlers::get_donation_handler,
        crate::handlers::claim_handler,
        crate::handlers::complete_handler,
        crate::handlers::cancel_handler,
        crate::handlers::my_donations_handler,
        crate::handlers::my_bookings_handler,
        crate::handlers::notifications_handler,
        crate::handlers::mark_read_handler,
        crate::handlers::sweep_handler,
        crate::handlers::snapshot_handler
    ),
    components(
        schemas(
            Donation,
            DonationDraft,
            DonationStatus,
            User,
            Bookings,
            NotificationFeed,
            NotificationItem,
            SnapshotDiff,
            RegisterRequest,
            LoginRequest,
            SweepResponse,
            MarkReadResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "ShareMeal", description = "Food donation registry API")
    ),
    servers(
        (url = "/api", description = "ShareMeal API server")
    )
)]
pub struct ShareMealApiDoc;
