// --- File: crates/sharemeal_api/src/handlers.rs ---
//! HTTP handlers for the ShareMeal API.
//!
//! The acting user travels in the `x-user-id` header, the mock session the
//! front-end keeps after sign-in. Handlers that need a session pass it on as
//! `Option<&str>` and let the service reject anonymous calls.
//!
//! Every failure is rendered through [`ShareMealError`], so the body is always
//! `{"error": {"message", "code"}}`.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sharemeal_common::{map_json_error, ShareMealError};
use sharemeal_registry::{
    AvailabilityFilter, Bookings, Donation, DonationDraft, DonationId, NotificationFeed,
    RegistryError, SharedService, SnapshotDiff,
};
#[cfg(feature = "openapi")]
use sharemeal_registry::User;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header carrying the signed-in user id.
pub const SESSION_HEADER: &str = "x-user-id";

/// Shared state for the ShareMeal handlers
#[derive(Clone)]
pub struct ApiState {
    pub service: SharedService,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SweepResponse {
    /// Ids that moved to `expired` in this sweep
    pub expired: Vec<DonationId>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MarkReadResponse {
    /// Entries that were unread before the call
    pub marked: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
}

/// The session user id, if the header is present and not blank.
pub fn session_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn respond<T: Serialize>(result: Result<T, RegistryError>, status: StatusCode) -> Response {
    if let Err(err) = &result {
        warn!("Request rejected: {}", err);
    }
    match map_json_error(result, ShareMealError::from) {
        Ok(body) => (status, body).into_response(),
        Err(response) => response,
    }
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "ShareMeal"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Missing name, phone or password"),
        (status = 409, description = "Phone number already registered")
    ),
    tag = "ShareMeal"
))]
pub async fn register_handler(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    debug!("Registering {}", payload.phone);
    let result = state
        .service
        .write()
        .await
        .register(&payload.phone, &payload.password, &payload.name);
    respond(result, StatusCode::CREATED)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; use the id as x-user-id", body = User),
        (status = 401, description = "Invalid phone number or password")
    ),
    tag = "ShareMeal"
))]
pub async fn login_handler(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let result = state
        .service
        .write()
        .await
        .login(&payload.phone, &payload.password);
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/donations",
    params(AvailabilityFilter),
    responses((status = 200, description = "Listings that can be claimed now", body = [Donation])),
    tag = "ShareMeal"
))]
pub async fn list_donations_handler(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<AvailabilityFilter>,
) -> Response {
    let available = state.service.read().await.available(&filter);
    debug!("Returning {} available donation(s)", available.len());
    respond::<Vec<Donation>>(Ok(available), StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/donations",
    request_body = DonationDraft,
    responses(
        (status = 201, description = "Listing created", body = Donation),
        (status = 400, description = "Invalid draft"),
        (status = 401, description = "Not signed in")
    ),
    tag = "ShareMeal"
))]
pub async fn create_donation_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(draft): Json<DonationDraft>,
) -> Response {
    let actor = session_user(&headers);
    let result = state
        .service
        .write()
        .await
        .create_donation(actor.as_deref(), draft);
    respond(result, StatusCode::CREATED)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/donations/{id}",
    params(("id" = String, Path, description = "Donation id")),
    responses(
        (status = 200, description = "The listing", body = Donation),
        (status = 404, description = "Unknown id")
    ),
    tag = "ShareMeal"
))]
pub async fn get_donation_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Response {
    let result = state.service.read().await.donation(&id);
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/donations/{id}/claim",
    params(("id" = String, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Reserved for the caller", body = Donation),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Unknown id"),
        (status = 409, description = "Own listing, no longer available or expired")
    ),
    tag = "ShareMeal"
))]
pub async fn claim_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let actor = session_user(&headers);
    let result = state.service.write().await.claim(actor.as_deref(), &id);
    if let Ok(donation) = &result {
        info!("Donation {} claimed over HTTP", donation.id);
    }
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/donations/{id}/complete",
    params(("id" = String, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Marked as picked up", body = Donation),
        (status = 403, description = "Caller is neither donor nor receiver"),
        (status = 409, description = "Listing is not claimed")
    ),
    tag = "ShareMeal"
))]
pub async fn complete_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let actor = session_user(&headers);
    let result = state.service.write().await.complete(actor.as_deref(), &id);
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/donations/{id}/cancel",
    params(("id" = String, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Listing withdrawn", body = Donation),
        (status = 403, description = "Caller is neither donor nor receiver"),
        (status = 409, description = "Listing already finished")
    ),
    tag = "ShareMeal"
))]
pub async fn cancel_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let actor = session_user(&headers);
    let result = state.service.write().await.cancel(actor.as_deref(), &id);
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/me/donations",
    responses(
        (status = 200, description = "Listings created by the caller", body = [Donation]),
        (status = 401, description = "Not signed in")
    ),
    tag = "ShareMeal"
))]
pub async fn my_donations_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Response {
    let actor = session_user(&headers);
    let result = state.service.read().await.my_donations(actor.as_deref());
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/me/bookings",
    responses(
        (status = 200, description = "Active and past reservations", body = Bookings),
        (status = 401, description = "Not signed in")
    ),
    tag = "ShareMeal"
))]
pub async fn my_bookings_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Response {
    let actor = session_user(&headers);
    let result: Result<Bookings, _> = state.service.read().await.my_bookings(actor.as_deref());
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/me/notifications",
    responses(
        (status = 200, description = "Notification feed", body = NotificationFeed),
        (status = 401, description = "Not signed in")
    ),
    tag = "ShareMeal"
))]
pub async fn notifications_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Response {
    let actor = session_user(&headers);
    let result: Result<NotificationFeed, _> =
        state.service.read().await.notifications(actor.as_deref());
    respond(result, StatusCode::OK)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/me/notifications/read",
    responses(
        (status = 200, description = "Everything marked read", body = MarkReadResponse),
        (status = 401, description = "Not signed in")
    ),
    tag = "ShareMeal"
))]
pub async fn mark_read_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Response {
    let actor = session_user(&headers);
    let result = state
        .service
        .write()
        .await
        .mark_notifications_read(actor.as_deref())
        .map(|marked| MarkReadResponse { marked });
    respond(result, StatusCode::OK)
}

/// Runs an expiration sweep now.
///
/// Operator-only: takes no session and is mounted only when
/// `server.admin_routes` is enabled.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/sweep",
    responses((status = 200, description = "Sweep result", body = SweepResponse)),
    tag = "ShareMeal"
))]
pub async fn sweep_handler(State(state): State<Arc<ApiState>>) -> Response {
    let expired = state.service.write().await.sweep_expirations();
    respond::<SweepResponse>(Ok(SweepResponse { expired }), StatusCode::OK)
}

/// Reconciles the registry against a full remote listing.
///
/// Operator-only, like [`sweep_handler`].
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/snapshot",
    request_body = [Donation],
    responses((status = 200, description = "Reconciliation result", body = SnapshotDiff)),
    tag = "ShareMeal"
))]
pub async fn snapshot_handler(
    State(state): State<Arc<ApiState>>,
    Json(remote): Json<Vec<Donation>>,
) -> Response {
    let diff = state.service.write().await.apply_snapshot(remote);
    respond::<SnapshotDiff>(Ok(diff), StatusCode::OK)
}
