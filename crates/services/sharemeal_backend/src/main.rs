// File: services/sharemeal_backend/src/main.rs
use axum::{routing::get, Router};
use sharemeal_api::{admin_routes, routes as sharemeal_routes};
use sharemeal_common::logging;
use sharemeal_config::load_config;
use sharemeal_registry::spawn_expiration_sweeper;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod app_state;

use app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    let _log_guard = logging::init_with_config(&config.logging);

    let state = AppState::new(config.clone());
    let sweeper = spawn_expiration_sweeper(
        state.service.clone(),
        Duration::from_secs(config.registry.sweep_interval_secs),
    );

    let mut api_router = Router::new()
        .route("/", get(|| async { "Welcome to the ShareMeal API!" }))
        .merge(sharemeal_routes(state.service.clone()));
    if config.server.admin_routes {
        info!("Admin endpoints enabled under /api/admin");
        api_router = api_router.merge(admin_routes(state.service.clone()));
    }

    #[allow(unused_mut)] // only reassigned with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use sharemeal_api::doc::ShareMealApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "ShareMeal API",
                version = "0.1.0",
                description = "ShareMeal food donation API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ShareMealApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = logging::log_result(
        TcpListener::bind(&addr).await,
        "Listener bound",
        &format!("Failed to bind {}", addr),
    )?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    logging::log_result(served, "Server drained", "Server error")?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
