// --- File: crates/services/dripper_backend/src/lib.rs ---
//! Router assembly for the DripperScheduler server.
//!
//! JSON endpoints live under `/api`; the booking pages are served from the
//! site root. Every response passes through the security header, compression
//! and trace layers.

pub mod app_state;
pub mod security;

pub use app_state::AppState;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

/// Builds the complete application router.
pub fn build_app(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the DripperScheduler API!" }))
        .merge(dripper_common::routes());

    let api_router = {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "booking")]
        {
            router = router.merge(dripper_booking::routes(state.booking.clone()));
        }
        #[cfg(feature = "chat")]
        {
            router = router.merge(dripper_chat::routes(state.chat.clone()));
        }
        router
    };

    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "booking")]
    {
        app = app.merge(dripper_booking::page_routes(state.booking.clone()));
    }

    #[cfg(feature = "openapi")]
    {
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api_doc()));
    }

    info!(
        use_booking = state.config.use_booking,
        use_chat = state.config.use_chat,
        "Routes assembled"
    );

    let app = security::with_security_headers(app);
    app.layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// The merged OpenAPI document of all compiled-in features.
#[cfg(feature = "openapi")]
pub fn api_doc() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "DripperScheduler API",
            version = "0.1.0",
            description = "Appointment booking and chat proxy endpoints",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        components(schemas(dripper_common::routes::HealthResponse, dripper_common::ErrorBody)),
        tags((name = "DripperScheduler", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut doc = ApiDoc::openapi();
    #[cfg(feature = "booking")]
    doc.merge(dripper_booking::doc::BookingApiDoc::openapi());
    #[cfg(feature = "chat")]
    doc.merge(dripper_chat::doc::ChatApiDoc::openapi());
    doc
}
