use axum::{middleware, routing::{get, post}, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod fines;
pub mod licenses;
pub mod payments;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn root() -> &'static str {
    "DriveMe API is running"
}

/// Build the full application router: public routes, bearer-protected API
/// routes and the OpenAPI docs.
pub fn build_router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/fines", get(fines::list))
        .route("/api/fines/outstanding", get(fines::outstanding))
        .route("/api/fines/:id", get(fines::get).put(fines::dispute))
        .route("/api/licenses", get(licenses::get))
        .route("/api/licenses/status", get(licenses::status))
        .route("/api/licenses/renewal-request", post(licenses::renewal_request))
        .route("/api/payments", get(payments::history))
        .route("/api/payments/fines/:fine_id", post(payments::pay_fine))
        .route("/api/payments/:id/receipt", get(payments::receipt))
        .route_layer(middleware::from_fn_with_state(state.clone(), crate::middleware::require_bearer));

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
