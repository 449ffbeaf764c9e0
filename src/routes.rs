use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{catalog, wizard};
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/regions", get(catalog::regions_get))
        .route("/api/wizard", get(wizard::wizard_get))
        .route("/api/wizard/identity", post(wizard::enter_identity))
        .route("/api/wizard/basic-config", post(wizard::enter_basic_config))
        .route("/api/wizard/network-type", post(wizard::select_network_type))
        .route("/api/wizard/network", post(wizard::select_network))
        .route("/api/wizard/subnet", post(wizard::select_subnet))
        .route("/api/wizard/advance", post(wizard::advance))
        .route("/api/wizard/retreat", post(wizard::retreat))
        .route("/api/wizard/submit", post(wizard::submit))
        .route("/api/wizard/reset", post(wizard::reset))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
