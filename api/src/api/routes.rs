//! Route table.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, get_financial_info, health_check, list_all_people, list_personal_info, login_user,
    register_user, submit_financial_info, submit_legacy_financial_info, submit_personal_info,
};

/// Builds the application router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Accounts
        .route("/registro", post(register_user))
        .route("/login", post(login_user))
        // Financial profile
        .route("/info_financiera", post(submit_financial_info))
        .route("/info_financiera/legacy", post(submit_legacy_financial_info))
        .route("/obtener_info_financiera", get(get_financial_info))
        // Personal records
        .route("/info_personal", post(submit_personal_info))
        .route("/obtener_info_personal", get(list_personal_info))
        .route("/todas_personas", get(list_all_people))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
