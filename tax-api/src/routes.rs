use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::auth::require_admin;
use crate::handlers;
use crate::state::AppState;

/// Public tax routes plus the Basic-auth protected `/admin` subtree.
pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/deductions", get(handlers::current_deductions))
        .route("/deductions/:kind", post(handlers::change_deduction))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(handlers::root))
        .route("/tax/calculations", post(handlers::calculate_tax))
        .route("/tax/calculations/upload-csv", post(handlers::upload_csv))
        .nest("/admin", admin)
        .with_state(state)
}
