//! Admin endpoints, mounted when `admin.enabled` is set.
//!
//! - `GET /admin/status`: version and current index generation
//! - `GET /admin/index`: index statistics
//! - `POST /admin/reload`: rebuild from `feed.path`

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/index", get(get_index))
        .route("/admin/reload", post(reload_feed))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
