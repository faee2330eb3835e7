mod dto;
pub mod goal;
pub mod handlers;
pub mod repo;
pub mod services;
pub mod store;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hydration/today", get(handlers::today))
        .route("/hydration/streak", get(handlers::streak))
        .route(
            "/hydration/logs",
            get(handlers::list_logs).post(handlers::create_log),
        )
}
