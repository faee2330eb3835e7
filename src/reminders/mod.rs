mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reminders",
            get(handlers::list_reminders).post(handlers::create_reminder),
        )
        .route(
            "/reminders/:id",
            delete(handlers::delete_reminder).patch(handlers::patch_reminder),
        )
}
