use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Public: the booking page needs no authentication
    Router::new()
        .route("/{doctor_id}/booking", get(handlers::get_booking_page))
        .with_state(state)
}
