use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use shared_config::AppConfig;
use shared_models::{AppError, Coordinates};

use crate::models::{BookingPage, LoadFailure, PageState};
use crate::services::page::BookingPageLoader;

pub fn default_center(config: &AppConfig) -> Coordinates {
    Coordinates::new(config.default_map_lat, config.default_map_lng)
}

pub fn load_failure_to_app_error(failure: LoadFailure) -> AppError {
    match failure {
        LoadFailure::NotFound => AppError::NotFound(failure.message().to_string()),
        LoadFailure::FetchFailed => AppError::ExternalService(failure.message().to_string()),
    }
}

/// Doctor profile, availability and map pin for the booking page.
#[axum::debug_handler]
pub async fn get_booking_page(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<BookingPage>, AppError> {
    let loader = BookingPageLoader::new(&state);

    match loader.load(&doctor_id, default_center(&state)).await {
        PageState::Loaded(page) => Ok(Json(page)),
        PageState::LoadFailed(failure) => Err(load_failure_to_app_error(failure)),
        PageState::Loading => Err(AppError::Internal("Booking page did not finish loading".to_string())),
    }
}
