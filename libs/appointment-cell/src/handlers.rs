use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use doctor_cell::handlers::load_failure_to_app_error;
use doctor_cell::models::LoadFailure;
use doctor_cell::services::BookingPageLoader;
use shared_config::AppConfig;
use shared_models::AppError;

use crate::models::{BookingFlow, BookingForm, BookingRejection, BOOKING_REDIRECT, BOOKING_SUCCESS_MESSAGE};
use crate::services::booking::BookingService;

pub fn rejection_to_app_error(rejection: BookingRejection) -> AppError {
    match rejection {
        BookingRejection::Form(e) => AppError::BadRequest(e.to_string()),
        BookingRejection::Validation(e) => AppError::Unprocessable(e.to_string()),
        BookingRejection::DoctorNotLoaded => AppError::Unprocessable(rejection.to_string()),
        BookingRejection::Submission(e) => AppError::ExternalService(e.to_string()),
    }
}

/// Validates the form against the doctor's availability and books it.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    // Only the doctor record is needed; the map location is not
    let loaded = BookingPageLoader::new(&state)
        .load_doctor(&doctor_id)
        .await
        .map_err(|e| load_failure_to_app_error(LoadFailure::from(&e)))?;
    let availability = loaded.record.availability();

    let booking_service = BookingService::new(&state);
    let mut flow = BookingFlow::Idle;

    booking_service
        .book(&mut flow, Some(&availability), &doctor_id, &form)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    match flow {
        BookingFlow::Submitted => Ok((
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": BOOKING_SUCCESS_MESSAGE,
                "redirect": BOOKING_REDIRECT
            })),
        )),
        BookingFlow::Rejected(rejection) => Err(rejection_to_app_error(rejection)),
        other => Err(AppError::Internal(format!("Booking stopped in {} state", other.name()))),
    }
}
