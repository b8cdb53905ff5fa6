use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use doctor_cell::models::DoctorAvailability;
use shared_backend::{BackendClient, BackendError};
use shared_config::AppConfig;

use crate::models::{
    AppointmentError, AppointmentRequest, BookingFlow, BookingForm, BookingPayload,
    BookingRejection, SubmissionError,
};
use crate::services::validator::{parse_form, BookingValidator};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit(&self, payload: &BookingPayload) -> Result<(), SubmissionError>;
}

/// Books appointments through the clinic backend.
pub struct HttpBookingGateway {
    backend: BackendClient,
}

impl HttpBookingGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    /// POST /appointments/book
    async fn submit(&self, payload: &BookingPayload) -> Result<(), SubmissionError> {
        debug!("Submitting booking for doctor {} on {} {}", payload.doctor_id, payload.date, payload.time);

        match self.backend.post_json("/appointments/book", payload).await {
            Ok(_) => Ok(()),
            Err(BackendError::Transport(e)) => Err(SubmissionError::Transport {
                reason: e.to_string(),
            }),
            Err(e) => Err(SubmissionError::Rejected {
                status: e.status_code().unwrap_or_default(),
            }),
        }
    }
}

pub struct BookingService {
    gateway: Arc<dyn BookingGateway>,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            gateway: Arc::new(HttpBookingGateway::new(config)),
        }
    }

    pub fn with_gateway(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    /// Form checks followed by the availability rules of the loaded doctor.
    /// `None` means the doctor record never loaded.
    pub fn check(
        &self,
        availability: Option<&DoctorAvailability>,
        form: &BookingForm,
    ) -> Result<AppointmentRequest, BookingRejection> {
        let availability = availability.ok_or(BookingRejection::DoctorNotLoaded)?;

        let request = parse_form(form)?;
        BookingValidator::validate_request(availability, &request)?;

        Ok(request)
    }

    /// Drives one attempt through `flow`. Rejections end up in the flow
    /// state; an `Err` only means `flow` was not `Idle` to begin with.
    pub async fn book(
        &self,
        flow: &mut BookingFlow,
        availability: Option<&DoctorAvailability>,
        doctor_id: &str,
        form: &BookingForm,
    ) -> Result<(), AppointmentError> {
        flow.begin_validation()?;

        let request = match self.check(availability, form) {
            Ok(request) => request,
            Err(rejection) => {
                warn!("Booking for doctor {} rejected: {}", doctor_id, rejection);
                return flow.reject(rejection);
            }
        };

        let payload = BookingPayload::new(form, &request, doctor_id);

        match self.gateway.submit(&payload).await {
            Ok(()) => {
                info!("Appointment booked with doctor {} on {} {}", doctor_id, payload.date, payload.time);
                flow.submitted()
            }
            Err(e) => {
                error!("Error booking appointment with doctor {}: {:?}", doctor_id, e);
                flow.reject(e)
            }
        }
    }
}
