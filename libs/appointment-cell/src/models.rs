use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOOKING_SUCCESS_MESSAGE: &str = "Appointment booked successfully!";
pub const BOOKING_REDIRECT: &str = "/";

/// Booking form exactly as the patient filled it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// Date and time of a requested appointment. `time` stays in its "HH:MM"
/// string form and is only ever compared lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub date: NaiveDate,
    pub time: String,
}

/// Body of `POST /appointments/book`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
}

impl BookingPayload {
    /// Name and email are sent trimmed, the date in canonical `YYYY-MM-DD`
    /// form; the time goes out exactly as it was validated.
    pub fn new(form: &BookingForm, request: &AppointmentRequest, doctor_id: &str) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            date: request.date.format("%Y-%m-%d").to_string(),
            time: request.time.clone(),
            doctor_id: doctor_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The doctor is not available on {0}.")]
    DayNotAvailable(String),

    #[error("The doctor is only available between {start} - {end}.")]
    TimeOutOfRange { start: String, end: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Your {0} is required")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Failed to book appointment. Please try again.")]
    Rejected { status: u16 },

    #[error("An error occurred. Please try again.")]
    Transport { reason: String },
}

/// Why a booking attempt ended without a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRejection {
    #[error("Doctor details are not loaded")]
    DoctorNotLoaded,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl BookingRejection {
    /// Inline message next to the form, for failures the patient can fix.
    pub fn form_message(&self) -> Option<String> {
        match self {
            BookingRejection::Form(e) => Some(e.to_string()),
            BookingRejection::Validation(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Invalid booking flow transition from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}

/// One booking attempt: `Idle -> Validating -> Submitted | Rejected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingFlow {
    #[default]
    Idle,
    Validating,
    Submitted,
    Rejected(BookingRejection),
}

impl BookingFlow {
    pub fn name(&self) -> &'static str {
        match self {
            BookingFlow::Idle => "idle",
            BookingFlow::Validating => "validating",
            BookingFlow::Submitted => "submitted",
            BookingFlow::Rejected(_) => "rejected",
        }
    }

    pub fn begin_validation(&mut self) -> Result<(), AppointmentError> {
        self.transition(BookingFlow::Validating)
    }

    pub fn submitted(&mut self) -> Result<(), AppointmentError> {
        self.transition(BookingFlow::Submitted)
    }

    pub fn reject(&mut self, rejection: impl Into<BookingRejection>) -> Result<(), AppointmentError> {
        self.transition(BookingFlow::Rejected(rejection.into()))
    }

    pub fn form_error(&self) -> Option<String> {
        match self {
            BookingFlow::Rejected(rejection) => rejection.form_message(),
            _ => None,
        }
    }

    fn transition(&mut self, next: BookingFlow) -> Result<(), AppointmentError> {
        let allowed = matches!(
            (&*self, &next),
            (BookingFlow::Idle, BookingFlow::Validating)
                | (BookingFlow::Validating, BookingFlow::Submitted)
                | (BookingFlow::Validating, BookingFlow::Rejected(_))
        );

        if !allowed {
            return Err(AppointmentError::InvalidTransition {
                from: self.name(),
                to: next.name(),
            });
        }

        *self = next;
        Ok(())
    }
}
