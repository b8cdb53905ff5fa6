use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

use doctor_cell::models::DoctorAvailability;

use crate::models::{AppointmentRequest, BookingForm, FormError, ValidationError};

/// Longest address a mail server accepts in a forward path.
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// English three-letter weekday code, independent of host locale and timezone.
pub fn weekday_abbreviation(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

pub struct BookingValidator;

impl BookingValidator {
    /// Accepts `time` when `start_time <= time <= end_time`, comparing the
    /// "HH:MM" strings lexically. Only zero-padded 24-hour times order correctly.
    pub fn validate(
        availability: &DoctorAvailability,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), ValidationError> {
        let weekday = weekday_abbreviation(date);

        if !availability.is_available_on(weekday) {
            return Err(ValidationError::DayNotAvailable(weekday.to_string()));
        }

        if time < availability.start_time.as_str() || time > availability.end_time.as_str() {
            return Err(ValidationError::TimeOutOfRange {
                start: availability.start_time.clone(),
                end: availability.end_time.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_request(
        availability: &DoctorAvailability,
        request: &AppointmentRequest,
    ) -> Result<(), ValidationError> {
        Self::validate(availability, request.date, &request.time)
    }
}

/// Required-field, email and date checks; the time is passed through as typed.
pub fn parse_form(form: &BookingForm) -> Result<AppointmentRequest, FormError> {
    let fields = [
        ("name", &form.name),
        ("email", &form.email),
        ("date", &form.date),
        ("time", &form.time),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(FormError::MissingField(field));
        }
    }

    let email = form.email.trim();
    if email.len() > MAX_EMAIL_LEN || !EMAIL_REGEX.is_match(email) {
        return Err(FormError::InvalidEmail);
    }

    let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(form.date.clone()))?;

    Ok(AppointmentRequest {
        date,
        time: form.time.clone(),
    })
}
