use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use shared_backend::BackendError;
use shared_models::Coordinates;

pub const MAP_ZOOM: u8 = 12;

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Doctor record as returned by `GET /doctors/appointment/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub fullname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub area_of_interest: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
}

impl DoctorRecord {
    pub fn availability(&self) -> DoctorAvailability {
        DoctorAvailability::new(
            self.available_days.iter().cloned(),
            &self.start_time,
            &self.end_time,
        )
    }

    /// City to geocode, if the record carries a non-blank one.
    pub fn geocodable_city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}

/// Bookable weekdays plus the daily "HH:MM" window applied to each of them.
///
/// `start_time <= end_time` is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorAvailability {
    pub available_days: HashSet<String>,
    pub start_time: String,
    pub end_time: String,
}

impl DoctorAvailability {
    pub fn new<I, S>(days: I, start_time: &str, end_time: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_days: days.into_iter().map(Into::into).collect(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    pub fn is_available_on(&self, weekday: &str) -> bool {
        self.available_days.contains(weekday)
    }
}

/// Doctor details as shown on the booking page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorProfileView {
    pub fullname: String,
    pub specialization: String,
    pub address: String,
    pub available_days: String,
    pub available_hours: String,
    pub city: Option<String>,
    pub country: String,
}

impl From<&DoctorRecord> for DoctorProfileView {
    fn from(record: &DoctorRecord) -> Self {
        Self {
            fullname: record.fullname.clone(),
            specialization: record.area_of_interest.clone(),
            address: record.address.clone(),
            available_days: record.available_days.join(", "),
            available_hours: format!("{} - {}", record.start_time, record.end_time),
            city: record.city.clone(),
            country: record.country.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Geocoded,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub loading: bool,
    pub source: LocationSource,
}

impl MapView {
    pub fn resolved(center: Coordinates, source: LocationSource) -> Self {
        Self {
            center,
            zoom: MAP_ZOOM,
            loading: false,
            source,
        }
    }
}

/// Output of the first load stage: the doctor record, not yet located.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorLoaded {
    pub doctor_id: String,
    pub record: DoctorRecord,
}

/// Output of the second load stage: everything the booking page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingPage {
    pub doctor_id: String,
    pub doctor: DoctorProfileView,
    pub map: MapView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    NotFound,
    FetchFailed,
}

impl LoadFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LoadFailure::NotFound => "Doctor not found",
            LoadFailure::FetchFailed => "Failed to fetch doctor details",
        }
    }
}

impl From<&DoctorLookupError> for LoadFailure {
    fn from(err: &DoctorLookupError) -> Self {
        match err {
            DoctorLookupError::NotFound => LoadFailure::NotFound,
            DoctorLookupError::FetchFailed(_) => LoadFailure::FetchFailed,
        }
    }
}

/// Page lifecycle: `Loading -> Loaded | LoadFailed`, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Loaded(BookingPage),
    LoadFailed(LoadFailure),
}

impl PageState {
    /// Settles a `Loading` page. Returns false, leaving the state untouched,
    /// when the page has already settled.
    pub fn complete(&mut self, outcome: Result<BookingPage, DoctorLookupError>) -> bool {
        if !matches!(self, PageState::Loading) {
            return false;
        }

        *self = match outcome {
            Ok(page) => PageState::Loaded(page),
            Err(err) => PageState::LoadFailed(LoadFailure::from(&err)),
        };
        true
    }
}

#[derive(Debug, Error)]
pub enum DoctorLookupError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Failed to fetch doctor details")]
    FetchFailed(#[source] BackendError),
}

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Geocoding is not configured")]
    NotConfigured,

    #[error("Geocoding API error: {0}")]
    Status(String),

    #[error("Geocoding returned no results")]
    NoResults,

    #[error("Geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// Geocoding API wire format

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeGeometry {
    pub location: Coordinates,
}

impl GeocodeResponse {
    pub fn first_location(&self) -> Result<Coordinates, GeocodingError> {
        if self.status != "OK" {
            return Err(GeocodingError::Status(self.status.clone()));
        }

        self.results
            .first()
            .map(|result| result.geometry.location)
            .ok_or(GeocodingError::NoResults)
    }
}
