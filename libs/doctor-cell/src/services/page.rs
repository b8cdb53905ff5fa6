use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::Coordinates;

use crate::models::{
    BookingPage, DoctorLoaded, DoctorLookupError, DoctorProfileView, GeocodingError,
    LocationSource, MapView, PageState,
};
use crate::services::doctor::{DoctorDirectory, HttpDoctorDirectory};
use crate::services::geocoding::{Geocoder, GoogleGeocodingClient};

/// Loads a booking page in two stages: the doctor record first, then the
/// map location for the doctor's city. Stage two never fails the page.
pub struct BookingPageLoader {
    directory: Arc<dyn DoctorDirectory>,
    geocoder: Arc<dyn Geocoder>,
}

impl BookingPageLoader {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            directory: Arc::new(HttpDoctorDirectory::new(config)),
            geocoder: Arc::new(GoogleGeocodingClient::new(config)),
        }
    }

    pub fn with_services(directory: Arc<dyn DoctorDirectory>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { directory, geocoder }
    }

    pub async fn load_doctor(&self, doctor_id: &str) -> Result<DoctorLoaded, DoctorLookupError> {
        let record = self.directory.fetch_doctor(doctor_id).await?;

        debug!("Loaded doctor {} ({})", doctor_id, record.fullname);

        Ok(DoctorLoaded {
            doctor_id: doctor_id.to_string(),
            record,
        })
    }

    /// `fallback` is the last known map center; it is kept whenever the
    /// city is missing or cannot be geocoded.
    pub async fn locate(&self, loaded: DoctorLoaded, fallback: Coordinates) -> BookingPage {
        let map = match loaded.record.geocodable_city() {
            Some(city) => match self.geocoder.geocode(city).await {
                Ok(center) => MapView::resolved(center, LocationSource::Geocoded),
                Err(GeocodingError::NotConfigured) => {
                    warn!("Geocoding not configured, using fallback center for {}", city);
                    MapView::resolved(fallback, LocationSource::Fallback)
                }
                Err(e) => {
                    warn!("Error fetching coordinates for {}: {}", city, e);
                    MapView::resolved(fallback, LocationSource::Fallback)
                }
            },
            None => {
                debug!("Doctor {} has no city, using fallback center", loaded.doctor_id);
                MapView::resolved(fallback, LocationSource::Fallback)
            }
        };

        BookingPage {
            doctor: DoctorProfileView::from(&loaded.record),
            doctor_id: loaded.doctor_id,
            map,
        }
    }

    /// Runs both stages and returns the settled page state.
    pub async fn load(&self, doctor_id: &str, fallback: Coordinates) -> PageState {
        let mut state = PageState::Loading;

        let outcome = match self.load_doctor(doctor_id).await {
            Ok(loaded) => Ok(self.locate(loaded, fallback).await),
            Err(e) => Err(e),
        };

        if let Ok(page) = &outcome {
            info!("Booking page ready for doctor {} ({:?} center)", page.doctor_id, page.map.source);
        }

        state.complete(outcome);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoctorRecord, LoadFailure};
    use crate::services::doctor::MockDoctorDirectory;
    use crate::services::geocoding::MockGeocoder;

    fn record(city: Option<&str>) -> DoctorRecord {
        DoctorRecord {
            fullname: "Dr. Ayşe Yılmaz".to_string(),
            area_of_interest: "Cardiology".to_string(),
            address: "Atatürk Blv. 12".to_string(),
            available_days: vec!["Mon".to_string(), "Wed".to_string()],
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            city: city.map(str::to_string),
            country: "Turkey".to_string(),
        }
    }

    fn fallback() -> Coordinates {
        Coordinates::new(38.4192, 27.1287)
    }

    fn loaded(state: PageState) -> BookingPage {
        match state {
            PageState::Loaded(page) => page,
            other => panic!("page should be loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn geocoded_city_becomes_map_center() {
        let mut directory = MockDoctorDirectory::new();
        directory
            .expect_fetch_doctor()
            .withf(|id| id == "42")
            .times(1)
            .returning(|_| Ok(record(Some("Ankara"))));

        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .withf(|city| city == "Ankara")
            .times(1)
            .returning(|_| Ok(Coordinates::new(39.93, 32.85)));

        let loader = BookingPageLoader::with_services(Arc::new(directory), Arc::new(geocoder));
        let state = loader.load("42", fallback()).await;

        let page = loaded(state);
        assert_eq!(page.map.center, Coordinates::new(39.93, 32.85));
        assert_eq!(page.map.source, LocationSource::Geocoded);
        assert!(!page.map.loading);
        assert_eq!(page.doctor.available_days, "Mon, Wed");
    }

    #[tokio::test]
    async fn geocoding_failure_keeps_fallback_center() {
        let mut directory = MockDoctorDirectory::new();
        directory
            .expect_fetch_doctor()
            .returning(|_| Ok(record(Some("Atlantis"))));

        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .returning(|_| Err(GeocodingError::Status("ZERO_RESULTS".to_string())));

        let loader = BookingPageLoader::with_services(Arc::new(directory), Arc::new(geocoder));
        let state = loader.load("42", fallback()).await;

        let page = loaded(state);
        assert_eq!(page.map.center, fallback());
        assert_eq!(page.map.source, LocationSource::Fallback);
    }

    #[tokio::test]
    async fn missing_city_skips_geocoding() {
        let mut directory = MockDoctorDirectory::new();
        directory
            .expect_fetch_doctor()
            .returning(|_| Ok(record(None)));

        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().never();

        let loader = BookingPageLoader::with_services(Arc::new(directory), Arc::new(geocoder));
        let state = loader.load("42", fallback()).await;

        assert_eq!(loaded(state).map.center, fallback());
    }

    #[tokio::test]
    async fn lookup_failure_never_reaches_geocoder() {
        let mut directory = MockDoctorDirectory::new();
        directory
            .expect_fetch_doctor()
            .returning(|_| Err(DoctorLookupError::NotFound));

        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().never();

        let loader = BookingPageLoader::with_services(Arc::new(directory), Arc::new(geocoder));
        let state = loader.load("missing", fallback()).await;

        assert_eq!(state, PageState::LoadFailed(LoadFailure::NotFound));
    }
}
