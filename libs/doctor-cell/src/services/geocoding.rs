use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::Coordinates;

use crate::models::{GeocodeResponse, GeocodingError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, city: &str) -> Result<Coordinates, GeocodingError>;
}

/// Google Maps Geocoding API client.
/// Based on: https://developers.google.com/maps/documentation/geocoding/requests-geocoding
pub struct GoogleGeocodingClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GoogleGeocodingClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.geocoding_api_url.clone(),
            api_key: config.google_maps_api_key.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_url.is_empty()
    }

    fn request_url(&self, city: &str) -> String {
        format!(
            "{}?address={}&key={}",
            self.api_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl Geocoder for GoogleGeocodingClient {
    async fn geocode(&self, city: &str) -> Result<Coordinates, GeocodingError> {
        if !self.is_configured() {
            return Err(GeocodingError::NotConfigured);
        }

        debug!("Geocoding city: {}", city);

        let response = self.client.get(self.request_url(city)).send().await?;
        let body: GeocodeResponse = response.json().await?;

        if body.status != "OK" {
            error!(
                "Geocoding API error: {} {}",
                body.status,
                body.error_message.as_deref().unwrap_or_default()
            );
        }

        body.first_location()
    }
}
