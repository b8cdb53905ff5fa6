use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub const TEST_MAPS_API_KEY: &str = "test-maps-key";

pub struct TestConfig {
    pub backend_api_url: String,
    pub geocoding_api_url: String,
    pub google_maps_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_api_url: "http://localhost:5001/api".to_string(),
            geocoding_api_url: "http://localhost:5002/geocode/json".to_string(),
            google_maps_api_key: TEST_MAPS_API_KEY.to_string(),
        }
    }
}

impl TestConfig {
    /// Points both the backend and the geocoder at one mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            backend_api_url: format!("{}/api", uri),
            geocoding_api_url: format!("{}/geocode/json", uri),
            ..Self::default()
        }
    }

    pub fn without_geocoding(mut self) -> Self {
        self.google_maps_api_key = String::new();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_api_url: self.backend_api_url.clone(),
            google_maps_api_key: self.google_maps_api_key.clone(),
            geocoding_api_url: self.geocoding_api_url.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    /// Available Mon and Wed, 09:00 - 17:00, in Ankara.
    pub fn doctor_record_response() -> Value {
        json!({
            "fullname": "Dr. Ayşe Yılmaz",
            "area_of_interest": "Cardiology",
            "address": "Atatürk Blv. 12",
            "available_days": ["Mon", "Wed"],
            "start_time": "09:00",
            "end_time": "17:00",
            "city": "Ankara",
            "country": "Turkey"
        })
    }

    pub fn doctor_record_without_city() -> Value {
        let mut record = Self::doctor_record_response();
        record["city"] = Value::Null;
        record
    }

    pub fn geocode_ok_response(lat: f64, lng: f64) -> Value {
        json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Ankara, Turkey",
                    "geometry": {
                        "location": { "lat": lat, "lng": lng }
                    }
                }
            ]
        })
    }

    pub fn geocode_status_response(status: &str) -> Value {
        json!({
            "status": status,
            "results": []
        })
    }
}
