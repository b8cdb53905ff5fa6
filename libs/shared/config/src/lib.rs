use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_GEOCODING_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

// İzmir city centre
pub const DEFAULT_MAP_LAT: f64 = 38.4192;
pub const DEFAULT_MAP_LNG: f64 = 27.1287;

pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub google_maps_api_key: String,
    pub geocoding_api_url: String,
    pub default_map_lat: f64,
    pub default_map_lng: f64,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            google_maps_api_key: String::new(),
            geocoding_api_url: DEFAULT_GEOCODING_API_URL.to_string(),
            default_map_lat: DEFAULT_MAP_LAT,
            default_map_lng: DEFAULT_MAP_LNG,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_api_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| {
                    warn!("BACKEND_API_URL not set, using default");
                    DEFAULT_BACKEND_API_URL.to_string()
                }),
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("GOOGLE_MAPS_API_KEY not set, using empty value");
                    String::new()
                }),
            geocoding_api_url: env::var("GEOCODING_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODING_API_URL.to_string()),
            default_map_lat: parse_or("DEFAULT_MAP_LAT", DEFAULT_MAP_LAT),
            default_map_lng: parse_or("DEFAULT_MAP_LNG", DEFAULT_MAP_LNG),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        };

        if !config.is_geocoding_configured() {
            warn!("Geocoding not configured - map will use the default center");
        }

        config
    }

    pub fn is_geocoding_configured(&self) -> bool {
        !self.google_maps_api_key.is_empty() && !self.geocoding_api_url.is_empty()
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
