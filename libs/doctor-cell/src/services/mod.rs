pub mod doctor;
pub mod geocoding;
pub mod page;

pub use doctor::{DoctorDirectory, HttpDoctorDirectory};
pub use geocoding::{Geocoder, GoogleGeocodingClient};
pub use page::BookingPageLoader;
