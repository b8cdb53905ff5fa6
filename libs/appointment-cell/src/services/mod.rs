pub mod booking;
pub mod validator;

pub use booking::{BookingGateway, BookingService, HttpBookingGateway};
pub use validator::{parse_form, weekday_abbreviation, BookingValidator};
