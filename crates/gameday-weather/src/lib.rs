//! Weather service for Game Day Weather
//!
//! Fetches current conditions or a forecast from OpenWeatherMap for each
//! stadium of a selection.

pub mod forecast;
pub mod provider;
pub mod types;

pub use forecast::{closest_index_to_target, closest_to_target, noon_timestamp, noon_timestamp_in};
pub use provider::{FetchRequest, WeatherProvider};
pub use types::*;
