//! Weather lookup for Skylook
//!
//! City search and current/daily weather via the Open-Meteo APIs, plus the
//! static weather code table.

pub mod codes;
pub mod geocode;
pub mod link;
pub mod provider;
pub mod source;
pub mod types;

pub use codes::{describe, WeatherInfo};
pub use geocode::{GeocodingClient, MIN_QUERY_LEN};
pub use link::search_link;
pub use provider::WeatherProvider;
pub use source::{BoxFuture, CitySearch, ForecastSource};
pub use types::*;
