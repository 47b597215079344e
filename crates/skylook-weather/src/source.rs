//! Seams between the search controller and the HTTP clients.

use std::future::Future;
use std::pin::Pin;

use crate::geocode::GeocodingClient;
use crate::provider::WeatherProvider;
use crate::types::{Suggestion, WeatherError, WeatherReport};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can turn a query into city suggestions. Must not fail.
pub trait CitySearch: Send + Sync + 'static {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<Suggestion>>;
}

/// Something that can fetch weather for a coordinate pair.
pub trait ForecastSource: Send + Sync + 'static {
    fn forecast(&self, latitude: f64, longitude: f64)
        -> BoxFuture<'_, Result<WeatherReport, WeatherError>>;
}

impl CitySearch for GeocodingClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<Suggestion>> {
        Box::pin(GeocodingClient::search(self, query))
    }
}

impl ForecastSource for WeatherProvider {
    fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> BoxFuture<'_, Result<WeatherReport, WeatherError>> {
        Box::pin(self.fetch(latitude, longitude))
    }
}
