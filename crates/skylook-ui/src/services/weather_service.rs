//! Weather backend: async weather fetching for a selected city.

use std::sync::Arc;

use skylook_core::{NetworkError, ReqwestErrorExt};
use skylook_weather::{ForecastSource, Suggestion};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use super::ServiceMessage;

/// Error type for weather operations
#[derive(Debug)]
pub enum WeatherError {
    Network(NetworkError),
    Status(u16),
    Parse(String),
    /// The HTTP client could not be built
    Setup(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Network(e) => write!(f, "Weather error: {}", e),
            WeatherError::Status(s) => write!(f, "Weather error: HTTP {}", s),
            WeatherError::Parse(s) => write!(f, "Weather parse error: {}", s),
            WeatherError::Setup(s) => write!(f, "Weather client setup error: {}", s),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<skylook_weather::WeatherError> for WeatherError {
    fn from(e: skylook_weather::WeatherError) -> Self {
        match e {
            skylook_weather::WeatherError::Network(e) => WeatherError::Network(e.into_network_error()),
            skylook_weather::WeatherError::Status(s) => WeatherError::Status(s),
            skylook_weather::WeatherError::Parse(s) => WeatherError::Parse(s),
            skylook_weather::WeatherError::Config(s) => WeatherError::Setup(s),
        }
    }
}

/// Request weather for `city` asynchronously.
/// Sends `WeatherReady` on the channel when complete, success or not.
pub fn request_fetch(
    runtime: &Handle,
    tx: &UnboundedSender<ServiceMessage>,
    token: u64,
    source: Arc<dyn ForecastSource>,
    city: Suggestion,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tracing::info!("Fetching weather for {} ({}, {})", city.name, city.latitude, city.longitude);
        let result = source
            .forecast(city.latitude, city.longitude)
            .await
            .map_err(WeatherError::from);
        if let Err(e) = &result {
            tracing::error!("Weather fetch for {} failed: {}", city.name, e);
        }
        let _ = tx.send(ServiceMessage::WeatherReady {
            token,
            city,
            result,
        });
    });
}
