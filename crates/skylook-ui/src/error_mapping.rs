//! Maps UI service errors to skylook_core::AppError for consistent user-facing messages.

use crate::services::WeatherError as UiWeatherError;
use skylook_core::{AppError, NetworkError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Network(n) => AppError::Weather(WeatherError::Request(n)),
            UiWeatherError::Status(status) => {
                AppError::Weather(WeatherError::Request(NetworkError::ServerError {
                    status,
                    message: format!("forecast returned HTTP {}", status),
                }))
            }
            UiWeatherError::Parse(s) => AppError::Weather(WeatherError::ApiError(s)),
            UiWeatherError::Setup(s) => AppError::Weather(WeatherError::ClientSetup(s)),
        }
    }
}
