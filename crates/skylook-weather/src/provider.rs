use crate::types::{ForecastResponse, WeatherError, WeatherReport};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

pub const FORECAST_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,is_day,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Current conditions and daily forecast from Open-Meteo.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    pub fn open_meteo() -> Result<Self, WeatherError> {
        Self::new(FORECAST_URL, Duration::from_secs(10), "Skylook/0.1.0")
    }

    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| WeatherError::Config(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch weather for a coordinate pair.
    ///
    /// Unlike city search this propagates every failure; the caller decides
    /// what to show.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .inspect_err(|e| tracing::error!("Weather data fetch error: {}", e))?;

        if !response.status().is_success() {
            tracing::error!("Weather API returned status {}", response.status());
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: ForecastResponse = response.json().await.map_err(|e| {
            tracing::error!("Weather response parse error: {}", e);
            WeatherError::Parse(e.to_string())
        })?;

        WeatherReport::from_response(body)
    }
}
