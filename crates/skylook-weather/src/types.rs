use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of forecast days shown after today
pub const FORECAST_DAYS: usize = 5;

/// A candidate location returned by city search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    /// Some places (e.g. disputed territories) come back without a country
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Suggestion {
    /// Label shown in the suggestion list, e.g. "London, United Kingdom"
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Geocoding search response. `results` is omitted entirely when nothing matched.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: RawCurrent,
    pub daily: RawDaily,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCurrent {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub is_day: u8,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDaily {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

/// Current conditions, reshaped for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Rounded to the nearest whole degree (°C)
    pub temperature: i64,
    pub weather_code: i32,
    /// km/h with one decimal place
    pub wind_speed: String,
    /// Relative humidity in percent
    pub humidity: u8,
    pub is_day: bool,
}

/// One day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Short weekday label, e.g. "Tue"
    pub weekday: String,
    pub max_temp: i64,
    pub min_temp: i64,
    pub weather_code: i32,
}

/// Current conditions plus the days following today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DayForecast>,
}

impl WeatherReport {
    /// Reshape a raw forecast response.
    ///
    /// Index 0 of the daily series is today and is skipped; the next
    /// `FORECAST_DAYS` entries become the forecast. Shorter series yield fewer days.
    pub(crate) fn from_response(response: ForecastResponse) -> Result<Self, WeatherError> {
        let ForecastResponse { current, daily } = response;

        let current = CurrentConditions {
            temperature: round_half_up(current.temperature_2m),
            weather_code: current.weather_code,
            wind_speed: format!("{:.1}", current.wind_speed_10m),
            humidity: round_half_up(current.relative_humidity_2m).clamp(0, 100) as u8,
            is_day: current.is_day != 0,
        };

        let available = daily
            .time
            .len()
            .min(daily.weather_code.len())
            .min(daily.temperature_2m_max.len())
            .min(daily.temperature_2m_min.len());

        let forecast = (1..available.min(FORECAST_DAYS + 1))
            .map(|i| -> Result<DayForecast, WeatherError> {
                let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").map_err(|e| {
                    WeatherError::Parse(format!("invalid date {:?}: {}", daily.time[i], e))
                })?;
                Ok(DayForecast {
                    date,
                    weekday: date.format("%a").to_string(),
                    max_temp: round_half_up(daily.temperature_2m_max[i]),
                    min_temp: round_half_up(daily.temperature_2m_min[i]),
                    weather_code: daily.weather_code[i],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { current, forecast })
    }
}

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(value: f64) -> i64 {
    // `value + 0.5` can round up to the next integer, so compare the fraction instead
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Client setup error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(days: usize) -> ForecastResponse {
        let dates = [
            "2026-10-19", "2026-10-20", "2026-10-21", "2026-10-22", "2026-10-23", "2026-10-24",
            "2026-10-25",
        ];
        ForecastResponse {
            current: RawCurrent {
                temperature_2m: 14.5,
                relative_humidity_2m: 72.0,
                is_day: 1,
                weather_code: 3,
                wind_speed_10m: 12.34,
            },
            daily: RawDaily {
                time: dates[..days].iter().map(|d| d.to_string()).collect(),
                weather_code: (0..days as i32).collect(),
                temperature_2m_max: (0..days).map(|i| 20.4 + i as f64).collect(),
                temperature_2m_min: (0..days).map(|i| 9.5 + i as f64).collect(),
            },
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.4), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5000000000000001), -1);
        assert_eq!(round_half_up(-0.49999999999999994), 0);
    }

    #[test]
    fn test_current_conditions_reshaped() {
        let report = WeatherReport::from_response(sample_response(7)).unwrap();
        assert_eq!(report.current.temperature, 15);
        assert_eq!(report.current.wind_speed, "12.3");
        assert_eq!(report.current.humidity, 72);
        assert!(report.current.is_day);
        assert_eq!(report.current.weather_code, 3);
    }

    #[test]
    fn test_forecast_skips_today_and_takes_five() {
        let report = WeatherReport::from_response(sample_response(7)).unwrap();
        assert_eq!(report.forecast.len(), FORECAST_DAYS);

        let first = &report.forecast[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(first.weekday, "Tue");
        assert_eq!(first.max_temp, 21);
        assert_eq!(first.min_temp, 11);
        assert_eq!(first.weather_code, 1);

        let last = &report.forecast[4];
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2026, 10, 24).unwrap());
        assert_eq!(last.weekday, "Sat");
        assert_eq!(last.weather_code, 5);
    }

    #[test]
    fn test_short_series_yields_fewer_days() {
        let report = WeatherReport::from_response(sample_response(3)).unwrap();
        assert_eq!(report.forecast.len(), 2);

        let report = WeatherReport::from_response(sample_response(1)).unwrap();
        assert!(report.forecast.is_empty());
    }

    #[test]
    fn test_night_flag() {
        let mut response = sample_response(6);
        response.current.is_day = 0;
        let report = WeatherReport::from_response(response).unwrap();
        assert!(!report.current.is_day);
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let mut response = sample_response(6);
        response.daily.time[2] = "yesterday".to_string();
        let err = WeatherReport::from_response(response).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn test_geocoding_response_without_results() {
        let parsed: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_suggestion_label() {
        let city = Suggestion {
            name: "Paris".into(),
            country: "France".into(),
            latitude: 48.85,
            longitude: 2.35,
        };
        assert_eq!(city.label(), "Paris, France");

        let bare = Suggestion {
            country: String::new(),
            ..city
        };
        assert_eq!(bare.label(), "Paris");
    }
}
