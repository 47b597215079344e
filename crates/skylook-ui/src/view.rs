//! View state for the weather panel.

use chrono::NaiveDate;
use skylook_weather::{describe, search_link, Suggestion, WeatherReport};

/// What the weather area of the widget is showing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherView {
    /// Nothing selected yet
    #[default]
    Welcome,
    Loading,
    Ready(WeatherPanel),
    /// Fetch failed; carries the message to show
    Failed(String),
}

/// Display-ready weather for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub city: String,
    /// e.g. "Monday, October 19"
    pub date_label: String,
    pub icon: &'static str,
    pub temperature: i64,
    pub description: &'static str,
    pub wind: String,
    pub humidity: String,
    pub forecast: Vec<ForecastCard>,
    pub search_link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub weekday: String,
    pub icon: &'static str,
    pub max_temp: i64,
    pub min_temp: i64,
}

impl ForecastCard {
    /// "17° / 9°"
    pub fn range_label(&self) -> String {
        format!("{}° / {}°", self.max_temp, self.min_temp)
    }
}

impl WeatherPanel {
    pub fn build(city: &Suggestion, report: &WeatherReport, today: NaiveDate) -> Self {
        let current = &report.current;
        let info = describe(current.weather_code, current.is_day);

        // Forecast cards always use the daytime icon
        let forecast = report
            .forecast
            .iter()
            .map(|day| ForecastCard {
                weekday: day.weekday.clone(),
                icon: describe(day.weather_code, true).icon,
                max_temp: day.max_temp,
                min_temp: day.min_temp,
            })
            .collect();

        Self {
            city: city.name.clone(),
            date_label: today.format("%A, %B %-d").to_string(),
            icon: info.icon,
            temperature: current.temperature,
            description: info.description,
            wind: format!("{} km/h", current.wind_speed),
            humidity: format!("{}%", current.humidity),
            forecast,
            search_link: search_link(&city.name),
        }
    }
}
