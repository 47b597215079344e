//! Plain-text rendering of the widget for terminal front ends.

use std::fmt::Write;

use skylook_weather::Suggestion;

use crate::view::{WeatherPanel, WeatherView};

const WELCOME: &str = "Type a city name to see its weather.";

/// Numbered suggestion list, one per line. Empty when there are none.
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, city)| format!("  {}. {}\n", i + 1, city.label()))
        .collect()
}

pub fn render_view(view: &WeatherView) -> String {
    match view {
        WeatherView::Welcome => format!("{}\n", WELCOME),
        WeatherView::Loading => "Loading...\n".to_string(),
        WeatherView::Failed(message) => format!("{}\n", message),
        WeatherView::Ready(panel) => render_panel(panel),
    }
}

fn render_panel(panel: &WeatherPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", panel.city);
    let _ = writeln!(out, "{}", panel.date_label);
    let _ = writeln!(out, "{}  {}°C", panel.icon, panel.temperature);
    let _ = writeln!(out, "{}", panel.description);
    let _ = writeln!(out, "💨 Wind Speed: {}", panel.wind);
    let _ = writeln!(out, "💧 Humidity: {}", panel.humidity);

    if !panel.forecast.is_empty() {
        let _ = writeln!(out);
        for day in &panel.forecast {
            let _ = writeln!(out, "{}  {}  {}", day.weekday, day.icon, day.range_label());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "More: {}", panel.search_link);
    out
}
