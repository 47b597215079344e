//! WMO weather code lookup.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Description and icon for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub description: &'static str,
    pub icon: &'static str,
}

const UNKNOWN: WeatherInfo = WeatherInfo {
    description: "Unknown",
    icon: "🤷",
};

const WEATHER_CODES: &[(i32, WeatherInfo)] = &[
    (0, WeatherInfo { description: "Clear sky", icon: "☀️" }),
    (1, WeatherInfo { description: "Mainly clear", icon: "🌤️" }),
    (2, WeatherInfo { description: "Partly cloudy", icon: "🌥️" }),
    (3, WeatherInfo { description: "Overcast", icon: "☁️" }),
    (45, WeatherInfo { description: "Fog", icon: "🌫️" }),
    (48, WeatherInfo { description: "Depositing rime fog", icon: "🌫️" }),
    (61, WeatherInfo { description: "Slight rain", icon: "🌧️" }),
    (63, WeatherInfo { description: "Moderate rain", icon: "🌧️" }),
    (65, WeatherInfo { description: "Heavy rain", icon: "🌧️" }),
    (80, WeatherInfo { description: "Slight rain showers", icon: "🌧️" }),
    (82, WeatherInfo { description: "Violent rain showers", icon: "🌧️" }),
    (95, WeatherInfo { description: "Thunderstorm", icon: "⛈️" }),
];

/// Night replacements, keyed by weather code
const NIGHT_ICONS: &[(i32, &str)] = &[(0, "🌙"), (1, "☁️")];

/// Look up the description and icon for a weather code.
///
/// Unknown codes map to "Unknown". Only clear sky and mainly clear have a
/// night variant; every other icon is the same day and night.
pub fn describe(code: i32, is_day: bool) -> WeatherInfo {
    let info = WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, info)| *info)
        .unwrap_or(UNKNOWN);

    if is_day {
        return info;
    }

    match NIGHT_ICONS.iter().find(|(c, _)| *c == code) {
        Some((_, icon)) => WeatherInfo { icon: *icon, ..info },
        None => info,
    }
}
