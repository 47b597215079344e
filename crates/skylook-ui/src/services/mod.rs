//! Async backends for the search controller.
//! Timers and network calls run as spawned tasks; results come back as
//! `ServiceMessage`s on the controller's channel.

pub mod search_service;
pub mod weather_service;

pub use search_service::{request_suggestions, schedule_debounce};
pub use weather_service::{request_fetch, WeatherError};

use skylook_weather::{Suggestion, WeatherReport};

/// Messages sent from async operations back to the controller
#[derive(Debug)]
pub enum ServiceMessage {
    /// The debounce timer for `token` ran to completion
    DebounceElapsed { token: u64 },
    /// City search finished for the query scheduled under `token`
    SuggestionsReady {
        token: u64,
        query: String,
        suggestions: Vec<Suggestion>,
    },
    /// Weather fetch finished for the selection made under `token`
    WeatherReady {
        token: u64,
        city: Suggestion,
        result: Result<WeatherReport, WeatherError>,
    },
}
