//! Search widget for Skylook: debounced city autocomplete, selection, and
//! the weather view it drives.

pub mod controller;
pub mod error_mapping;
pub mod render;
pub mod services;
pub mod view;

pub use controller::{ControllerError, SearchController, SearchSettings};
pub use render::{render_suggestions, render_view};
pub use services::ServiceMessage;
pub use view::{ForecastCard, WeatherPanel, WeatherView};
