//! Debounced city search and selection.
//!
//! `SearchController` owns every piece of widget state: the typed query, the
//! pending debounce timer, the suggestion list and the weather view. Spawned
//! tasks never touch that state; they report back through `ServiceMessage`s
//! which the owner feeds to [`SearchController::apply`].
//!
//! Every scheduled search and every selection is stamped with a token. A
//! message whose token is not the current one is stale and gets dropped, so a
//! slow response can never overwrite a newer one.

use std::sync::Arc;
use std::time::Duration;

use skylook_core::{AppError, SearchConfig};
use skylook_weather::{CitySearch, ForecastSource, Suggestion, MIN_QUERY_LEN};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::services::{self, ServiceMessage};
use crate::view::{WeatherPanel, WeatherView};

/// Error creating a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Constructed outside a tokio runtime
    NoRuntime,
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::NoRuntime => write!(f, "Search controller needs a tokio runtime"),
        }
    }
}

impl std::error::Error for ControllerError {}

/// Debounce timing and query length threshold.
///
/// `min_query_len` can raise the threshold but never lower it below
/// `MIN_QUERY_LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: MIN_QUERY_LEN,
        }
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
        }
    }
}

struct PendingSearch {
    token: u64,
    cancel: CancellationToken,
}

pub struct SearchController {
    query: String,
    suggestions: Vec<Suggestion>,
    view: WeatherView,
    pending: Option<PendingSearch>,
    search_token: u64,
    selection_token: u64,
    settings: SearchSettings,
    search: Arc<dyn CitySearch>,
    forecast: Arc<dyn ForecastSource>,
    runtime: Handle,
    tx: UnboundedSender<ServiceMessage>,
    rx: UnboundedReceiver<ServiceMessage>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("query", &self.query)
            .field("suggestions", &self.suggestions.len())
            .field("view", &self.view)
            .field("search_token", &self.search_token)
            .field("selection_token", &self.selection_token)
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Create a controller bound to the current tokio runtime.
    ///
    /// # Errors
    /// Returns `ControllerError::NoRuntime` when called outside a runtime.
    pub fn new(
        search: Arc<dyn CitySearch>,
        forecast: Arc<dyn ForecastSource>,
        settings: SearchSettings,
    ) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            query: String::new(),
            suggestions: Vec::new(),
            view: WeatherView::default(),
            pending: None,
            search_token: 0,
            selection_token: 0,
            settings,
            search,
            forecast,
            runtime,
            tx,
            rx,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    /// True while a debounce timer is scheduled and has not fired
    pub fn is_search_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a text-change event.
    ///
    /// Short queries clear the list immediately. Anything else replaces the
    /// scheduled search with a fresh timer.
    pub fn on_query_changed(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.invalidate_search();

        let min_len = self.settings.min_query_len.max(MIN_QUERY_LEN);
        if self.query.chars().count() < min_len {
            self.suggestions.clear();
            return;
        }

        let cancel = CancellationToken::new();
        services::schedule_debounce(
            &self.runtime,
            &self.tx,
            self.search_token,
            self.settings.debounce,
            cancel.clone(),
        );
        self.pending = Some(PendingSearch {
            token: self.search_token,
            cancel,
        });
    }

    /// Select the suggestion at `index`. Returns the chosen city, or `None`
    /// when the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<Suggestion> {
        let city = self.suggestions.get(index)?.clone();
        self.select_city(city.clone());
        Some(city)
    }

    /// Select a city: clear the input and list, then fetch its weather.
    pub fn select_city(&mut self, city: Suggestion) {
        self.query.clear();
        self.suggestions.clear();
        self.invalidate_search();
        self.view = WeatherView::Loading;

        self.selection_token += 1;
        services::request_fetch(
            &self.runtime,
            &self.tx,
            self.selection_token,
            self.forecast.clone(),
            city,
        );
    }

    /// Wait for the next message from a spawned task.
    pub async fn next_message(&mut self) -> Option<ServiceMessage> {
        self.rx.recv().await
    }

    /// Wait for the next message and apply it. Returns whether anything
    /// visible changed.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => self.apply(message),
            None => false,
        }
    }

    /// Apply every message that has already arrived without waiting.
    /// Returns whether anything visible changed.
    pub fn poll_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            changed |= self.apply(message);
        }
        changed
    }

    /// Apply one message. Returns whether anything visible changed.
    pub fn apply(&mut self, message: ServiceMessage) -> bool {
        match message {
            ServiceMessage::DebounceElapsed { token } => {
                if token != self.search_token {
                    return false;
                }
                self.pending = None;
                // Query as it is now, at fire time
                services::request_suggestions(
                    &self.runtime,
                    &self.tx,
                    token,
                    self.search.clone(),
                    self.query.clone(),
                );
                false
            }
            ServiceMessage::SuggestionsReady {
                token,
                query,
                suggestions,
            } => {
                if token != self.search_token {
                    tracing::debug!("Discarding stale suggestions for {:?}", query);
                    return false;
                }
                self.suggestions = suggestions;
                true
            }
            ServiceMessage::WeatherReady {
                token,
                city,
                result,
            } => {
                if token != self.selection_token {
                    tracing::debug!("Discarding stale weather for {}", city.name);
                    return false;
                }
                self.view = match result {
                    Ok(report) => {
                        let today = chrono::Local::now().date_naive();
                        WeatherView::Ready(WeatherPanel::build(&city, &report, today))
                    }
                    Err(e) => {
                        let error: AppError = e.into();
                        WeatherView::Failed(error.user_message().to_string())
                    }
                };
                true
            }
        }
    }

    /// Cancel the scheduled timer (if any) and retire the current token so
    /// in-flight results for it are ignored.
    fn invalidate_search(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            tracing::trace!(token = pending.token, "Cancelled scheduled search");
        }
        self.search_token += 1;
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }
}
