//! Debounce timer and city search tasks.

use std::sync::Arc;
use std::time::Duration;

use skylook_weather::CitySearch;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::ServiceMessage;

/// Start a debounce timer. Sends `DebounceElapsed` after `delay` unless
/// `cancel` fires first, in which case nothing is sent.
pub fn schedule_debounce(
    runtime: &Handle,
    tx: &UnboundedSender<ServiceMessage>,
    token: u64,
    delay: Duration,
    cancel: CancellationToken,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::trace!(token, "Debounce timer cancelled");
            }
            _ = tokio::time::sleep(delay) => {
                let _ = tx.send(ServiceMessage::DebounceElapsed { token });
            }
        }
    });
}

/// Run one city search. The search itself never fails, so neither does this.
pub fn request_suggestions(
    runtime: &Handle,
    tx: &UnboundedSender<ServiceMessage>,
    token: u64,
    search: Arc<dyn CitySearch>,
    query: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let suggestions = search.search(&query).await;
        tracing::debug!(token, "Search for {:?} returned {} cities", query, suggestions.len());
        let _ = tx.send(ServiceMessage::SuggestionsReady {
            token,
            query,
            suggestions,
        });
    });
}
