//! Controller module - Application logic and event handling
//!
//! The controller mediates between user input, the photo list state machine,
//! and the Flickr repository. It is organized into submodules by
//! responsibility:
//!
//! - `input`: Key event handling

mod input;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};

use crate::model::{FetchTicket, PhotoItem, PhotoListModel, PhotoListState, PhotoRepository, UiState};

/// How long typing has to pause before a keystroke actually searches.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Drives the photo list screen.
///
/// All list state lives in a single [`PhotoListModel`] behind one mutex, so
/// fetch completions and user events serialize on it. Screen states are
/// published through a `watch` channel: the draw loop subscribes once and
/// always observes the latest emission, each one replacing the previous.
#[derive(Clone)]
pub struct ListController {
    model: Arc<Mutex<PhotoListModel>>,
    repo: Arc<dyn PhotoRepository>,
    ui: Arc<Mutex<UiState>>,
    state_tx: Arc<watch::Sender<PhotoListState>>,
    debounce_seq: Arc<AtomicU64>,
}

impl ListController {
    pub fn new(repo: Arc<dyn PhotoRepository>) -> Self {
        let (state_tx, _) = watch::channel(PhotoListState::Idle);
        Self {
            model: Arc::new(Mutex::new(PhotoListModel::new())),
            repo,
            ui: Arc::new(Mutex::new(UiState::default())),
            state_tx: Arc::new(state_tx),
            debounce_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribes to screen state emissions. One subscriber per screen.
    pub fn subscribe(&self) -> watch::Receiver<PhotoListState> {
        self.state_tx.subscribe()
    }

    /// Records a new search query, debounced.
    ///
    /// Every keystroke lands here; only the last call within the debounce
    /// window issues a fetch. When it fires, the prior query's results are
    /// discarded and any fetch still in flight is superseded.
    pub fn set_query(&self, text: String) {
        let seq = self.debounce_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;
            if controller.debounce_seq.load(Ordering::SeqCst) != seq {
                // A newer keystroke superseded this one.
                return;
            }
            tracing::debug!(query = %text, "debounce elapsed, starting search");
            controller.start_search(text).await;
        });
    }

    async fn start_search(&self, query: String) {
        let mut model = self.model.lock().await;
        let ticket = model.begin_search(query);
        self.state_tx.send_replace(model.state());
        drop(model);
        self.spawn_fetch(ticket);
    }

    /// Fetches the next page, if the screen is showing results and the
    /// current query is neither exhausted nor already fetching.
    pub async fn load_next_page(&self) {
        let mut model = self.model.lock().await;
        if let Some(ticket) = model.begin_next_page() {
            tracing::debug!(query = %ticket.query, page = ticket.page, "loading next page");
            self.state_tx.send_replace(model.state());
            drop(model);
            self.spawn_fetch(ticket);
        } else {
            tracing::trace!(status = ?model.pagination(), "next page request ignored");
        }
    }

    /// Re-issues the most recent failed fetch, initial or pagination.
    pub async fn retry(&self) {
        let mut model = self.model.lock().await;
        if let Some(ticket) = model.begin_retry() {
            tracing::info!(query = %ticket.query, page = ticket.page, "retrying failed fetch");
            self.state_tx.send_replace(model.state());
            drop(model);
            self.spawn_fetch(ticket);
        }
    }

    /// Snapshot of the accumulated results for the current query.
    ///
    /// The draw loop reads this every frame, which is also what makes a
    /// recreated view render the already-loaded pages without refetching.
    pub async fn current_results(&self) -> Vec<PhotoItem> {
        self.model.lock().await.photos()
    }

    pub async fn ui_snapshot(&self) -> UiState {
        self.ui.lock().await.clone()
    }

    pub async fn set_grid_columns(&self, columns: usize) {
        self.ui.lock().await.columns = columns;
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let repo = self.repo.clone();
        let model = self.model.clone();
        let state_tx = self.state_tx.clone();
        tokio::spawn(async move {
            let result = match repo.fetch_page(&ticket.query, ticket.page).await {
                Ok(items) => Ok(items),
                Err(e) => {
                    tracing::error!(query = %ticket.query, page = ticket.page, error = %e, "fetch failed");
                    Err(Self::format_error(&e))
                }
            };

            let mut model = model.lock().await;
            if model.complete(ticket.seq, result) {
                state_tx.send_replace(model.state());
            } else {
                tracing::debug!(
                    query = %ticket.query,
                    page = ticket.page,
                    "discarding result of superseded fetch"
                );
            }
        });
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        // Translate the common transport failures into something a user
        // staring at the retry hint can act on.
        if error_str.contains("timed out") {
            "Request timed out. Check your connection and retry.".to_string()
        } else if error_str.contains("dns error") || error_str.contains("connect") {
            "Could not reach Flickr. Check your connection.".to_string()
        } else if error_str.contains("429") {
            "Rate limited by Flickr. Please wait a moment.".to_string()
        } else if error_str.contains("Invalid API Key") {
            "Invalid Flickr API key. Check FLICKR_API_KEY.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
