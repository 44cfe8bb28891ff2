//! Core type definitions for the application

/// A single photo from the Flickr API, ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoItem {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Pagination progress for the current query
///
/// `Exhausted` is terminal for the query: the service returned an empty
/// page, so no further pages are requested until the query changes.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PaginationStatus {
    #[default]
    Idle,
    Fetching,
    Exhausted,
    Failed(String),
}

/// The single screen state emitted to the view
///
/// Each emission fully replaces the previous one; the view renders whatever
/// variant is current and nothing else. `Idle` is only ever seen before the
/// first fetch is issued.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PhotoListState {
    #[default]
    Idle,
    Loading,
    PaginationLoading,
    Success(Vec<PhotoItem>),
    Error(String),
    PaginationError(String),
}

impl PhotoListState {
    pub fn is_success(&self) -> bool {
        matches!(self, PhotoListState::Success(_))
    }
}

/// UI state for the terminal chrome (search bar text, grid cursor)
#[derive(Clone)]
pub struct UiState {
    pub search_query: String,
    pub selected: usize,
    /// Grid column count, derived from the terminal width by the draw loop
    pub columns: usize,
    pub should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected: 0,
            columns: 2,
            should_quit: false,
        }
    }
}
