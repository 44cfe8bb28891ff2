//! Photo list state machine
//!
//! This is the screen's single source of truth: the current query, the
//! accumulated results, the page counter, and the pagination status all live
//! here and are only ever mutated through the `begin_*`/`complete` methods.
//! The controller drives this machine from async callbacks; the machine
//! itself is synchronous and has no idea where results come from, which is
//! what makes the screen's behavior testable without a network.

use super::types::{PaginationStatus, PhotoItem, PhotoListState};

/// Identity of one outgoing fetch
///
/// The sequence number is the staleness check: a fetch result is only
/// applied if its ticket is still the in-flight one when it resolves. A
/// newer `begin_search` or `begin_next_page` replaces the in-flight ticket,
/// which silently invalidates any result still on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: String,
    pub page: u32,
    /// First page of a query, as opposed to a pagination fetch
    pub initial: bool,
}

#[derive(Default)]
pub struct PhotoListModel {
    query: String,
    photos: Vec<PhotoItem>,
    /// Highest page successfully loaded for the current query; 0 = none yet
    loaded_page: u32,
    pagination: PaginationStatus,
    in_flight: Option<FetchTicket>,
    /// (page, initial) of the most recent failed fetch, for `begin_retry`
    last_failed: Option<(u32, bool)>,
    next_seq: u64,
    state: PhotoListState,
}

impl PhotoListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last state produced by the machine, to be emitted to the view.
    pub fn state(&self) -> PhotoListState {
        self.state.clone()
    }

    pub fn photos(&self) -> Vec<PhotoItem> {
        self.photos.clone()
    }

    pub fn pagination(&self) -> &PaginationStatus {
        &self.pagination
    }

    fn issue(&mut self, query: String, page: u32, initial: bool) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket { seq: self.next_seq, query, page, initial };
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Starts a fresh search, discarding everything from the prior query.
    ///
    /// Always succeeds: a search supersedes any in-flight fetch, whose
    /// result will be dropped by the ticket check in [`Self::complete`].
    pub fn begin_search(&mut self, query: String) -> FetchTicket {
        self.query = query.clone();
        self.photos.clear();
        self.loaded_page = 0;
        self.pagination = PaginationStatus::Idle;
        self.last_failed = None;
        self.state = PhotoListState::Loading;
        self.issue(query, 1, true)
    }

    /// Requests the page after the last loaded one.
    ///
    /// Returns `None` (no fetch, no state change) while a fetch is already
    /// in flight, after the query is exhausted, or when the screen is not
    /// currently showing results.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some()
            || self.pagination == PaginationStatus::Exhausted
            || !self.state.is_success()
        {
            return None;
        }
        self.pagination = PaginationStatus::Fetching;
        self.state = PhotoListState::PaginationLoading;
        let page = self.loaded_page + 1;
        let query = self.query.clone();
        Some(self.issue(query, page, false))
    }

    /// Re-issues the most recent failed fetch with the same query and page.
    ///
    /// Returns `None` if nothing has failed or a fetch is already in flight.
    pub fn begin_retry(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let (page, initial) = self.last_failed.clone()?;
        if initial {
            self.state = PhotoListState::Loading;
        } else {
            self.pagination = PaginationStatus::Fetching;
            self.state = PhotoListState::PaginationLoading;
        }
        let query = self.query.clone();
        Some(self.issue(query, page, initial))
    }

    /// Applies a fetch result, returning `false` if the ticket is stale.
    ///
    /// A stale result (sequence number no longer matching the in-flight
    /// ticket) leaves the machine untouched: a newer search or page request
    /// has already taken over.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<PhotoItem>, String>) -> bool {
        let Some(ticket) = self.in_flight.take() else {
            return false;
        };
        if ticket.seq != seq {
            self.in_flight = Some(ticket);
            return false;
        }

        match result {
            Ok(items) if items.is_empty() => {
                // Empty page is not an error: the query is simply out of
                // pages. Results stay as they are.
                self.pagination = PaginationStatus::Exhausted;
                self.last_failed = None;
                self.state = PhotoListState::Success(self.photos.clone());
            }
            Ok(mut items) => {
                self.photos.append(&mut items);
                self.loaded_page = ticket.page;
                self.pagination = PaginationStatus::Idle;
                self.last_failed = None;
                self.state = PhotoListState::Success(self.photos.clone());
            }
            Err(message) => {
                self.last_failed = Some((ticket.page, ticket.initial));
                if ticket.initial {
                    // First-page failure: nothing to show for this query.
                    self.photos.clear();
                    self.pagination = PaginationStatus::Idle;
                    self.state = PhotoListState::Error(message);
                } else {
                    // Pagination failure keeps the already-loaded pages
                    // visible behind the retry affordance.
                    self.pagination = PaginationStatus::Failed(message.clone());
                    self.state = PhotoListState::PaginationError(message);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(prefix: &str, n: usize) -> Vec<PhotoItem> {
        (0..n)
            .map(|i| PhotoItem {
                id: format!("{prefix}{i}"),
                title: format!("{prefix} photo {i}"),
                url: format!("https://example.com/{prefix}{i}.jpg"),
            })
            .collect()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let model = PhotoListModel::new();
        assert_eq!(model.state(), PhotoListState::Idle);
        assert!(model.photos().is_empty());
    }

    #[test]
    fn test_search_then_success() {
        let mut model = PhotoListModel::new();
        let ticket = model.begin_search("cat".into());
        assert_eq!(ticket.page, 1);
        assert!(ticket.initial);
        assert_eq!(model.state(), PhotoListState::Loading);

        assert!(model.complete(ticket.seq, Ok(items("cat", 20))));
        assert_eq!(model.state(), PhotoListState::Success(items("cat", 20)));
        assert_eq!(model.pagination(), &PaginationStatus::Idle);
    }

    #[test]
    fn test_pagination_appends_and_bumps_page() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(items("a", 20)));

        let t2 = model.begin_next_page().expect("should issue page 2");
        assert_eq!(t2.page, 2);
        assert!(!t2.initial);
        assert_eq!(model.state(), PhotoListState::PaginationLoading);

        model.complete(t2.seq, Ok(items("b", 20)));
        assert_eq!(model.photos().len(), 40);

        let t3 = model.begin_next_page().expect("should issue page 3");
        assert_eq!(t3.page, 3);
    }

    #[test]
    fn test_empty_page_exhausts_query() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(items("a", 20)));

        let t2 = model.begin_next_page().unwrap();
        model.complete(t2.seq, Ok(vec![]));
        assert_eq!(model.pagination(), &PaginationStatus::Exhausted);
        assert_eq!(model.state(), PhotoListState::Success(items("a", 20)));

        assert!(model.begin_next_page().is_none());
    }

    #[test]
    fn test_next_page_noop_while_fetching_or_before_success() {
        let mut model = PhotoListModel::new();
        assert!(model.begin_next_page().is_none());

        let t1 = model.begin_search("cat".into());
        // Still loading page 1
        assert!(model.begin_next_page().is_none());
        model.complete(t1.seq, Ok(items("a", 20)));

        let _t2 = model.begin_next_page().unwrap();
        // Page 2 in flight
        assert!(model.begin_next_page().is_none());
    }

    #[test]
    fn test_first_page_failure_clears_results() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Err("connection refused".into()));
        assert_eq!(
            model.state(),
            PhotoListState::Error("connection refused".into())
        );
        assert!(model.photos().is_empty());
    }

    #[test]
    fn test_pagination_failure_preserves_results() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(items("a", 20)));

        let t2 = model.begin_next_page().unwrap();
        model.complete(t2.seq, Err("timeout".into()));
        assert_eq!(model.state(), PhotoListState::PaginationError("timeout".into()));
        assert_eq!(model.pagination(), &PaginationStatus::Failed("timeout".into()));
        assert_eq!(model.photos().len(), 20);
    }

    #[test]
    fn test_retry_reissues_failed_page_without_duplicates() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(items("a", 20)));

        let t2 = model.begin_next_page().unwrap();
        model.complete(t2.seq, Err("timeout".into()));

        let t3 = model.begin_retry().expect("failed fetch should be retryable");
        assert_eq!(t3.page, 2);
        assert!(!t3.initial);
        assert_eq!(model.state(), PhotoListState::PaginationLoading);

        model.complete(t3.seq, Ok(items("b", 20)));
        assert_eq!(model.photos().len(), 40);
    }

    #[test]
    fn test_retry_noop_without_failure() {
        let mut model = PhotoListModel::new();
        assert!(model.begin_retry().is_none());

        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(items("a", 20)));
        assert!(model.begin_retry().is_none());
    }

    #[test]
    fn test_new_search_supersedes_in_flight_fetch() {
        let mut model = PhotoListModel::new();
        let stale = model.begin_search("cat".into());
        let fresh = model.begin_search("dog".into());

        // The cat result arrives late and must be dropped.
        assert!(!model.complete(stale.seq, Ok(items("cat", 20))));
        assert_eq!(model.state(), PhotoListState::Loading);
        assert!(model.photos().is_empty());

        assert!(model.complete(fresh.seq, Ok(items("dog", 5))));
        assert_eq!(model.state(), PhotoListState::Success(items("dog", 5)));
    }

    #[test]
    fn test_new_search_resets_exhaustion() {
        let mut model = PhotoListModel::new();
        let t1 = model.begin_search("cat".into());
        model.complete(t1.seq, Ok(vec![]));
        assert_eq!(model.pagination(), &PaginationStatus::Exhausted);

        let t2 = model.begin_search("dog".into());
        assert_eq!(model.pagination(), &PaginationStatus::Idle);
        model.complete(t2.seq, Ok(items("dog", 20)));
        assert!(model.begin_next_page().is_some());
    }
}
