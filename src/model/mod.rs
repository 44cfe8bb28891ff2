//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (photo items, screen state, UI state)
//! - `list`: Photo list state machine (query, pages, results, pagination)
//! - `flickr`: Flickr API client and the `PhotoRepository` trait

mod flickr;
mod list;
mod types;

pub use types::{PaginationStatus, PhotoItem, PhotoListState, UiState};

pub use list::{FetchTicket, PhotoListModel};

pub use flickr::{FlickrClient, PhotoRepository};
