//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//!
//! - `content`: Search bar, photo grid, status panels, pagination footer

mod content;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PhotoItem, PhotoListState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        list_state: &PhotoListState,
        photos: &[PhotoItem],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Photo grid / status panel
                Constraint::Length(3), // Pagination widget + key help
            ])
            .split(frame.area());

        content::render_search_bar(frame, chunks[0], ui_state);
        content::render_content(frame, chunks[1], ui_state, list_state, photos);
        content::render_footer(frame, chunks[2], list_state);
    }

    /// Grid column count for a terminal width: 2 columns on a narrow
    /// terminal, 4 on a wide one.
    pub fn grid_columns(width: u16) -> usize {
        if width >= 120 { 4 } else { 2 }
    }
}
