//! Search bar, photo grid and status rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{PhotoItem, PhotoListState, UiState};

const CELL_HEIGHT: u16 = 3;

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search Flickr ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search, area);
}

pub fn render_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    list_state: &PhotoListState,
    photos: &[PhotoItem],
) {
    match list_state {
        PhotoListState::Idle => {}
        PhotoListState::Loading => {
            let loading = Paragraph::new("Loading photos...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Photos "));
            frame.render_widget(loading, area);
        }
        PhotoListState::Error(message) => {
            let error = Paragraph::new(vec![
                Line::from(message.as_str()),
                Line::from(""),
                Line::from("Press Ctrl-R to retry"),
            ])
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Photos "));
            frame.render_widget(error, area);
        }
        // The grid stays visible while the next page loads or has failed;
        // only the footer widget changes.
        PhotoListState::Success(_)
        | PhotoListState::PaginationLoading
        | PhotoListState::PaginationError(_) => {
            render_photo_grid(frame, area, photos, ui_state);
        }
    }
}

fn render_photo_grid(frame: &mut Frame, area: Rect, photos: &[PhotoItem], ui_state: &UiState) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Photos ({}) ", photos.len()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if photos.is_empty() {
        let empty = Paragraph::new("No photos found")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let columns = ui_state.columns.max(1);
    let selected = ui_state.selected.min(photos.len() - 1);
    let visible_rows = (inner.height / CELL_HEIGHT).max(1) as usize;

    // Scroll so the selected row is always in view.
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let cell_width = inner.width / columns as u16;
    if cell_width == 0 {
        return;
    }

    for row in 0..visible_rows {
        for col in 0..columns {
            let index = (first_row + row) * columns + col;
            let Some(photo) = photos.get(index) else {
                continue;
            };

            // Clamp to the grid area so a cramped terminal never pushes a
            // cell outside the frame buffer.
            let cell = Rect {
                x: inner.x + col as u16 * cell_width,
                y: inner.y + row as u16 * CELL_HEIGHT,
                width: cell_width,
                height: CELL_HEIGHT,
            }
            .intersection(inner);
            if cell.is_empty() {
                continue;
            }

            let style = if index == selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let title = if photo.title.is_empty() {
                "(untitled)"
            } else {
                &photo.title
            };

            let widget = Paragraph::new(vec![Line::from(title).style(style)])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(style)
                        .title(format!(" {} ", photo.id)),
                );
            frame.render_widget(widget, cell);
        }
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, list_state: &PhotoListState) {
    let (text, style) = match list_state {
        PhotoListState::PaginationLoading => (
            "Loading more...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        PhotoListState::PaginationError(message) => (
            format!("{} | Ctrl-R to retry", message),
            Style::default().fg(Color::Red),
        ),
        _ => (
            "Type to search | Arrows move | Ctrl-R retry | Ctrl-Q quit".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let footer = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
