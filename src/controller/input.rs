//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ListController;

impl ListController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'q' | 'Q' => {
                    self.ui.lock().await.should_quit = true;
                }
                'r' | 'R' => {
                    self.retry().await;
                }
                _ => {}
            },
            // Every printable key edits the query; the debounce in
            // set_query decides when a fetch actually goes out.
            KeyCode::Char(c) => {
                let text = {
                    let mut ui = self.ui.lock().await;
                    ui.search_query.push(c);
                    ui.selected = 0;
                    ui.search_query.clone()
                };
                self.set_query(text);
            }
            KeyCode::Backspace => {
                let text = {
                    let mut ui = self.ui.lock().await;
                    ui.search_query.pop();
                    ui.selected = 0;
                    ui.search_query.clone()
                };
                self.set_query(text);
            }
            KeyCode::Esc => {
                {
                    let mut ui = self.ui.lock().await;
                    ui.search_query.clear();
                    ui.selected = 0;
                }
                self.set_query(String::new());
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.move_selection(key.code).await;
            }
            _ => {}
        }

        Ok(())
    }

    async fn move_selection(&self, code: KeyCode) {
        let len = self.current_results().await.len();
        if len == 0 {
            return;
        }

        let mut ui = self.ui.lock().await;
        let columns = ui.columns.max(1);
        let selected = ui.selected.min(len - 1);
        ui.selected = match code {
            KeyCode::Up => selected.saturating_sub(columns),
            KeyCode::Down => (selected + columns).min(len - 1),
            KeyCode::Left => selected.saturating_sub(1),
            KeyCode::Right => (selected + 1).min(len - 1),
            _ => selected,
        };

        // Cursor reached the last loaded row: ask for the next page.
        // load_next_page gates itself, so spamming the bottom row while a
        // page is already fetching (or the query is exhausted) does nothing.
        let near_end = ui.selected + columns >= len;
        drop(ui);
        if near_end {
            self.load_next_page().await;
        }
    }
}
