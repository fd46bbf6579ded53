// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Input handling for the playlist table.
//!
//! This module maps raw terminal keyboard events to table navigation, filter
//! editing and the actions the table reports back to the application.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::{TrackList, TrackListAction},
    model::Track,
};

impl TrackList {
    /// Handles a terminal event. Returns `None` if the table does not use
    /// the key, leaving it to the global bindings.
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        tracks: &[Track],
    ) -> Option<TrackListAction> {
        let Event::Key(key_event) = event else {
            return None;
        };
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if self.is_filtering() {
            match key_event.code {
                KeyCode::Esc => self.clear_filter(),
                KeyCode::Enter => self.filtering = false,
                _ => {
                    self.filter.handle_event(event);
                    self.table_state.select(None);
                    self.sync_selection(self.visible_rows(tracks).len());
                }
            }
            return Some(TrackListAction::Handled);
        }

        let row_count = self.visible_rows(tracks).len();

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(row_count),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(row_count),
            KeyCode::Char('g') | KeyCode::Home => self.goto_first(row_count),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(row_count),

            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Esc if !self.filter.value().is_empty() => {
                self.clear_filter();
                self.sync_selection(tracks.len());
            }

            KeyCode::Enter => {
                return self
                    .selected_index(tracks)
                    .map(TrackListAction::Activate)
                    .or(Some(TrackListAction::Handled));
            }
            KeyCode::Char('f') => {
                return self
                    .selected_index(tracks)
                    .map(TrackListAction::ToggleFavourite)
                    .or(Some(TrackListAction::Handled));
            }

            _ => return None,
        }

        Some(TrackListAction::Handled)
    }
}
