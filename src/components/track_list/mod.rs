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

//! Interactive playlist table and text filter.
//!
//! The filter only changes which rows are displayed. Every action the table
//! emits carries the track's index in the full playlist, never its row
//! number, so the controller is unaffected by filtering.

mod event;
mod render;

use ratatui::widgets::TableState;
use tui_input::Input;

use crate::model::Track;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TrackListAction {
    /// Play the track at this playlist index.
    Activate(usize),
    ToggleFavourite(usize),
    /// The key was consumed by the table itself (navigation, filter input).
    Handled,
}

pub(crate) struct TrackList {
    pub(crate) table_state: TableState,
    pub(crate) filter: Input,
    filtering: bool,
}

impl TrackList {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::new(),
            filter: Input::default(),
            filtering: false,
        }
    }

    /// `true` while keystrokes are going into the filter box.
    pub(crate) fn is_filtering(&self) -> bool {
        self.filtering
    }

    /// Playlist indices of the tracks whose name contains the filter text,
    /// ignoring case.
    pub(crate) fn visible_rows(&self, tracks: &[Track]) -> Vec<usize> {
        let needle = self.filter.value().to_lowercase();

        tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| track.name().to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }

    /// Playlist index of the row under the cursor.
    pub(crate) fn selected_index(&self, tracks: &[Track]) -> Option<usize> {
        let rows = self.visible_rows(tracks);
        self.table_state
            .selected()
            .and_then(|row| rows.get(row).copied())
    }

    /// Keeps the cursor on a visible row after the list or filter changed.
    pub(crate) fn sync_selection(&mut self, row_count: usize) {
        match self.table_state.selected() {
            _ if row_count == 0 => self.table_state.select(None),
            Some(row) if row < row_count => {}
            Some(_) => self.table_state.select(Some(row_count - 1)),
            None => self.table_state.select(Some(0)),
        }
    }

    fn goto_next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let row = match self.table_state.selected() {
            Some(row) if row + 1 < row_count => row + 1,
            _ => 0,
        };
        self.table_state.select(Some(row));
    }

    fn goto_previous(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let row = match self.table_state.selected() {
            Some(0) | None => row_count - 1,
            Some(row) => row - 1,
        };
        self.table_state.select(Some(row));
    }

    fn goto_first(&mut self, row_count: usize) {
        if row_count > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, row_count: usize) {
        if row_count > 0 {
            self.table_state.select(Some(row_count - 1));
        }
    }

    fn clear_filter(&mut self) {
        self.filter.reset();
        self.filtering = false;
    }
}
