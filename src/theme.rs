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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the dark and light palettes, remembers which one the
//! user picked, and provides utilities for converting colors between
//! Ratatui's internal representation and the hexadecimal strings used for
//! terminal emulator styling.

use ratatui::style::Color;
use tracing::warn;

use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Anything other than `"light"`, including nothing at all, is dark.
    pub(crate) fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub(crate) fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(THEME_KEY) {
            Ok(value) => Self::from_preference(value.as_deref()),
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                ThemeMode::Dark
            }
        }
    }

    pub(crate) fn save(self, storage: &dyn KeyValueStore) {
        if let Err(e) = storage.set(THEME_KEY, self.as_str()) {
            warn!(error = %e, "Failed to save theme preference");
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) foreground_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) indicator_on_colour: Color,
    pub(crate) indicator_off_colour: Color,

    pub(crate) table_index_fg: Color,
    pub(crate) table_track_fg: Color,
    pub(crate) table_favourite_fg: Color,
    pub(crate) table_current_fg: Color,
    pub(crate) table_highlight_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub(crate) const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub(crate) const fn dark() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            foreground_colour: Color::Rgb(255, 255, 255),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(50, 30, 60),
            commander_colour: Color::Rgb(255, 255, 255),
            error_colour: Color::Rgb(255, 99, 99),

            indicator_on_colour: Color::Rgb(79, 70, 229),
            indicator_off_colour: Color::Rgb(102, 102, 102),

            table_index_fg: Color::Rgb(162, 161, 166),
            table_track_fg: Color::Rgb(255, 255, 255),
            table_favourite_fg: Color::Rgb(255, 82, 82),
            table_current_fg: Color::Rgb(250, 189, 47),
            table_highlight_bg: Color::Rgb(79, 70, 229),
        }
    }

    pub(crate) const fn light() -> Self {
        Self {
            background_colour: Color::Rgb(245, 245, 250),
            foreground_colour: Color::Rgb(30, 30, 40),
            accent_colour: Color::Rgb(79, 70, 229),
            border_colour: Color::Rgb(180, 180, 190),
            gauge_track_colour: Color::Rgb(225, 225, 235),
            commander_colour: Color::Rgb(30, 30, 40),
            error_colour: Color::Rgb(200, 30, 30),

            indicator_on_colour: Color::Rgb(79, 70, 229),
            indicator_off_colour: Color::Rgb(180, 180, 190),

            table_index_fg: Color::Rgb(110, 110, 120),
            table_track_fg: Color::Rgb(30, 30, 40),
            table_favourite_fg: Color::Rgb(220, 38, 38),
            table_current_fg: Color::Rgb(79, 70, 229),
            table_highlight_bg: Color::Rgb(199, 210, 254),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Non-RGB colours have no fixed value and map to
    /// `None`.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}
