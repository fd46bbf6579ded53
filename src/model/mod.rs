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

//! Core data model.
//!
//! A [`Track`] is the only record the player keeps. Its display name and
//! audio locator are fixed when the track is created; the favourite flag is
//! the only thing a user can change afterwards.

pub(crate) mod playlist;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Track {
    name: String,
    source: String,
    cover_image: String,
    favorite: bool,
}

impl Track {
    pub(crate) fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        cover_image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            cover_image: cover_image.into(),
            favorite: false,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn cover_image(&self) -> &str {
        &self.cover_image
    }

    pub(crate) fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub(crate) fn toggle_favorite(&mut self) {
        self.favorite = !self.favorite;
    }
}

/// A file the user asked to add to the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddedFile {
    pub(crate) name: String,
    pub(crate) source: String,
}

/// The built-in playlist used when nothing (or nothing readable) has been
/// saved yet.
pub(crate) fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("Song 1", "music/song1.mp3", "images/cover1.jpg"),
        Track::new("Song 2", "music/song2.mp3", "images/cover2.jpg"),
        Track::new("Song 3", "music/song3.mp3", "images/cover3.jpg"),
    ]
}
