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

//! Playlist store.
//!
//! Owns the ordered sequence of tracks and mirrors it to durable storage
//! after every mutation. Insertion order is significant and duplicates are
//! allowed.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::{
    error::{PlayerError, PlayerResult},
    model::{AddedFile, Track, default_tracks},
    storage::{KeyValueStore, PLAYLIST_KEY},
};

pub(crate) struct PlaylistStore {
    tracks: Vec<Track>,
    storage: Rc<dyn KeyValueStore>,
}

impl PlaylistStore {
    /// Restores the saved playlist, or the built-in defaults if nothing was
    /// saved or the saved copy cannot be read.
    pub(crate) fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let tracks = match Self::restore(storage.as_ref()) {
            Ok(Some(tracks)) => {
                debug!(count = tracks.len(), "Restored saved playlist");
                tracks
            }
            Ok(None) => {
                info!("No saved playlist, using defaults");
                default_tracks()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable playlist, using defaults");
                default_tracks()
            }
        };

        Self { tracks, storage }
    }

    fn restore(storage: &dyn KeyValueStore) -> PlayerResult<Option<Vec<Track>>> {
        let Some(json) = storage.get(PLAYLIST_KEY)? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&json)?))
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Appends a single track and saves the playlist. Returns the new track's
    /// index.
    pub(crate) fn add_track(&mut self, name: &str, source: &str, cover_image: &str) -> usize {
        self.tracks.push(Track::new(name, source, cover_image));
        self.persist();

        self.tracks.len() - 1
    }

    /// Appends a batch of files, all sharing the same cover, and saves the
    /// playlist once.
    pub(crate) fn add_files(&mut self, files: Vec<AddedFile>, cover_image: &str) {
        if files.is_empty() {
            return;
        }

        self.tracks.extend(
            files
                .into_iter()
                .map(|file| Track::new(file.name, file.source, cover_image)),
        );
        self.persist();
    }

    /// Flips the favourite flag of the track at `index` and saves the
    /// playlist. Returns the new flag.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::IndexOutOfRange`] without touching anything if
    /// `index` does not name a track.
    pub(crate) fn toggle_favorite(&mut self, index: usize) -> PlayerResult<bool> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(PlayerError::IndexOutOfRange { index, len })?;

        track.toggle_favorite();
        let favorite = track.is_favorite();
        self.persist();

        Ok(favorite)
    }

    /// Writes the whole playlist to storage, replacing whatever was there.
    ///
    /// Failures are logged and otherwise ignored; the next mutation will try
    /// again.
    pub(crate) fn persist(&self) {
        let result = serde_json::to_string(&self.tracks)
            .map_err(PlayerError::from)
            .and_then(|json| self.storage.set(PLAYLIST_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to save playlist");
        }
    }
}
