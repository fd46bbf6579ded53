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

//! Error taxonomy for the playlist and playback layers.
//!
//! Everything below the terminal front-end reports failures as a
//! [`PlayerError`]. The application shell wraps these with `anyhow` context
//! where it needs to bail out.

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    /// An index did not come from the current enumeration of the playlist.
    #[error("track index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// The audio output refused the selected track.
    #[error("cannot play '{locator}': {reason}")]
    PlaybackSource { locator: String, reason: String },

    /// The audio output has gone away (worker thread stopped, and so on).
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// The persisted playlist could not be decoded.
    #[error("persisted playlist is malformed")]
    CorruptState(#[from] serde_json::Error),

    #[error("storage failure")]
    Storage(#[from] rusqlite::Error),
}

pub(crate) type PlayerResult<T> = Result<T, PlayerError>;
