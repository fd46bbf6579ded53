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

//! Audio output.
//!
//! The playback controller never decodes audio itself. It drives an
//! [`AudioOutput`], which stands in for the host media element: load a
//! source, start, pause, seek and set the volume.
//!
//! Two outputs are provided:
//!
//! * [`MpvOutput`] (feature `mpv`) hands everything to a background `libmpv`
//!   worker and reports progress, natural track completion and playback
//!   failures back to the main event loop as [`AppEvent`]s.
//! * [`SilentOutput`] accepts commands without producing sound. It is used
//!   when the crate is built without an audio backend.
//!
//! [`AppEvent`]: crate::actions::events::AppEvent

#[cfg(feature = "mpv")]
mod libmpv;
mod silent;

#[cfg(feature = "mpv")]
pub(crate) use libmpv::MpvOutput;
pub(crate) use silent::SilentOutput;

use crate::error::PlayerResult;

/// Commands the playback controller issues to the audio layer.
///
/// Implementations are expected to return quickly; anything slow happens on
/// a worker and is reported asynchronously.
pub(crate) trait AudioOutput {
    /// Replaces the current source without starting playback.
    fn load(&mut self, source: &str) -> PlayerResult<()>;

    fn play(&mut self) -> PlayerResult<()>;

    fn pause(&mut self) -> PlayerResult<()>;

    /// Moves the play head to an absolute position in seconds.
    fn seek(&mut self, seconds: f64) -> PlayerResult<()>;

    /// Sets the output level, `0.0` (silent) to `1.0` (full).
    fn set_volume(&mut self, level: f64) -> PlayerResult<()>;
}
