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

//! Presentation contract.
//!
//! The playback controller pushes every visible change through the
//! [`Presenter`] trait and never reads anything back. [`ViewModel`] is the
//! terminal implementation: it keeps a snapshot of whatever it was last told
//! so the renderer can draw from it on the next frame.

use crate::model::Track;

pub(crate) trait Presenter {
    /// Replaces the displayed list. `current_index` is `None` for an empty
    /// playlist.
    fn render_list(&mut self, tracks: &[Track], current_index: Option<usize>);

    fn set_now_playing(&mut self, track: &Track);

    /// `true` shows the pause affordance and starts the cover animation.
    fn set_transport_glyph(&mut self, is_playing: bool);

    fn set_shuffle_indicator(&mut self, on: bool);

    fn set_repeat_indicator(&mut self, on: bool);

    fn set_progress(&mut self, current_seconds: f64, total_seconds: f64);

    fn set_volume(&mut self, level: f64);

    /// Shows a user-visible failure. Cleared by the next successful load.
    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);
}

#[derive(Debug, Default)]
pub(crate) struct ViewModel {
    pub(crate) tracks: Vec<Track>,
    pub(crate) current_index: Option<usize>,
    pub(crate) now_playing: Option<Track>,
    pub(crate) is_playing: bool,
    pub(crate) shuffle: bool,
    pub(crate) repeat: bool,
    pub(crate) current_seconds: f64,
    pub(crate) total_seconds: f64,
    pub(crate) volume: f64,
    pub(crate) error: Option<String>,
}

impl ViewModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fraction of the current track played, `0.0` while the duration is
    /// unknown.
    pub(crate) fn progress_ratio(&self) -> f64 {
        if self.total_seconds > 0.0 {
            (self.current_seconds / self.total_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Presenter for ViewModel {
    fn render_list(&mut self, tracks: &[Track], current_index: Option<usize>) {
        self.tracks = tracks.to_vec();
        self.current_index = current_index;
    }

    fn set_now_playing(&mut self, track: &Track) {
        self.now_playing = Some(track.clone());
    }

    fn set_transport_glyph(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
    }

    fn set_shuffle_indicator(&mut self, on: bool) {
        self.shuffle = on;
    }

    fn set_repeat_indicator(&mut self, on: bool) {
        self.repeat = on;
    }

    fn set_progress(&mut self, current_seconds: f64, total_seconds: f64) {
        self.current_seconds = current_seconds;
        self.total_seconds = total_seconds;
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_ratio_with_unknown_duration_is_zero() {
        let mut view = ViewModel::new();
        view.set_progress(12.0, 0.0);
        assert_eq!(view.progress_ratio(), 0.0);
    }

    #[test]
    fn progress_ratio_is_clamped() {
        let mut view = ViewModel::new();
        view.set_progress(30.0, 120.0);
        assert_eq!(view.progress_ratio(), 0.25);
        view.set_progress(130.0, 120.0);
        assert_eq!(view.progress_ratio(), 1.0);
    }

    #[test]
    fn render_list_keeps_a_snapshot() {
        let mut view = ViewModel::new();
        let tracks = vec![Track::new("A", "a.mp3", "a.jpg")];
        view.render_list(&tracks, Some(0));
        assert_eq!(view.tracks, tracks);
        assert_eq!(view.current_index, Some(0));
    }
}
