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

//! Playback controller.
//!
//! Owns the transport state (current index, playing, shuffle, repeat) and
//! the playlist store. Every command is a synchronous state transition that
//! ends by telling the [`Presenter`] what changed and the [`AudioOutput`]
//! what to do.
//!
//! # Transport rules
//!
//! * **Previous** always steps back one track, wrapping from the first to the
//!   last. Shuffle does not apply.
//! * **Next** draws a uniformly random index when shuffle is on (the current
//!   track may come up again), otherwise steps forward with wrap-around.
//! * Moving to another track always starts playback, whatever the previous
//!   state was.
//! * When a track ends naturally it is replayed from the start if repeat is
//!   on, otherwise the controller behaves as if **Next** was pressed.
//!
//! Commands against an empty playlist do nothing. A track the output cannot
//! play leaves the controller paused on that track with the failure shown;
//! it never skips ahead on its own.

pub(crate) mod intent;

use rand::{rng, seq::IteratorRandom};
use tracing::{debug, info, warn};

use crate::{
    error::{PlayerError, PlayerResult},
    model::{AddedFile, playlist::PlaylistStore},
    player::AudioOutput,
    presenter::Presenter,
};

const DEFAULT_COVER: &str = "images/cover1.jpg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Next,
    Previous,
}

/// Transport state. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PlaybackState {
    /// Only meaningful while the playlist is non-empty.
    pub(crate) current_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) is_shuffle: bool,
    pub(crate) is_repeat: bool,
}

/// Source of shuffled track indices.
pub(crate) trait IndexPicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Default)]
pub(crate) struct RandomPicker;

impl IndexPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        (0..len).choose(&mut rng()).unwrap_or(0)
    }
}

/// Maps a requested seek fraction onto the current track.
///
/// An unknown or zero duration, or a fraction that is not a finite number,
/// always maps to the start of the track.
pub(crate) fn seek_position(fraction: f64, duration: f64) -> f64 {
    if !fraction.is_finite() || !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }

    fraction.clamp(0.0, 1.0) * duration
}

/// Clamps a volume level into `0.0..=1.0`, treating NaN as silence.
pub(crate) fn clamp_volume(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

// Progress values from the output may be NaN or infinite before a source has
// been probed.
fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

pub(crate) struct PlaybackController<P: Presenter> {
    playlist: PlaylistStore,
    state: PlaybackState,
    position: f64,
    duration: f64,
    volume: f64,
    default_cover: String,
    output: Box<dyn AudioOutput>,
    presenter: P,
    picker: Box<dyn IndexPicker>,
}

impl<P: Presenter> PlaybackController<P> {
    pub(crate) fn new(playlist: PlaylistStore, output: Box<dyn AudioOutput>, presenter: P) -> Self {
        Self {
            playlist,
            state: PlaybackState::default(),
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            default_cover: DEFAULT_COVER.to_string(),
            output,
            presenter,
            picker: Box::new(RandomPicker),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_picker(mut self, picker: Box<dyn IndexPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Cover image given to files added through [`Self::add_files`].
    pub(crate) fn with_default_cover(mut self, cover: impl Into<String>) -> Self {
        self.default_cover = cover.into();
        self
    }

    pub(crate) fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Pushes the initial state to the presenter and loads the first track
    /// without starting it.
    pub(crate) fn start(&mut self, volume: f64) {
        self.set_volume(volume);
        self.presenter.set_shuffle_indicator(self.state.is_shuffle);
        self.presenter.set_repeat_indicator(self.state.is_repeat);
        self.presenter.set_transport_glyph(false);
        self.render_list();

        if !self.playlist.is_empty() {
            if let Err(e) = self.load_current() {
                self.report_failure(&e);
            }
        }
    }

    /// Jumps to the track at `index` and starts it.
    ///
    /// # Errors
    ///
    /// * [`PlayerError::IndexOutOfRange`] if `index` does not name a track;
    ///   nothing changes.
    /// * Any output failure, after it has been shown to the user. The
    ///   controller stays paused on the selected track.
    pub(crate) fn select_track(&mut self, index: usize) -> PlayerResult<()> {
        let len = self.playlist.len();
        if index >= len {
            return Err(PlayerError::IndexOutOfRange { index, len });
        }

        self.state.current_index = index;
        self.play_current()
    }

    pub(crate) fn toggle_play_pause(&mut self) -> PlayerResult<()> {
        if self.playlist.is_empty() {
            debug!("Ignoring play/pause on empty playlist");
            return Ok(());
        }

        if self.state.is_playing {
            self.pause()
        } else {
            let result = self.play();
            if let Err(e) = &result {
                self.report_failure(e);
            }
            result
        }
    }

    pub(crate) fn advance(&mut self, direction: Direction) -> PlayerResult<()> {
        let len = self.playlist.len();
        if len == 0 {
            debug!(?direction, "Ignoring advance on empty playlist");
            return Ok(());
        }

        let current = self.state.current_index;
        let next = match direction {
            Direction::Previous => (current + len - 1) % len,
            Direction::Next if self.state.is_shuffle => self.picker.pick(len),
            Direction::Next => (current + 1) % len,
        };

        self.select_track(next)
    }

    /// Called when the output reports that the current track played to the
    /// end.
    pub(crate) fn on_track_ended(&mut self) -> PlayerResult<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        if self.state.is_repeat {
            debug!(index = self.state.current_index, "Repeating track");
            self.play_current()
        } else {
            self.advance(Direction::Next)
        }
    }

    pub(crate) fn toggle_shuffle(&mut self) -> bool {
        self.state.is_shuffle = !self.state.is_shuffle;
        self.presenter.set_shuffle_indicator(self.state.is_shuffle);
        self.state.is_shuffle
    }

    pub(crate) fn toggle_repeat(&mut self) -> bool {
        self.state.is_repeat = !self.state.is_repeat;
        self.presenter.set_repeat_indicator(self.state.is_repeat);
        self.state.is_repeat
    }

    /// Seeks to `fraction` of the current track and returns the resulting
    /// position in seconds.
    pub(crate) fn seek(&mut self, fraction: f64) -> f64 {
        if self.playlist.is_empty() {
            debug!(fraction, "Ignoring seek on empty playlist");
            return 0.0;
        }

        let position = seek_position(fraction, self.duration);
        self.position = position;

        if let Err(e) = self.output.seek(position) {
            warn!(error = %e, position, "Seek failed");
        }
        self.presenter.set_progress(position, self.duration);

        position
    }

    /// Seeks relative to the current position, `delta` being a fraction of
    /// the track length.
    pub(crate) fn seek_by(&mut self, delta: f64) -> f64 {
        let current = if self.duration > 0.0 {
            self.position / self.duration
        } else {
            0.0
        };

        self.seek(current + delta)
    }

    /// Sets the output level and returns the level actually applied.
    ///
    /// The level belongs to the output rather than to a track, so it is
    /// applied even when the playlist is empty.
    pub(crate) fn set_volume(&mut self, level: f64) -> f64 {
        let level = clamp_volume(level);
        self.volume = level;

        if let Err(e) = self.output.set_volume(level) {
            warn!(error = %e, level, "Failed to set volume");
        }
        self.presenter.set_volume(level);

        level
    }

    pub(crate) fn adjust_volume(&mut self, delta: f64) -> f64 {
        self.set_volume(self.volume + delta)
    }

    pub(crate) fn on_progress_tick(&mut self, current_seconds: f64, total_seconds: f64) {
        self.position = sanitize_seconds(current_seconds);
        self.duration = sanitize_seconds(total_seconds);
        self.presenter.set_progress(self.position, self.duration);
    }

    /// Called when the output fails asynchronously, after the track was
    /// handed over.
    pub(crate) fn on_playback_error(&mut self, reason: &str) {
        let locator = self
            .playlist
            .get(self.state.current_index)
            .map(|track| track.source().to_string())
            .unwrap_or_default();

        self.report_failure(&PlayerError::PlaybackSource {
            locator,
            reason: reason.to_string(),
        });
    }

    pub(crate) fn toggle_favorite(&mut self, index: usize) -> PlayerResult<bool> {
        let favorite = self.playlist.toggle_favorite(index)?;

        self.render_list();
        if index == self.state.current_index {
            if let Some(track) = self.playlist.get(index) {
                self.presenter.set_now_playing(track);
            }
        }

        Ok(favorite)
    }

    /// Appends files to the playlist. If the playlist was empty the first new
    /// track is loaded, ready to play.
    pub(crate) fn add_files(&mut self, files: Vec<AddedFile>) {
        if files.is_empty() {
            return;
        }

        let was_empty = self.playlist.is_empty();
        let count = files.len();
        match <[AddedFile; 1]>::try_from(files) {
            Ok([file]) => {
                self.playlist.add_track(&file.name, &file.source, &self.default_cover);
            }
            Err(files) => self.playlist.add_files(files, &self.default_cover),
        }
        info!(count, total = self.playlist.len(), "Added files to playlist");

        self.render_list();

        if was_empty {
            self.state.current_index = 0;
            if let Err(e) = self.load_current() {
                self.report_failure(&e);
            }
        }
    }

    fn current_index(&self) -> Option<usize> {
        (!self.playlist.is_empty()).then_some(self.state.current_index)
    }

    fn render_list(&mut self) {
        let current = self.current_index();
        self.presenter.render_list(self.playlist.tracks(), current);
    }

    fn load_current(&mut self) -> PlayerResult<()> {
        let index = self.state.current_index;
        let track = self
            .playlist
            .get(index)
            .cloned()
            .ok_or_else(|| PlayerError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            })?;

        self.position = 0.0;
        self.duration = 0.0;
        self.presenter.set_now_playing(&track);
        self.presenter.set_progress(0.0, 0.0);
        self.render_list();

        self.output.load(track.source())?;
        self.presenter.clear_error();
        debug!(index, name = track.name(), "Loaded track");

        Ok(())
    }

    fn play_current(&mut self) -> PlayerResult<()> {
        let result = self.load_current().and_then(|_| self.play());
        if let Err(e) = &result {
            self.report_failure(e);
        }
        result
    }

    fn play(&mut self) -> PlayerResult<()> {
        self.output.play()?;
        self.state.is_playing = true;
        self.presenter.set_transport_glyph(true);
        Ok(())
    }

    fn pause(&mut self) -> PlayerResult<()> {
        self.state.is_playing = false;
        self.presenter.set_transport_glyph(false);
        self.output.pause()
    }

    fn report_failure(&mut self, error: &PlayerError) {
        warn!(error = %error, index = self.state.current_index, "Playback failed");

        self.state.is_playing = false;
        let _ = self.output.pause();
        self.presenter.set_transport_glyph(false);
        self.presenter.show_error(&error.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::HashSet,
        rc::Rc,
    };

    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        model::Track,
        presenter::ViewModel,
        storage::{MemoryStore, PLAYLIST_KEY},
    };

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum OutputCall {
        Load(String),
        Play,
        Pause,
        Seek(f64),
        Volume(f64),
    }

    /// Records every command and refuses sources listed in `broken`.
    #[derive(Clone, Default)]
    pub(crate) struct FakeOutput {
        pub(crate) calls: Rc<RefCell<Vec<OutputCall>>>,
        pub(crate) broken: Rc<RefCell<HashSet<String>>>,
        /// Makes `seek` and `set_volume` fail.
        pub(crate) refuse_controls: Rc<Cell<bool>>,
    }

    impl FakeOutput {
        pub(crate) fn take_calls(&self) -> Vec<OutputCall> {
            self.calls.borrow_mut().drain(..).collect()
        }

        fn check_controls(&self) -> PlayerResult<()> {
            if self.refuse_controls.get() {
                return Err(PlayerError::OutputUnavailable("property unavailable".to_string()));
            }
            Ok(())
        }
    }

    impl AudioOutput for FakeOutput {
        fn load(&mut self, source: &str) -> PlayerResult<()> {
            self.calls.borrow_mut().push(OutputCall::Load(source.to_string()));
            if self.broken.borrow().contains(source) {
                return Err(PlayerError::PlaybackSource {
                    locator: source.to_string(),
                    reason: "unsupported format".to_string(),
                });
            }
            Ok(())
        }

        fn play(&mut self) -> PlayerResult<()> {
            self.calls.borrow_mut().push(OutputCall::Play);
            Ok(())
        }

        fn pause(&mut self) -> PlayerResult<()> {
            self.calls.borrow_mut().push(OutputCall::Pause);
            Ok(())
        }

        fn seek(&mut self, seconds: f64) -> PlayerResult<()> {
            self.calls.borrow_mut().push(OutputCall::Seek(seconds));
            self.check_controls()
        }

        fn set_volume(&mut self, level: f64) -> PlayerResult<()> {
            self.calls.borrow_mut().push(OutputCall::Volume(level));
            self.check_controls()
        }
    }

    /// Hands out a fixed sequence of indices.
    struct ScriptedPicker(Vec<usize>);

    impl IndexPicker for ScriptedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0.remove(0)
        }
    }

    pub(crate) fn playlist_of(len: usize) -> PlaylistStore {
        let tracks: Vec<Track> = (0..len)
            .map(|i| Track::new(format!("Track {i}"), format!("blob:{i}"), "cover.jpg"))
            .collect();
        let json = serde_json::to_string(&tracks).unwrap();
        PlaylistStore::load(Rc::new(MemoryStore::with_entry(PLAYLIST_KEY, &json)))
    }

    pub(crate) fn controller(len: usize) -> (PlaybackController<ViewModel>, FakeOutput) {
        let output = FakeOutput::default();
        let mut controller =
            PlaybackController::new(playlist_of(len), Box::new(output.clone()), ViewModel::new());
        controller.start(1.0);
        output.take_calls();
        (controller, output)
    }

    #[test]
    fn start_loads_first_track_paused() {
        let output = FakeOutput::default();
        let mut controller =
            PlaybackController::new(playlist_of(3), Box::new(output.clone()), ViewModel::new());
        controller.start(0.8);

        assert_eq!(
            output.take_calls(),
            vec![OutputCall::Volume(0.8), OutputCall::Load("blob:0".into())]
        );
        assert!(!controller.state().is_playing);
        let view = controller.presenter();
        assert_eq!(view.tracks.len(), 3);
        assert_eq!(view.current_index, Some(0));
        assert_eq!(view.now_playing.as_ref().unwrap().name(), "Track 0");
        assert_eq!(view.volume, 0.8);
    }

    #[test]
    fn start_with_empty_playlist_loads_nothing() {
        let (controller, output) = controller(0);
        assert!(output.take_calls().is_empty());
        assert_eq!(controller.presenter().current_index, None);
        assert!(controller.presenter().now_playing.is_none());
    }

    #[test]
    fn select_track_loads_and_plays() {
        let (mut controller, output) = controller(3);

        controller.select_track(2).unwrap();

        assert_eq!(controller.state().current_index, 2);
        assert!(controller.state().is_playing);
        assert_eq!(
            output.take_calls(),
            vec![OutputCall::Load("blob:2".into()), OutputCall::Play]
        );
        assert!(controller.presenter().is_playing);
        assert_eq!(controller.presenter().current_index, Some(2));
    }

    #[test]
    fn select_track_out_of_range_changes_nothing() {
        let (mut controller, output) = controller(3);

        assert_matches!(
            controller.select_track(3),
            Err(PlayerError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(controller.state(), PlaybackState::default());
        assert!(output.take_calls().is_empty());
    }

    #[test]
    fn toggle_play_pause_alternates() {
        let (mut controller, output) = controller(3);

        controller.toggle_play_pause().unwrap();
        assert!(controller.state().is_playing);
        assert!(controller.presenter().is_playing);

        controller.toggle_play_pause().unwrap();
        assert!(!controller.state().is_playing);
        assert!(!controller.presenter().is_playing);

        assert_eq!(output.take_calls(), vec![OutputCall::Play, OutputCall::Pause]);
    }

    #[test]
    fn previous_then_next_returns_to_start() {
        for len in 1..=5 {
            for start in 0..len {
                let (mut controller, _) = controller(len);
                controller.select_track(start).unwrap();

                controller.advance(Direction::Previous).unwrap();
                controller.advance(Direction::Next).unwrap();

                assert_eq!(controller.state().current_index, start, "len {len}");
            }
        }
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let (mut controller, _) = controller(3);

        controller.select_track(2).unwrap();
        controller.advance(Direction::Next).unwrap();
        assert_eq!(controller.state().current_index, 0);

        controller.advance(Direction::Previous).unwrap();
        assert_eq!(controller.state().current_index, 2);
    }

    #[test]
    fn advance_resumes_playback_when_paused() {
        let (mut controller, output) = controller(3);
        assert!(!controller.state().is_playing);

        controller.advance(Direction::Next).unwrap();

        assert!(controller.state().is_playing);
        assert_eq!(
            output.take_calls(),
            vec![OutputCall::Load("blob:1".into()), OutputCall::Play]
        );
    }

    #[test]
    fn shuffle_next_uses_picker_and_may_repeat_current() {
        let (controller, _) = controller(4);
        let mut controller = controller.with_picker(Box::new(ScriptedPicker(vec![3, 3, 0])));
        controller.toggle_shuffle();

        controller.advance(Direction::Next).unwrap();
        assert_eq!(controller.state().current_index, 3);
        controller.advance(Direction::Next).unwrap();
        assert_eq!(controller.state().current_index, 3);
        controller.advance(Direction::Next).unwrap();
        assert_eq!(controller.state().current_index, 0);
    }

    #[test]
    fn shuffle_does_not_affect_previous() {
        let (controller, _) = controller(3);
        let mut controller = controller.with_picker(Box::new(ScriptedPicker(vec![])));
        controller.toggle_shuffle();

        controller.advance(Direction::Previous).unwrap();
        assert_eq!(controller.state().current_index, 2);
    }

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomPicker;
        for len in 1..10 {
            for _ in 0..20 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn track_ended_with_repeat_replays_current() {
        let (mut controller, output) = controller(3);
        controller.toggle_repeat();

        controller.on_track_ended().unwrap();

        assert_eq!(controller.state().current_index, 0);
        assert!(controller.state().is_playing);
        assert_eq!(
            output.take_calls(),
            vec![OutputCall::Load("blob:0".into()), OutputCall::Play]
        );
        assert_eq!(controller.presenter().current_seconds, 0.0);
    }

    #[test]
    fn track_ended_without_repeat_wraps_to_first() {
        let (mut controller, _) = controller(3);
        controller.select_track(2).unwrap();

        controller.on_track_ended().unwrap();

        assert_eq!(controller.state().current_index, 0);
        assert!(controller.state().is_playing);
    }

    #[test]
    fn empty_playlist_commands_are_no_ops() {
        let (mut controller, output) = controller(0);

        controller.toggle_play_pause().unwrap();
        controller.advance(Direction::Next).unwrap();
        controller.advance(Direction::Previous).unwrap();
        controller.on_track_ended().unwrap();

        assert!(output.take_calls().is_empty());
        assert_eq!(controller.state(), PlaybackState::default());
    }

    #[test]
    fn shuffle_and_repeat_toggles_only_change_flags() {
        let (mut controller, output) = controller(3);

        assert!(controller.toggle_shuffle());
        assert!(controller.toggle_repeat());
        assert!(controller.presenter().shuffle);
        assert!(controller.presenter().repeat);

        assert!(!controller.toggle_shuffle());
        assert!(!controller.presenter().shuffle);

        assert_eq!(controller.state().current_index, 0);
        assert!(!controller.state().is_playing);
        assert!(output.take_calls().is_empty());
    }

    #[test]
    fn seek_with_unknown_duration_goes_to_start() {
        let (mut controller, _) = controller(3);

        for fraction in [0.5, 1.0, -0.3, f64::NAN, f64::INFINITY] {
            assert_eq!(controller.seek(fraction), 0.0);
        }
    }

    #[test]
    fn seek_clamps_to_track_length() {
        let (mut controller, output) = controller(3);
        controller.on_progress_tick(10.0, 200.0);

        assert_eq!(controller.seek(0.25), 50.0);
        assert_eq!(controller.seek(1.5), 200.0);
        assert_eq!(controller.seek(-1.0), 0.0);
        assert_eq!(controller.seek(f64::NAN), 0.0);

        assert_eq!(
            output.take_calls(),
            vec![
                OutputCall::Seek(50.0),
                OutputCall::Seek(200.0),
                OutputCall::Seek(0.0),
                OutputCall::Seek(0.0),
            ]
        );
    }

    #[test]
    fn seek_on_empty_playlist_does_nothing() {
        let (mut controller, output) = controller(0);
        controller.on_progress_tick(10.0, 200.0);

        assert_eq!(controller.seek(0.5), 0.0);
        assert_eq!(controller.seek_by(0.1), 0.0);

        assert!(output.take_calls().is_empty());
    }

    #[test]
    fn volume_applies_without_a_track() {
        let (mut controller, output) = controller(0);
        assert_eq!(controller.set_volume(0.3), 0.3);
        assert_eq!(output.take_calls(), vec![OutputCall::Volume(0.3)]);
    }

    #[test]
    fn refused_seek_and_volume_keep_playing() {
        let (mut controller, output) = controller(3);
        controller.select_track(1).unwrap();
        controller.on_progress_tick(10.0, 200.0);
        output.refuse_controls.set(true);

        controller.seek(0.5);
        controller.set_volume(0.2);

        assert!(controller.state().is_playing);
        assert_eq!(controller.state().current_index, 1);
        assert!(controller.presenter().is_playing);
        assert!(controller.presenter().error.is_none());
        assert_eq!(controller.presenter().volume, 0.2);
    }

    #[test]
    fn seek_by_moves_relative_to_position() {
        let (mut controller, _) = controller(3);
        controller.on_progress_tick(50.0, 200.0);

        assert_eq!(controller.seek_by(0.25), 100.0);
        assert_eq!(controller.seek_by(-0.9), 0.0);
    }

    #[test]
    fn seek_position_normalizes_bad_input() {
        assert_eq!(seek_position(0.5, 0.0), 0.0);
        assert_eq!(seek_position(0.5, f64::NAN), 0.0);
        assert_eq!(seek_position(0.5, f64::INFINITY), 0.0);
        assert_eq!(seek_position(f64::NAN, 100.0), 0.0);
        assert_eq!(seek_position(0.5, 100.0), 50.0);
    }

    #[test]
    fn set_volume_clamps() {
        let (mut controller, output) = controller(3);

        assert_eq!(controller.set_volume(-0.5), 0.0);
        assert_eq!(controller.set_volume(1.7), 1.0);
        assert_eq!(controller.set_volume(f64::NAN), 0.0);
        assert_eq!(controller.set_volume(0.4), 0.4);

        assert_eq!(
            output.take_calls(),
            vec![
                OutputCall::Volume(0.0),
                OutputCall::Volume(1.0),
                OutputCall::Volume(0.0),
                OutputCall::Volume(0.4),
            ]
        );
        assert_eq!(controller.presenter().volume, 0.4);
    }

    #[test]
    fn adjust_volume_is_relative_and_clamped() {
        let (mut controller, _) = controller(3);
        controller.set_volume(0.5);

        assert_eq!(controller.adjust_volume(0.25), 0.75);
        assert_eq!(controller.adjust_volume(1.0), 1.0);
        assert_eq!(controller.adjust_volume(-3.0), 0.0);
    }

    #[test]
    fn progress_tick_normalizes_non_finite_values() {
        let (mut controller, _) = controller(3);

        controller.on_progress_tick(f64::NAN, f64::INFINITY);

        assert_eq!(controller.presenter().current_seconds, 0.0);
        assert_eq!(controller.presenter().total_seconds, 0.0);
    }

    #[test]
    fn unplayable_source_stays_paused_without_skipping() {
        let (mut controller, output) = controller(3);
        output.broken.borrow_mut().insert("blob:1".to_string());
        controller.toggle_play_pause().unwrap();
        output.take_calls();

        assert_matches!(
            controller.select_track(1),
            Err(PlayerError::PlaybackSource { .. })
        );

        assert_eq!(controller.state().current_index, 1);
        assert!(!controller.state().is_playing);
        assert!(!controller.presenter().is_playing);
        assert!(controller.presenter().error.is_some());
        assert_eq!(
            output.take_calls(),
            vec![OutputCall::Load("blob:1".into()), OutputCall::Pause]
        );
    }

    #[test]
    fn successful_load_clears_previous_error() {
        let (mut controller, output) = controller(3);
        output.broken.borrow_mut().insert("blob:1".to_string());

        let _ = controller.select_track(1);
        assert!(controller.presenter().error.is_some());

        controller.advance(Direction::Next).unwrap();
        assert!(controller.presenter().error.is_none());
        assert_eq!(controller.state().current_index, 2);
    }

    #[test]
    fn asynchronous_failure_pauses() {
        let (mut controller, _) = controller(3);
        controller.select_track(1).unwrap();

        controller.on_playback_error("decoder gave up");

        assert!(!controller.state().is_playing);
        assert_eq!(controller.state().current_index, 1);
        let error = controller.presenter().error.as_deref().unwrap();
        assert!(error.contains("blob:1"));
        assert!(error.contains("decoder gave up"));
    }

    #[test]
    fn toggle_favorite_refreshes_list_and_now_playing() {
        let (mut controller, _) = controller(3);

        assert!(controller.toggle_favorite(0).unwrap());
        assert!(controller.presenter().tracks[0].is_favorite());
        assert!(controller.presenter().now_playing.as_ref().unwrap().is_favorite());

        assert!(!controller.toggle_favorite(0).unwrap());
        assert!(!controller.presenter().tracks[0].is_favorite());
    }

    #[test]
    fn toggle_favorite_out_of_range_is_rejected() {
        let (mut controller, _) = controller(3);
        assert_matches!(
            controller.toggle_favorite(7),
            Err(PlayerError::IndexOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn add_files_appends_without_changing_playback() {
        let (mut controller, output) = controller(3);
        controller.select_track(1).unwrap();
        output.take_calls();

        controller.add_files(vec![AddedFile {
            name: "New".into(),
            source: "blob:new".into(),
        }]);

        assert_eq!(controller.playlist().len(), 4);
        let added = controller.playlist().get(3).unwrap();
        assert_eq!(added.name(), "New");
        assert_eq!(added.cover_image(), DEFAULT_COVER);
        assert!(!added.is_favorite());
        assert_eq!(controller.presenter().tracks.len(), 4);
        assert_eq!(controller.state().current_index, 1);
        assert!(controller.state().is_playing);
        assert!(output.take_calls().is_empty());
    }

    #[test]
    fn add_files_to_empty_playlist_loads_first() {
        let (controller, output) = controller(0);
        let mut controller = controller.with_default_cover("images/uploaded.jpg");

        controller.add_files(vec![
            AddedFile { name: "a".into(), source: "blob:a".into() },
            AddedFile { name: "b".into(), source: "blob:b".into() },
        ]);

        assert_eq!(output.take_calls(), vec![OutputCall::Load("blob:a".into())]);
        assert!(!controller.state().is_playing);
        assert_eq!(controller.presenter().current_index, Some(0));
        assert_eq!(
            controller.playlist().get(1).unwrap().cover_image(),
            "images/uploaded.jpg"
        );

        controller.toggle_play_pause().unwrap();
        assert!(controller.state().is_playing);
    }
}
