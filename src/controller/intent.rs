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

//! User and output intents consumed by the playback controller.
//!
//! The terminal front-end and the audio worker never touch controller state
//! directly. They describe what happened as a [`PlayerIntent`] and hand it to
//! [`PlaybackController::dispatch`].

use tracing::{debug, warn};

use crate::{
    controller::{Direction, PlaybackController},
    error::{PlayerError, PlayerResult},
    model::AddedFile,
    presenter::Presenter,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransportAction {
    Play,
    Pause,
    PlayPause,
    Next,
    Prev,
    Shuffle,
    Repeat,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PlayerIntent {
    TrackClicked(usize),
    FavoriteClicked(usize),
    Transport(TransportAction),
    /// Absolute seek, as a fraction of the track.
    SeekRequested(f64),
    /// Relative seek, as a fraction of the track.
    SeekBy(f64),
    VolumeChanged(f64),
    VolumeBy(f64),
    FilesAdded(Vec<AddedFile>),
    TrackEnded,
    ProgressTick { current: f64, total: f64 },
    PlaybackFailed(String),
}

impl<P: Presenter> PlaybackController<P> {
    /// Applies an intent. Failures have already been surfaced to the
    /// presenter where the user needs to see them, so they are only logged
    /// here.
    pub(crate) fn dispatch(&mut self, intent: PlayerIntent) {
        debug!(?intent, "Dispatching");

        let result = match intent {
            PlayerIntent::TrackClicked(index) => self.select_track(index),
            PlayerIntent::FavoriteClicked(index) => self.toggle_favorite(index).map(|_| ()),
            PlayerIntent::Transport(action) => self.transport(action),
            PlayerIntent::SeekRequested(fraction) => {
                self.seek(fraction);
                Ok(())
            }
            PlayerIntent::SeekBy(delta) => {
                self.seek_by(delta);
                Ok(())
            }
            PlayerIntent::VolumeChanged(level) => {
                self.set_volume(level);
                Ok(())
            }
            PlayerIntent::VolumeBy(delta) => {
                self.adjust_volume(delta);
                Ok(())
            }
            PlayerIntent::FilesAdded(files) => {
                self.add_files(files);
                Ok(())
            }
            PlayerIntent::TrackEnded => self.on_track_ended(),
            PlayerIntent::ProgressTick { current, total } => {
                self.on_progress_tick(current, total);
                Ok(())
            }
            PlayerIntent::PlaybackFailed(reason) => {
                self.on_playback_error(&reason);
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(e @ PlayerError::IndexOutOfRange { .. }) => {
                warn!(error = %e, "Ignoring intent with stale index");
            }
            Err(e) => debug!(error = %e, "Intent not applied"),
        }
    }

    fn transport(&mut self, action: TransportAction) -> PlayerResult<()> {
        let is_playing = self.state().is_playing;

        match action {
            TransportAction::Play if is_playing => Ok(()),
            TransportAction::Pause if !is_playing => Ok(()),
            TransportAction::Play | TransportAction::Pause | TransportAction::PlayPause => {
                self.toggle_play_pause()
            }
            TransportAction::Next => self.advance(Direction::Next),
            TransportAction::Prev => self.advance(Direction::Previous),
            TransportAction::Shuffle => {
                self.toggle_shuffle();
                Ok(())
            }
            TransportAction::Repeat => {
                self.toggle_repeat();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{OutputCall, controller};

    #[test]
    fn play_and_pause_are_idempotent() {
        let (mut controller, output) = controller(3);

        controller.dispatch(PlayerIntent::Transport(TransportAction::Play));
        controller.dispatch(PlayerIntent::Transport(TransportAction::Play));
        assert!(controller.state().is_playing);

        controller.dispatch(PlayerIntent::Transport(TransportAction::Pause));
        controller.dispatch(PlayerIntent::Transport(TransportAction::Pause));
        assert!(!controller.state().is_playing);

        assert_eq!(output.take_calls(), vec![OutputCall::Play, OutputCall::Pause]);
    }

    #[test]
    fn transport_buttons_route_to_controller() {
        let (mut controller, _) = controller(3);

        controller.dispatch(PlayerIntent::Transport(TransportAction::Prev));
        assert_eq!(controller.state().current_index, 2);

        controller.dispatch(PlayerIntent::Transport(TransportAction::Next));
        assert_eq!(controller.state().current_index, 0);

        controller.dispatch(PlayerIntent::Transport(TransportAction::Shuffle));
        controller.dispatch(PlayerIntent::Transport(TransportAction::Repeat));
        assert!(controller.state().is_shuffle);
        assert!(controller.state().is_repeat);

        controller.dispatch(PlayerIntent::Transport(TransportAction::PlayPause));
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn stale_indices_are_ignored() {
        let (mut controller, output) = controller(3);

        controller.dispatch(PlayerIntent::TrackClicked(9));
        controller.dispatch(PlayerIntent::FavoriteClicked(9));

        assert_eq!(controller.state().current_index, 0);
        assert!(output.take_calls().is_empty());
    }

    #[test]
    fn track_ended_and_progress_are_routed() {
        let (mut controller, _) = controller(3);

        controller.dispatch(PlayerIntent::ProgressTick {
            current: 30.0,
            total: 120.0,
        });
        assert_eq!(controller.presenter().total_seconds, 120.0);

        controller.dispatch(PlayerIntent::SeekRequested(0.5));
        assert_eq!(controller.presenter().current_seconds, 60.0);

        controller.dispatch(PlayerIntent::TrackEnded);
        assert_eq!(controller.state().current_index, 1);
        assert!(controller.state().is_playing);
    }

    #[test]
    fn files_and_volume_are_routed() {
        let (mut controller, _) = controller(3);

        controller.dispatch(PlayerIntent::FilesAdded(vec![AddedFile {
            name: "x.mp3".into(),
            source: "/music/x.mp3".into(),
        }]));
        controller.dispatch(PlayerIntent::VolumeChanged(1.7));

        assert_eq!(controller.playlist().len(), 4);
        assert_eq!(controller.presenter().volume, 1.0);
    }

    #[test]
    fn playback_failure_is_routed() {
        let (mut controller, _) = controller(3);
        controller.dispatch(PlayerIntent::TrackClicked(0));

        controller.dispatch(PlayerIntent::PlaybackFailed("boom".into()));

        assert!(!controller.state().is_playing);
        assert!(controller.presenter().error.is_some());
    }
}
