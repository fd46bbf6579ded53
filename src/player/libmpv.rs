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

//! MPV-backed audio output.
//!
//! Transport commands are forwarded over a channel to a background worker
//! that owns the `libmpv` context. The worker interleaves two loops:
//!
//! 1. **Commands**: drains pending [`OutputCommand`]s from the controller.
//! 2. **Events**: waits briefly for MPV property changes and end-of-file
//!    notifications and turns them into [`AppEvent`]s for the main loop.
//!
//! A command MPV rejects is reported as [`AppEvent::PlaybackFailed`] rather
//! than stopping the worker.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use mpv::Format;
use tracing::{debug, warn};

use crate::{
    actions::events::AppEvent,
    error::{PlayerError, PlayerResult},
    player::AudioOutput,
};

#[derive(Debug)]
enum OutputCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
}

impl OutputCommand {
    /// `true` for the command whose failure means the track cannot be played.
    fn is_source_change(&self) -> bool {
        matches!(self, OutputCommand::Load(_))
    }
}

/// A handle to the MPV worker thread.
pub(crate) struct MpvOutput {
    command_tx: Sender<OutputCommand>,
}

impl MpvOutput {
    /// Spawns the MPV worker and returns a handle to it.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - Channel used to report progress, track completion and
    ///   failures back to the main event loop.
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel();

        spawn_output_worker(command_rx, event_tx);

        Self { command_tx }
    }

    fn send(&self, command: OutputCommand) -> PlayerResult<()> {
        self.command_tx
            .send(command)
            .map_err(|e| PlayerError::OutputUnavailable(e.to_string()))
    }
}

impl AudioOutput for MpvOutput {
    fn load(&mut self, source: &str) -> PlayerResult<()> {
        self.send(OutputCommand::Load(source.to_string()))
    }

    fn play(&mut self) -> PlayerResult<()> {
        self.send(OutputCommand::Play)
    }

    fn pause(&mut self) -> PlayerResult<()> {
        self.send(OutputCommand::Pause)
    }

    fn seek(&mut self, seconds: f64) -> PlayerResult<()> {
        self.send(OutputCommand::Seek(seconds))
    }

    fn set_volume(&mut self, level: f64) -> PlayerResult<()> {
        self.send(OutputCommand::SetVolume(level))
    }
}

/// Spawns the worker thread. If MPV cannot be initialised the failure is
/// broadcast as a fatal application event.
fn spawn_output_worker(command_rx: Receiver<OutputCommand>, event_tx: Sender<AppEvent>) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = output_worker(command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

fn output_worker(command_rx: Receiver<OutputCommand>, event_tx: Sender<AppEvent>) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    let mut duration = 0.0;

    loop {
        if !process_commands(&mut handler, &command_rx, &mut duration, &event_tx)? {
            debug!("Output handle dropped, stopping MPV worker");
            return Ok(());
        }
        process_mpv_events(&mut handler, &mut duration, &event_tx)?;
    }
}

/// Drains and executes pending commands. Returns `false` once the sending
/// side has gone away.
///
/// Only a rejected `Load` is reported to the controller as a playback
/// failure. A transport or property command can be refused while a file is
/// still opening, and the track itself is fine.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<OutputCommand>,
    duration: &mut f64,
    event_tx: &Sender<AppEvent>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        let result = match &command {
            OutputCommand::Load(source) => {
                // The new file's duration arrives later as a property change.
                *duration = 0.0;
                handler
                    .set_property("pause", true)
                    .and_then(|_| handler.command(&["loadfile", source.as_str(), "replace"]))
            }
            OutputCommand::Play => handler.set_property("pause", false),
            OutputCommand::Pause => handler.set_property("pause", true),
            OutputCommand::Seek(seconds) => {
                handler.command(&["seek", &seconds.to_string(), "absolute"])
            }
            OutputCommand::SetVolume(level) => handler.set_property("volume", level * 100.0),
        };

        let Err(e) = result else {
            continue;
        };

        warn!(?command, error = ?e, "MPV rejected command");
        if command.is_source_change() {
            event_tx
                .send(AppEvent::PlaybackFailed(format!("{:?}", e)))
                .context("Failed to send playback failure event")?;
        }
    }
}

/// Waits up to 50ms for an MPV event and forwards anything the controller
/// cares about.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    duration: &mut f64,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let app_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(seconds)) => {
                *duration = seconds;
                None
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                Some(AppEvent::Progress {
                    current: seconds,
                    total: *duration,
                })
            }
            _ => None,
        },
        mpv::Event::EndFile(result) => match result {
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => Some(AppEvent::TrackEnded),
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => {
                Some(AppEvent::PlaybackFailed("MPV could not play the file".to_string()))
            }
            Ok(_) => None,
            Err(e) => Some(AppEvent::PlaybackFailed(format!("{:?}", e))),
        },
        _ => None,
    };

    if let Some(event) = app_event {
        event_tx.send(event).context("Failed to send event")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_load_failures_are_playback_failures() {
        assert!(OutputCommand::Load("blob:1".to_string()).is_source_change());

        for command in [
            OutputCommand::Play,
            OutputCommand::Pause,
            OutputCommand::Seek(12.5),
            OutputCommand::SetVolume(0.4),
        ] {
            assert!(!command.is_source_change(), "{:?}", command);
        }
    }
}
