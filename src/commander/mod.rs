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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line. It owns a text input
//! component and, when a command is submitted, translates it into
//! application events.
//!
//! # Commands
//!
//! | Command | Effect |
//! |---|---|
//! | `add <path>` | Add a file, or every audio file under a directory |
//! | `go <n>` | Play track `n` (as numbered in the list) |
//! | `fav <n>` | Toggle favourite on track `n` |
//! | `play`, `pause`, `p` | Start, pause, toggle |
//! | `next`, `n`, `prev` | Change track |
//! | `shuffle`, `repeat` | Toggle the playback policies |
//! | `vol <0..1>` | Set the volume |
//! | `seek <0..1>` | Seek to a fraction of the track |
//! | `theme [light\|dark]` | Switch theme |
//! | `q`, `quit` | Exit |

use std::{path::Path, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tracing::{debug, warn};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::events::AppEvent,
    controller::intent::{PlayerIntent, TransportAction},
    theme::ThemeMode,
    util::files::discover_files,
};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the event was consumed by the command line.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };
        if key_event.kind == KeyEventKind::Release {
            return false;
        }

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;
                if !buffer.is_empty() {
                    if let Err(e) = self.run_command(&buffer, event_tx) {
                        warn!(command = %buffer, error = %e, "Failed to run command");
                    }
                }
            }

            _ => {
                // Delegate all other keys to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }

    fn run_command(&self, buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
        debug!(command = buffer, "Running command");

        let parts: Vec<&str> = buffer.split_whitespace().collect();
        let intent = |i| AppEvent::Intent(i);
        let transport = |a| AppEvent::Intent(PlayerIntent::Transport(a));

        match parts.as_slice() {
            ["q"] | ["quit"] => event_tx.send(AppEvent::ExitApplication)?,

            ["add", path_parts @ ..] if !path_parts.is_empty() => {
                let path = path_parts.join(" ");
                match discover_files(Path::new(&path)) {
                    Ok(files) if files.is_empty() => {
                        event_tx.send(AppEvent::Status(format!("No audio files in {}", path)))?
                    }
                    Ok(files) => {
                        let count = files.len();
                        event_tx.send(intent(PlayerIntent::FilesAdded(files)))?;
                        event_tx.send(AppEvent::Status(format!("Added {} tracks", count)))?;
                    }
                    Err(e) => event_tx.send(AppEvent::Status(e.to_string()))?,
                }
            }

            ["go", number] => match parse_track_number(number) {
                Some(index) => event_tx.send(intent(PlayerIntent::TrackClicked(index)))?,
                None => event_tx.send(AppEvent::Status(format!("Invalid track: {}", number)))?,
            },
            ["fav", number] => match parse_track_number(number) {
                Some(index) => event_tx.send(intent(PlayerIntent::FavoriteClicked(index)))?,
                None => event_tx.send(AppEvent::Status(format!("Invalid track: {}", number)))?,
            },

            ["play"] => event_tx.send(transport(TransportAction::Play))?,
            ["pause"] => event_tx.send(transport(TransportAction::Pause))?,
            ["p"] => event_tx.send(transport(TransportAction::PlayPause))?,
            ["next"] | ["n"] => event_tx.send(transport(TransportAction::Next))?,
            ["prev"] => event_tx.send(transport(TransportAction::Prev))?,
            ["shuffle"] => event_tx.send(transport(TransportAction::Shuffle))?,
            ["repeat"] => event_tx.send(transport(TransportAction::Repeat))?,

            ["vol", level] => match level.parse::<f64>() {
                Ok(level) => event_tx.send(intent(PlayerIntent::VolumeChanged(level)))?,
                Err(_) => event_tx.send(AppEvent::Status(format!("Invalid volume: {}", level)))?,
            },
            ["seek", fraction] => match fraction.parse::<f64>() {
                Ok(fraction) => event_tx.send(intent(PlayerIntent::SeekRequested(fraction)))?,
                Err(_) => event_tx.send(AppEvent::Status(format!("Invalid position: {}", fraction)))?,
            },

            ["theme"] => event_tx.send(AppEvent::ToggleTheme)?,
            ["theme", "light"] => event_tx.send(AppEvent::SetTheme(ThemeMode::Light))?,
            ["theme", "dark"] => event_tx.send(AppEvent::SetTheme(ThemeMode::Dark))?,

            [] => {}

            [cmd, ..] => event_tx.send(AppEvent::Status(format!("Unknown command: {}", cmd)))?,
        }

        Ok(())
    }
}

// Track numbers on screen start at 1.
fn parse_track_number(number: &str) -> Option<usize> {
    number.parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use assert_matches::assert_matches;
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn submit(text: &str) -> Vec<AppEvent> {
        let (tx, rx): (Sender<AppEvent>, Receiver<AppEvent>) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx));
        for c in text.chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), &tx));
        }
        assert!(commander.handle_event(&key(KeyCode::Enter), &tx));
        assert!(!commander.active());

        rx.try_iter().collect()
    }

    #[test]
    fn inactive_commander_ignores_keys() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        assert!(!commander.handle_event(&key(KeyCode::Char('q')), &tx));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn escape_abandons_input() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.handle_event(&key(KeyCode::Char(':')), &tx);
        commander.handle_event(&key(KeyCode::Char('q')), &tx);
        commander.handle_event(&key(KeyCode::Esc), &tx);

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_still_resets_input() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &tx);
        commander.handle_event(&key(KeyCode::Char('q')), &tx);
        assert!(commander.handle_event(&key(KeyCode::Enter), &tx));

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
    }

    #[test]
    fn quit() {
        assert_matches!(submit("q").as_slice(), [AppEvent::ExitApplication]);
    }

    #[test]
    fn transport_commands() {
        assert_matches!(
            submit("next").as_slice(),
            [AppEvent::Intent(PlayerIntent::Transport(TransportAction::Next))]
        );
        assert_matches!(
            submit("shuffle").as_slice(),
            [AppEvent::Intent(PlayerIntent::Transport(TransportAction::Shuffle))]
        );
    }

    #[test]
    fn track_numbers_are_one_based() {
        assert_matches!(
            submit("go 3").as_slice(),
            [AppEvent::Intent(PlayerIntent::TrackClicked(2))]
        );
        assert_matches!(
            submit("fav 1").as_slice(),
            [AppEvent::Intent(PlayerIntent::FavoriteClicked(0))]
        );
        assert_matches!(submit("go 0").as_slice(), [AppEvent::Status(_)]);
    }

    #[test]
    fn volume_is_passed_through_for_clamping() {
        assert_matches!(
            submit("vol 1.7").as_slice(),
            [AppEvent::Intent(PlayerIntent::VolumeChanged(level))] if *level == 1.7
        );
        assert_matches!(submit("vol loud").as_slice(), [AppEvent::Status(_)]);
    }

    #[test]
    fn theme_commands() {
        assert_matches!(submit("theme").as_slice(), [AppEvent::ToggleTheme]);
        assert_matches!(
            submit("theme light").as_slice(),
            [AppEvent::SetTheme(ThemeMode::Light)]
        );
    }

    #[test]
    fn add_missing_path_reports_status() {
        assert_matches!(
            submit("add /no/such/tunedeck dir").as_slice(),
            [AppEvent::Status(message)] if message.contains("/no/such/tunedeck dir")
        );
    }

    #[test]
    fn add_file_emits_files_added() {
        let path = std::env::temp_dir().join(format!("tunedeck-add-{}.mp3", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let events = submit(&format!("add {}", path.display()));

        assert_matches!(
            events.as_slice(),
            [AppEvent::Intent(PlayerIntent::FilesAdded(files)), AppEvent::Status(_)]
                if files.len() == 1 && files[0].source == path.to_string_lossy()
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unknown_command_reports_status() {
        assert_matches!(
            submit("frobnicate now").as_slice(),
            [AppEvent::Status(message)] if message == "Unknown command: frobnicate"
        );
    }
}
