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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), audio output updates and
//! the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    `mpsc` channel, one at a time.
//! 2. **Process**: The [`process_events`] function turns each event into a
//!    [`PlayerIntent`] for the playback controller, or updates UI-only state
//!    (theme, status line, filter).
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{error, info};

use crate::{
    App,
    components::TrackListAction,
    controller::intent::{PlayerIntent, TransportAction},
    render::draw,
    theme::ThemeMode,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    Intent(PlayerIntent),

    // Audio output
    #[cfg_attr(not(feature = "mpv"), allow(dead_code))]
    Progress { current: f64, total: f64 },
    #[cfg_attr(not(feature = "mpv"), allow(dead_code))]
    TrackEnded,
    #[cfg_attr(not(feature = "mpv"), allow(dead_code))]
    PlaybackFailed(String),

    SetTheme(ThemeMode),
    ToggleTheme,

    Status(String),

    Tick,

    ExitApplication,

    #[cfg_attr(not(feature = "mpv"), allow(dead_code))]
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if drawing fails or a worker reports a fatal error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            info!("Exiting");
            break;
        }

        process_event(app, event)?;

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn process_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key),

        AppEvent::Intent(intent) => app.controller.dispatch(intent),

        AppEvent::Progress { current, total } => app
            .controller
            .dispatch(PlayerIntent::ProgressTick { current, total }),
        AppEvent::TrackEnded => app.controller.dispatch(PlayerIntent::TrackEnded),
        AppEvent::PlaybackFailed(reason) => app
            .controller
            .dispatch(PlayerIntent::PlaybackFailed(reason)),

        AppEvent::SetTheme(mode) => app.apply_theme(mode),
        AppEvent::ToggleTheme => app.apply_theme(app.theme_mode.toggled()),

        AppEvent::Status(message) => app.status = Some(message),

        AppEvent::Tick => {
            if app.controller.state().is_playing {
                app.disc_frame = app.disc_frame.wrapping_add(1);
            }
        }

        AppEvent::ExitApplication => {}

        AppEvent::FatalError(message) => {
            error!(reason = %message, "Fatal error");
            return Err(anyhow!(message));
        }
    }

    Ok(())
}

/// Maps keyboard input to controller intents.
///
/// Keys go first to the command line, then to the playlist table (navigation,
/// filter, activate, favourite), and only then to the global transport
/// bindings.
fn process_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx) {
        return;
    }

    let tracks = &app.controller.presenter().tracks;
    match app.track_list.process_event(&event, tracks) {
        Some(TrackListAction::Activate(index)) => {
            app.status = None;
            app.controller.dispatch(PlayerIntent::TrackClicked(index));
        }
        Some(TrackListAction::ToggleFavourite(index)) => {
            app.controller.dispatch(PlayerIntent::FavoriteClicked(index));
        }
        Some(TrackListAction::Handled) => {}
        None => process_global_key_event(app, key),
    }
}

fn process_global_key_event(app: &mut App, key: KeyEvent) {
    let seek_step = app.config.seek_step;
    let volume_step = app.config.volume_step;

    let intent = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            let _ = app.event_tx.send(AppEvent::ExitApplication);
            return;
        }

        (KeyCode::Char('t'), _) => {
            app.apply_theme(app.theme_mode.toggled());
            return;
        }

        (KeyCode::Char(' '), _) => PlayerIntent::Transport(TransportAction::PlayPause),
        (KeyCode::Char('n'), _) => PlayerIntent::Transport(TransportAction::Next),
        (KeyCode::Char('p'), _) => PlayerIntent::Transport(TransportAction::Prev),
        (KeyCode::Char('s'), _) => PlayerIntent::Transport(TransportAction::Shuffle),
        (KeyCode::Char('r'), _) => PlayerIntent::Transport(TransportAction::Repeat),

        (KeyCode::Char(','), _) | (KeyCode::Left, _) => PlayerIntent::SeekBy(-seek_step),
        (KeyCode::Char('.'), _) | (KeyCode::Right, _) => PlayerIntent::SeekBy(seek_step),

        (KeyCode::Char('-'), _) => PlayerIntent::VolumeBy(-volume_step),
        (KeyCode::Char('='), _) | (KeyCode::Char('+'), _) => PlayerIntent::VolumeBy(volume_step),

        _ => return,
    };

    app.controller.dispatch(intent);
}
