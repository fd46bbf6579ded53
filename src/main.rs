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

//! # Tunedeck.
//!
//! A terminal music player built around a single persisted playlist.
//!
//! This application coordinates a TUI frontend built with `ratatui`, a
//! playback controller and an audio output running on its own worker.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, the playback
//!   controller and UI rendering.
//! * The **Audio Output** reports progress, track completion and failures
//!   back to the main thread as events.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod actions;
mod commander;
mod components;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod player;
mod presenter;
mod render;
mod storage;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    rc::Rc,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::info;

use crate::{
    actions::events::{AppEvent, process_events},
    commander::Commander,
    components::TrackList,
    config::AppConfig,
    controller::PlaybackController,
    model::playlist::PlaylistStore,
    player::AudioOutput,
    presenter::ViewModel,
    storage::{KeyValueStore, SqliteStore},
    theme::{Theme, ThemeMode},
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub storage: Rc<dyn KeyValueStore>,

    pub theme_mode: ThemeMode,
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub controller: PlaybackController<ViewModel>,

    pub track_list: TrackList,
    pub commander: Commander,

    pub status: Option<String>,
    pub disc_frame: usize,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, storage: Rc<dyn KeyValueStore>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let playlist = PlaylistStore::load(Rc::clone(&storage));
        let output = audio_output(event_tx.clone());

        let mut controller = PlaybackController::new(playlist, output, ViewModel::new())
            .with_default_cover(config.default_cover.clone());
        controller.start(config.initial_volume);

        info!(tracks = controller.playlist().len(), "Playlist ready");

        let theme_mode = ThemeMode::load(storage.as_ref());

        Self {
            config,
            storage,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            event_tx,
            event_rx,
            controller,
            track_list: TrackList::new(),
            commander: Commander::new(),
            status: None,
            disc_frame: 0,
        }
    }

    /// Switches the colour theme and remembers the choice.
    pub fn apply_theme(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = Theme::for_mode(mode);
        mode.save(self.storage.as_ref());

        if let Some(hex) = Theme::to_hex(self.theme.background_colour) {
            util::term::set_terminal_bg(&hex);
        }
    }
}

#[cfg(feature = "mpv")]
fn audio_output(event_tx: Sender<AppEvent>) -> Box<dyn AudioOutput> {
    Box::new(player::MpvOutput::new(event_tx))
}

#[cfg(not(feature = "mpv"))]
fn audio_output(_event_tx: Sender<AppEvent>) -> Box<dyn AudioOutput> {
    tracing::warn!("Built without the mpv feature, audio output is silent");
    Box::new(player::SilentOutput::new())
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, opens the settings database,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let _log_guard = logging::init_logging(&config.log_dir()).context("Failed to initialise logging")?;

    let storage = SqliteStore::open(&config.database_path()).context("Failed to open settings database")?;

    let mut app = App::new(config, Rc::new(storage));

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application
    // and drives the spinning disc.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
