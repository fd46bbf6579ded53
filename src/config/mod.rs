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

//! Application configuration.
//!
//! This module manages the application configuration file and the paths
//! derived from it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "tunedeck";
const DATABASE_FILE: &str = "playlist.db";
const LOG_DIR: &str = "logs";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Settings database; defaults to a file beside the configuration.
    pub database_path: Option<PathBuf>,
    /// Cover image given to every file added from the command line.
    pub default_cover: String,
    pub initial_volume: f64,
    /// Seek step for the `,` and `.` keys, as a fraction of the track.
    pub seek_step: f64,
    pub volume_step: f64,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_path: None,
            default_cover: "images/cover1.jpg".to_string(),
            initial_volume: 1.0,
            seek_step: 0.05,
            volume_step: 0.05,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| config_dir().join(DATABASE_FILE))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| config_dir().join(LOG_DIR))
    }
}

// Directory holding the confy configuration file, or the working directory if
// the platform has no configuration location.
fn config_dir() -> PathBuf {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
