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

//! Discovery of audio files added by the user.
//!
//! A path naming a file is taken as-is, whatever its extension. A directory
//! is walked recursively with `WalkDir` and only files with a known audio
//! extension are kept, in file name order.

use std::path::Path;

use anyhow::{Result, bail};
use walkdir::WalkDir;

use crate::model::AddedFile;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"];

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn added_file(path: &Path) -> AddedFile {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    AddedFile {
        name,
        source: path.to_string_lossy().into_owned(),
    }
}

/// Expands `path` into the files it names.
///
/// # Errors
///
/// Returns an error if `path` does not exist.
pub(crate) fn discover_files(path: &Path) -> Result<Vec<AddedFile>> {
    if !path.exists() {
        bail!("No such file or directory: {}", path.display());
    }

    if path.is_file() {
        return Ok(vec![added_file(path)]);
    }

    let files = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio(e.path()))
        .map(|e| added_file(e.path()))
        .collect();

    Ok(files)
}
