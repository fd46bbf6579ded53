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

//! Audio output used when no audio backend is compiled in.

use std::path::Path;

use tracing::debug;

use crate::{
    error::{PlayerError, PlayerResult},
    player::AudioOutput,
};

/// Accepts every transport command and produces no sound.
///
/// Local sources are still checked for existence so a playlist entry that
/// points at a missing file is reported the same way a real backend would.
#[derive(Debug, Default)]
pub(crate) struct SilentOutput {
    loaded: Option<String>,
}

impl SilentOutput {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

fn is_remote(source: &str) -> bool {
    source.contains("://") || source.starts_with("blob:")
}

impl AudioOutput for SilentOutput {
    fn load(&mut self, source: &str) -> PlayerResult<()> {
        if !is_remote(source) && !Path::new(source).exists() {
            self.loaded = None;
            return Err(PlayerError::PlaybackSource {
                locator: source.to_string(),
                reason: "no such file".to_string(),
            });
        }

        debug!(source, "Loaded source");
        self.loaded = Some(source.to_string());
        Ok(())
    }

    fn play(&mut self) -> PlayerResult<()> {
        match &self.loaded {
            Some(_) => Ok(()),
            None => Err(PlayerError::OutputUnavailable("nothing loaded".to_string())),
        }
    }

    fn pause(&mut self) -> PlayerResult<()> {
        Ok(())
    }

    fn seek(&mut self, _seconds: f64) -> PlayerResult<()> {
        Ok(())
    }

    fn set_volume(&mut self, _level: f64) -> PlayerResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_local_file_is_a_source_error() {
        let mut output = SilentOutput::new();
        assert_matches!(
            output.load("/definitely/not/here.mp3"),
            Err(PlayerError::PlaybackSource { .. })
        );
        assert_matches!(output.play(), Err(PlayerError::OutputUnavailable(_)));
    }

    #[test]
    fn remote_sources_are_accepted() {
        let mut output = SilentOutput::new();
        output.load("https://example.com/a.mp3").unwrap();
        output.play().unwrap();
        output.load("blob:1").unwrap();
    }

    #[test]
    fn existing_file_is_accepted() {
        let mut output = SilentOutput::new();
        output.load(env!("CARGO_MANIFEST_DIR")).unwrap();
        output.play().unwrap();
    }
}
