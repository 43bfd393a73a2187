//! Show file: everything the host needs to stage a song.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalyzerConfig, ControllerSettings, ResponderConfig, SongConfig};
use crate::error::ConfigError;

/// Complete show description, read from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub song: SongConfig,
    pub controller: ControllerSettings,
    pub analyzer: AnalyzerConfig,
    pub responders: Vec<ResponderConfig>,
}

impl ShowConfig {
    /// Parse a show from JSON text (track sources are taken as written)
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let show: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        show.controller.validate()?;
        show.analyzer.validate()?;
        Ok(show)
    }

    /// Load a show file, resolving relative track sources against its directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut show = Self::from_json(&text)?;

        if let Some(base) = path.parent() {
            show.resolve_sources(base);
        }
        Ok(show)
    }

    fn resolve_sources(&mut self, base: &Path) {
        let tracks = std::iter::once(&mut self.song.master).chain(self.song.detail_tracks.iter_mut());
        for track in tracks {
            if let Some(source) = track.source.as_mut() {
                if source.is_relative() {
                    *source = base.join(&*source);
                }
            }
        }
    }
}
