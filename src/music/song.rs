//! Song: the master track and its detail tracks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Track;
use crate::audio::AudioAsset;
use crate::params::{SongConfig, TrackConfig};

/// Master track plus detail tracks, as owned by the controller
#[derive(Debug, Clone)]
pub struct Song {
    pub master: Track,
    pub detail_tracks: Vec<Track>,
}

impl Song {
    pub fn new(master: Track, detail_tracks: Vec<Track>) -> Self {
        Self {
            master,
            detail_tracks,
        }
    }

    /// Build tracks from configuration, decoding each source file once
    ///
    /// A source that fails to load leaves its track without an asset; the
    /// track is then dropped when the controller arms.
    pub fn load(config: &SongConfig) -> Self {
        let mut assets: HashMap<PathBuf, Option<Arc<AudioAsset>>> = HashMap::new();
        let mut build = |track: &TrackConfig| {
            let source = track
                .source
                .as_deref()
                .and_then(|path| load_cached(&mut assets, path));
            Track::new(track.clone(), source)
        };

        let master = build(&config.master);
        let detail_tracks = config.detail_tracks.iter().map(&mut build).collect();
        Self::new(master, detail_tracks)
    }

    /// All tracks, master first
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        std::iter::once(&self.master).chain(self.detail_tracks.iter())
    }
}

fn load_cached(
    assets: &mut HashMap<PathBuf, Option<Arc<AudioAsset>>>,
    path: &Path,
) -> Option<Arc<AudioAsset>> {
    assets
        .entry(path.to_path_buf())
        .or_insert_with(|| match AudioAsset::load_wav(path) {
            Ok(asset) => Some(Arc::new(asset)),
            Err(e) => {
                log::warn!("(Song): {}", e);
                None
            }
        })
        .clone()
}
