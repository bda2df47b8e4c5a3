//! Audio cues.
//!
//! Cues are requested by symbolic name. The catalog turns the name into a
//! DFPlayer track index; playback itself is fire-and-forget.

mod catalog;

pub use catalog::{DirSource, MediaSource, SoundCatalog};

use std::sync::{Arc, RwLock};
use time_circuits_hw::DfPlayer;
use tracing::{debug, info, warn};

use crate::config::SoundConfig;

/// Symbolic names of the cues the daemon plays.
pub mod cues {
    pub const TIME_TRAVEL: &str = "TIME_TRAVEL";
    pub const CONFIRM_ON: &str = "CONFIRM_ON";
    pub const WARP_WHOOSH: &str = "WARP_WHOOSH";
    pub const ARRIVAL_THUD: &str = "ARRIVAL_THUD";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Catalog plus the optional player.
pub struct SoundBoard {
    catalog: RwLock<SoundCatalog>,
    player: Option<Arc<DfPlayer>>,
    source: DirSource,
}

impl SoundBoard {
    /// Creates the board and builds the catalog from the configured directory.
    pub fn new(config: &SoundConfig) -> Self {
        let source = DirSource::new(&config.directory);
        let mut catalog = SoundCatalog::new(&config.fallback);
        catalog.build(&source);

        let player = if config.enable {
            info!("DFPlayer on {}", config.device);
            Some(Arc::new(DfPlayer::new(&config.device)))
        } else {
            info!("Sound disabled, cues will only be logged");
            None
        };

        Self {
            catalog: RwLock::new(catalog),
            player,
            source,
        }
    }

    /// Rescans the sound directory.
    pub fn rebuild(&self) {
        debug!("Rescanning {}", self.source.path().display());
        self.catalog.write().unwrap().build(&self.source);
    }

    /// Runs the startup self-check and returns the missing names.
    pub fn verify(&self, expected: &[String]) -> Vec<String> {
        self.catalog.read().unwrap().verify(expected)
    }

    /// Resolves a cue without playing it.
    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.catalog.read().unwrap().resolve(name)
    }

    /// Plays a cue. Must be called from within the Tokio runtime when a
    /// player is configured.
    pub fn play(&self, name: &str) {
        let Some(index) = self.resolve(name) else {
            return;
        };
        let Some(player) = self.player.clone() else {
            info!("Sound disabled, skipped {} (index {})", name, index);
            return;
        };

        let name = name.to_string();
        tokio::spawn(async move {
            if let Err(e) = player.play(index).await {
                warn!("Failed to play {} (index {}): {}", name, index, e);
            }
        });
    }

    /// Sends the volume to the player, if there is one.
    pub async fn set_volume(&self, volume: u8) {
        if let Some(player) = &self.player {
            if let Err(e) = player.set_volume(volume).await {
                warn!("Failed to set DFPlayer volume: {}", e);
            }
        }
    }

    /// Stops playback, if there is a player.
    pub async fn stop(&self) {
        if let Some(player) = &self.player {
            if let Err(e) = player.stop().await {
                warn!("Failed to stop DFPlayer: {}", e);
            }
        }
    }

    /// Returns the number of known cues.
    pub fn cue_count(&self) -> usize {
        self.catalog.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path) -> SoundConfig {
        SoundConfig {
            directory: dir.to_string_lossy().into_owned(),
            enable: false,
            ..SoundConfig::default()
        }
    }

    #[test]
    fn test_board_builds_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("not_found.mp3"), b"").unwrap();

        let board = SoundBoard::new(&config(dir.path()));
        assert_eq!(board.cue_count(), 1);
        assert_eq!(board.resolve(cues::TIME_TRAVEL), Some(1));
        // No player configured: resolves and returns without spawning.
        board.play(cues::TIME_TRAVEL);
    }

    #[test]
    fn test_rebuild_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let board = SoundBoard::new(&config(dir.path()));
        assert_eq!(board.cue_count(), 0);
        assert_eq!(board.resolve(cues::CONFIRM_ON), None);

        std::fs::write(dir.path().join("confirm_on.mp3"), b"").unwrap();
        board.rebuild();
        assert_eq!(board.resolve(cues::CONFIRM_ON), Some(1));
    }

    #[test]
    fn test_verify_expected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("time_travel.mp3"), b"").unwrap();
        let board = SoundBoard::new(&config(dir.path()));
        let missing = board.verify(&[cues::TIME_TRAVEL.to_string(), cues::NOT_FOUND.to_string()]);
        assert_eq!(missing, vec![cues::NOT_FOUND.to_string()]);
    }

    #[test]
    fn test_dir_source_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("arrival_thud.wav"), b"").unwrap();
        let source = DirSource::new(dir.path());
        assert_eq!(
            MediaSource::entries(&source).unwrap(),
            vec!["arrival_thud.wav".to_string()]
        );
    }
}
