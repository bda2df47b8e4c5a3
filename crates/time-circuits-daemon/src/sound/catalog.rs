//! Symbolic sound names mapped to DFPlayer track indices.
//!
//! The catalog is built from whatever media is actually on storage. The
//! DFPlayer addresses tracks by storage order, so indices are assigned in
//! enumeration order starting at 1.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// File extensions the player can decode (compared case-insensitively).
const PLAYABLE_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// A store of audio assets that can list its entries.
pub trait MediaSource {
    /// Entry names in store order.
    fn entries(&self) -> io::Result<Vec<String>>;
}

/// A directory on the local filesystem.
///
/// Entries come back in `read_dir` order, which is whatever the filesystem
/// provides; subdirectories are skipped.
pub struct DirSource {
    path: PathBuf,
}

impl DirSource {
    /// Creates a source for `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaSource for DirSource {
    fn entries(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

impl MediaSource for [&str] {
    fn entries(&self) -> io::Result<Vec<String>> {
        Ok(self.iter().map(|name| name.to_string()).collect())
    }
}

/// Returns the symbolic name for a playable file, or None if the file is
/// not playable.
///
/// The name is everything before the last `.`, upper-cased.
pub fn symbolic_name(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let playable = PLAYABLE_EXTENSIONS
        .iter()
        .any(|ext| extension.eq_ignore_ascii_case(ext));
    playable.then(|| stem.to_uppercase())
}

/// Name → index mapping with a reserved fallback entry.
#[derive(Debug, Clone)]
pub struct SoundCatalog {
    entries: HashMap<String, u16>,
    fallback: String,
}

impl SoundCatalog {
    /// Creates an empty catalog that substitutes `fallback` for missing names.
    pub fn new(fallback: &str) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: fallback.to_string(),
        }
    }

    /// Replaces the catalog contents with the playable entries of `source`.
    ///
    /// A source that cannot be listed leaves the catalog empty.
    pub fn build<S: MediaSource + ?Sized>(&mut self, source: &S) {
        self.entries.clear();

        let names = match source.entries() {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to scan sound storage: {}. No sounds available.", e);
                return;
            }
        };

        let mut index: u16 = 0;
        for file_name in names {
            let Some(name) = symbolic_name(&file_name) else {
                debug!("Skipping non-audio entry: {}", file_name);
                continue;
            };
            index = index.saturating_add(1);
            if self.entries.contains_key(&name) {
                warn!(
                    "Duplicate sound name {} ({}), keeping index {}",
                    name, file_name, self.entries[&name]
                );
                continue;
            }
            debug!("Sound {} -> {} ({})", name, index, file_name);
            self.entries.insert(name, index);
        }

        info!("Sound catalog built with {} entries", self.entries.len());
    }

    /// Returns the index for `name`, substituting the fallback when the
    /// name is missing. None means neither is available.
    pub fn resolve(&self, name: &str) -> Option<u16> {
        if let Some(&index) = self.entries.get(name) {
            info!("Sound {} resolved to index {}", name, index);
            return Some(index);
        }

        match self.entries.get(&self.fallback) {
            Some(&index) => {
                warn!(
                    "Sound {} not found, substituting {} (index {})",
                    name, self.fallback, index
                );
                Some(index)
            }
            None => {
                error!(
                    "Sound {} not found and fallback {} is missing, nothing played",
                    name, self.fallback
                );
                None
            }
        }
    }

    /// Checks that every expected name is present and returns the missing
    /// ones. Lookups stay fallback-tolerant whatever this reports.
    pub fn verify<S: AsRef<str>>(&self, expected: &[S]) -> Vec<String> {
        info!("Validating sound files on storage...");
        let mut missing = Vec::new();
        for name in expected {
            let name = name.as_ref();
            match self.entries.get(name) {
                Some(index) => debug!("Found: {} (index {})", name, index),
                None => {
                    error!("Required sound {} not found", name);
                    missing.push(name.to_string());
                }
            }
        }

        if missing.is_empty() {
            info!("All required sound files found");
        } else {
            warn!(
                "{} sound file(s) missing, audio cues may be incomplete",
                missing.len()
            );
        }
        missing
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no names are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
