//! Asset resolution by page number
//!
//! Page images are named `page_NNN.jpg` and narration tracks `NNN.mp3`, both
//! zero-padded to three digits. Audio is sparse: most pages have no track.

use crate::constants::{DEFAULT_AUDIO_PAGES, FIRST_PAGE, LAST_PAGE};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref AUDIO_FILE_RE: Regex = Regex::new(r"^(\d{3})\.mp3$").unwrap();
}

pub fn page_image_name(page: u16) -> String {
    format!("page_{:03}.jpg", page)
}

pub fn audio_file_name(page: u16) -> String {
    format!("{:03}.mp3", page)
}

/// Full path of a page image, when a pages directory is configured
pub fn page_image_path(pages_dir: Option<&Path>, page: u16) -> Option<PathBuf> {
    pages_dir.map(|dir| dir.join(page_image_name(page)))
}

/// Page number to narration track
#[derive(Debug, Clone, Default)]
pub struct AudioCatalog {
    entries: BTreeMap<u16, PathBuf>,
}

impl AudioCatalog {
    /// The compiled list of narrated pages, resolved against `audio_dir`
    pub fn with_default_pages(audio_dir: &Path) -> Self {
        let entries = DEFAULT_AUDIO_PAGES
            .iter()
            .map(|&page| (page, audio_dir.join(audio_file_name(page))))
            .collect();
        AudioCatalog { entries }
    }

    /// Catalog every `NNN.mp3` file in a directory whose number is a valid page
    pub fn scan_dir(audio_dir: &Path) -> Result<Self> {
        let mut entries = BTreeMap::new();

        let read_dir = fs::read_dir(audio_dir)
            .with_context(|| format!("Failed to read audio directory {}", audio_dir.display()))?;

        for entry in read_dir {
            let entry = entry.context("Failed to read audio directory entry")?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(captures) = AUDIO_FILE_RE.captures(name) else {
                continue;
            };
            let Ok(page) = captures[1].parse::<u16>() else {
                continue;
            };
            if (FIRST_PAGE..=LAST_PAGE).contains(&page) {
                entries.insert(page, entry.path());
            }
        }

        tracing::debug!(
            "Audio catalog scanned {}: {} tracks",
            audio_dir.display(),
            entries.len()
        );
        Ok(AudioCatalog { entries })
    }

    /// Scan the directory, falling back to the compiled list if it is unreadable
    pub fn load(audio_dir: &Path) -> Self {
        match Self::scan_dir(audio_dir) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("{:#}. Using the default audio page list.", e);
                Self::with_default_pages(audio_dir)
            }
        }
    }

    pub fn get(&self, page: u16) -> Option<&Path> {
        self.entries.get(&page).map(PathBuf::as_path)
    }

    pub fn has(&self, page: u16) -> bool {
        self.entries.contains_key(&page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn from_entries(entries: impl IntoIterator<Item = (u16, PathBuf)>) -> Self {
        AudioCatalog {
            entries: entries.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names_are_zero_padded() {
        assert_eq!(page_image_name(2), "page_002.jpg");
        assert_eq!(page_image_name(604), "page_604.jpg");
        assert_eq!(audio_file_name(42), "042.mp3");
    }

    #[test]
    fn test_image_path_requires_directory() {
        assert_eq!(page_image_path(None, 10), None);
        assert_eq!(
            page_image_path(Some(Path::new("/pages")), 10),
            Some(PathBuf::from("/pages/page_010.jpg"))
        );
    }

    #[test]
    fn test_default_catalog_is_sparse() {
        let catalog = AudioCatalog::with_default_pages(Path::new("/audio"));
        assert_eq!(catalog.len(), 10);
        assert!(catalog.has(2));
        assert!(catalog.has(466));
        assert!(!catalog.has(3));
        assert_eq!(catalog.get(458), Some(Path::new("/audio/458.mp3")));
    }

    #[test]
    fn test_scan_dir_picks_valid_tracks() {
        let dir = TempDir::new().unwrap();
        for name in ["002.mp3", "150.mp3", "001.mp3", "700.mp3", "notes.txt", "12.mp3"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let catalog = AudioCatalog::scan_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.has(2));
        assert!(catalog.has(150));
        assert!(!catalog.has(1));
    }

    #[test]
    fn test_load_falls_back_when_directory_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let catalog = AudioCatalog::load(&missing);
        assert!(catalog.has(2));
        assert_eq!(catalog.get(2), Some(missing.join("002.mp3").as_path()));
    }
}
