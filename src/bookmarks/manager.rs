//! Bookmark manager for persistence and retrieval.

use super::{is_valid_slot, Bookmark};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Bookmark manager for persistence and retrieval
pub struct BookmarkManager {
    /// slot -> bookmark mapping
    bookmarks: HashMap<u8, Bookmark>,
    /// Path to the bookmarks file
    config_path: PathBuf,
}

impl BookmarkManager {
    /// Load bookmarks from the data directory
    pub fn load() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .context("Could not find data directory")?
            .join("panedeck");
        Self::load_from(data_dir.join("bookmarks.json"))
    }

    /// Load bookmarks from a specific file; a missing file yields no bookmarks
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let bookmarks: HashMap<u8, Bookmark> = if path.exists() {
            let content =
                std::fs::read_to_string(&path).context("Failed to read bookmarks file")?;
            serde_json::from_str(&content).context("Failed to parse bookmarks file")?
        } else {
            HashMap::new()
        };

        let before = bookmarks.len();
        let bookmarks: HashMap<u8, Bookmark> = bookmarks
            .into_iter()
            .filter(|(slot, bookmark)| is_valid_slot(*slot) && bookmark.slot == *slot)
            .collect();
        if bookmarks.len() != before {
            tracing::warn!(
                dropped = before - bookmarks.len(),
                "ignoring bookmarks with invalid slots"
            );
        }

        Ok(Self {
            bookmarks,
            config_path: path,
        })
    }

    /// Create a new empty bookmark manager (for testing)
    pub fn empty() -> Self {
        Self {
            bookmarks: HashMap::new(),
            config_path: PathBuf::new(),
        }
    }

    /// Save bookmarks to disk
    pub fn save(&self) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Ok(()); // Skip saving if no path set (empty manager)
        }

        // Ensure parent directory exists
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let content = serde_json::to_string_pretty(&self.bookmarks)
            .context("Failed to serialize bookmarks")?;

        std::fs::write(&self.config_path, content).context("Failed to write bookmarks file")?;

        Ok(())
    }

    /// Get a bookmark by slot
    pub fn get(&self, slot: u8) -> Option<&Bookmark> {
        self.bookmarks.get(&slot)
    }

    /// Get all bookmarks as a sorted vector by slot
    pub fn get_all(&self) -> Vec<&Bookmark> {
        let mut bookmarks: Vec<&Bookmark> = self.bookmarks.values().collect();
        bookmarks.sort_by_key(|b| b.slot);
        bookmarks
    }

    /// Add or replace a bookmark at its slot
    pub fn set(&mut self, bookmark: Bookmark) -> Result<()> {
        if !is_valid_slot(bookmark.slot) {
            bail!("Bookmark slot must be between 1 and 9, got {}", bookmark.slot);
        }
        self.bookmarks.insert(bookmark.slot, bookmark);
        self.save()
    }

    /// Remove a bookmark at the given slot
    pub fn remove(&mut self, slot: u8) -> Result<bool> {
        let removed = self.bookmarks.remove(&slot).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Check if a slot is occupied
    pub fn has_slot(&self, slot: u8) -> bool {
        self.bookmarks.contains_key(&slot)
    }

    /// Get the number of bookmarks
    pub fn count(&self) -> usize {
        self.bookmarks.len()
    }

    /// Slot holding a bookmark for `path`, if any
    pub fn slot_for_path(&self, path: &Path) -> Option<u8> {
        self.bookmarks
            .iter()
            .filter(|(_, b)| b.path == path)
            .map(|(slot, _)| *slot)
            .min()
    }
}
