//! Directory bookmarks for quick access.
//!
//! Bookmarks remember a directory in one of nine numbered slots so it can be
//! reopened with a single digit key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lowest bookmark slot
pub const MIN_SLOT: u8 = 1;
/// Highest bookmark slot
pub const MAX_SLOT: u8 = 9;

/// Bookmark entry pointing at a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Unique bookmark ID
    pub id: String,
    /// Hotkey slot (1-9)
    pub slot: u8,
    /// Display name, defaults to the directory name
    pub name: String,
    /// Bookmarked directory
    pub path: PathBuf,
    /// Unix timestamp (ms) when the bookmark was created
    pub created_at: i64,
}

impl Bookmark {
    /// Create a bookmark for a directory
    pub fn new(slot: u8, name: String, path: PathBuf) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: format!("bookmark_{slot}_{now}"),
            slot,
            name,
            path,
            created_at: now,
        }
    }

    /// Create a bookmark named after the directory's last segment
    pub fn for_directory(slot: u8, path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(slot, name, path.to_path_buf())
    }
}

/// Whether `slot` is a valid bookmark slot
pub fn is_valid_slot(slot: u8) -> bool {
    (MIN_SLOT..=MAX_SLOT).contains(&slot)
}

pub mod manager;

pub use manager::BookmarkManager;
