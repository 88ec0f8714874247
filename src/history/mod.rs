//! Per-pane directory history.
//!
//! Three independent structures live here:
//! - the visit map, remembering where the cursor was when a pane left a
//!   directory, keyed by `(pane, path)`
//! - a most-recently-used list of directories per pane (capped)
//! - a back/forward [`NavigationStack`] per pane
//!
//! Lookups for unknown locations fall back to defaults; a missing record is a
//! normal state, not an error.

mod stack;

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fs::{last_segment, normalize_path, FileEntry};

pub use stack::NavigationStack;

/// Identifies a pane within a workspace
pub type PaneId = usize;

/// Maximum entries in a pane's recent-directories list
pub const RECENT_DIRECTORIES_CAP: usize = 20;

/// Cursor state remembered for a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryVisit {
    /// Name under the cursor when the pane left, if any
    pub filename_at_cursor: Option<String>,
    pub cursor_index: usize,
    pub scroll_offset: usize,
    /// Unix timestamp (ms) of the visit
    pub timestamp_ms: i64,
}

/// Entry of the recent-directories list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDirectoryEntry {
    pub path: PathBuf,
    pub last_visit_ms: i64,
}

/// Cursor placement computed for a directory being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoredCursor {
    pub cursor: usize,
    pub scroll_offset: usize,
}

/// Directory history for all panes of a workspace
#[derive(Debug, Clone, Default)]
pub struct DirectoryHistory {
    visits: HashMap<(PaneId, PathBuf), DirectoryVisit>,
    recent: HashMap<PaneId, VecDeque<RecentDirectoryEntry>>,
    navigation: HashMap<PaneId, NavigationStack>,
}

impl DirectoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the cursor for `path` and move it to the front of the pane's
    /// recent list.
    pub fn save_cursor_position(
        &mut self,
        pane: PaneId,
        path: &Path,
        filename_at_cursor: Option<&str>,
        cursor_index: usize,
        scroll_offset: usize,
    ) {
        let now = chrono::Utc::now().timestamp_millis();
        let path = normalize_path(path);

        self.visits.insert(
            (pane, path.clone()),
            DirectoryVisit {
                filename_at_cursor: filename_at_cursor.map(str::to_string),
                cursor_index,
                scroll_offset,
                timestamp_ms: now,
            },
        );
        self.touch_recent(pane, path, now);
    }

    fn touch_recent(&mut self, pane: PaneId, path: PathBuf, now: i64) {
        let recent = self.recent.entry(pane).or_default();
        recent.retain(|entry| entry.path != path);
        recent.push_front(RecentDirectoryEntry {
            path,
            last_visit_ms: now,
        });
        recent.truncate(RECENT_DIRECTORIES_CAP);
    }

    /// Where to put the cursor when `pane` enters `path`.
    ///
    /// The remembered filename wins if it is still listed; otherwise the
    /// remembered index is clamped into the current listing. Unknown
    /// directories start at the top.
    pub fn restore_cursor_position<S: AsRef<str>>(
        &self,
        pane: PaneId,
        path: &Path,
        current_filenames: &[S],
    ) -> RestoredCursor {
        let Some(visit) = self.visits.get(&(pane, normalize_path(path))) else {
            return RestoredCursor::default();
        };

        let by_name = visit.filename_at_cursor.as_deref().and_then(|name| {
            current_filenames
                .iter()
                .position(|candidate| candidate.as_ref() == name)
        });

        let cursor = by_name.unwrap_or_else(|| {
            visit
                .cursor_index
                .min(current_filenames.len().saturating_sub(1))
        });

        RestoredCursor {
            cursor,
            scroll_offset: visit.scroll_offset.min(cursor),
        }
    }

    /// Remembered visit for a location
    pub fn visit(&self, pane: PaneId, path: &Path) -> Option<&DirectoryVisit> {
        self.visits.get(&(pane, normalize_path(path)))
    }

    /// Recent directories of a pane, most recent first
    pub fn recent_directories(&self, pane: PaneId) -> Vec<&RecentDirectoryEntry> {
        self.recent
            .get(&pane)
            .map(|recent| recent.iter().collect())
            .unwrap_or_default()
    }

    /// Record that `pane` navigated away from `from` to somewhere new.
    pub fn record_navigation(&mut self, pane: PaneId, from: &Path) {
        self.navigation
            .entry(pane)
            .or_default()
            .push(&normalize_path(from));
    }

    /// Previous location of `pane`, or `None` at the start of its history
    pub fn navigate_back(&mut self, pane: PaneId, current: &Path) -> Option<PathBuf> {
        self.navigation.get_mut(&pane)?.go_back(&normalize_path(current))
    }

    /// Next location of `pane`, or `None` at the newest location
    pub fn navigate_forward(&mut self, pane: PaneId, current: &Path) -> Option<PathBuf> {
        self.navigation.get_mut(&pane)?.go_forward(&normalize_path(current))
    }

    /// Target of the next `navigate_back`, leaving the stack untouched
    pub fn peek_back(&self, pane: PaneId) -> Option<&Path> {
        self.navigation.get(&pane)?.peek_back()
    }

    /// Target of the next `navigate_forward`, leaving the stack untouched
    pub fn peek_forward(&self, pane: PaneId) -> Option<&Path> {
        self.navigation.get(&pane)?.peek_forward()
    }

    pub fn can_go_back(&self, pane: PaneId) -> bool {
        self.navigation.get(&pane).is_some_and(NavigationStack::can_go_back)
    }

    pub fn can_go_forward(&self, pane: PaneId) -> bool {
        self.navigation
            .get(&pane)
            .is_some_and(NavigationStack::can_go_forward)
    }

    /// Drop everything remembered for a pane (used when a pane is closed)
    pub fn forget_pane(&mut self, pane: PaneId) {
        self.visits.retain(|(p, _), _| *p != pane);
        self.recent.remove(&pane);
        self.navigation.remove(&pane);
    }

    /// Serializable copy of the visit map and recent lists.
    ///
    /// Back/forward stacks are session-only and not included.
    pub fn snapshot(&self) -> HistorySnapshot {
        let mut visits: Vec<VisitRecord> = self
            .visits
            .iter()
            .map(|((pane, path), visit)| VisitRecord {
                pane: *pane,
                path: path.clone(),
                visit: visit.clone(),
            })
            .collect();
        visits.sort_by(|a, b| (a.pane, &a.path).cmp(&(b.pane, &b.path)));

        let recent = self
            .recent
            .iter()
            .map(|(pane, entries)| (*pane, entries.iter().cloned().collect()))
            .collect();

        HistorySnapshot { visits, recent }
    }

    /// Rebuild history from a snapshot, re-applying the recent-list cap.
    pub fn from_snapshot(snapshot: HistorySnapshot) -> Self {
        let visits = snapshot
            .visits
            .into_iter()
            .map(|record| ((record.pane, normalize_path(&record.path)), record.visit))
            .collect();

        let recent = snapshot
            .recent
            .into_iter()
            .map(|(pane, entries)| {
                let mut deque: VecDeque<RecentDirectoryEntry> = entries.into_iter().collect();
                deque.truncate(RECENT_DIRECTORIES_CAP);
                (pane, deque)
            })
            .collect();

        Self {
            visits,
            recent,
            navigation: HashMap::new(),
        }
    }

    /// Load history from a JSON file; a missing file yields empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;
        let snapshot: HistorySnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history file: {}", path.display()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Save history to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&self.snapshot()).context("Failed to serialize history")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write history file: {}", path.display()))?;
        Ok(())
    }
}

/// One persisted visit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub pane: PaneId,
    pub path: PathBuf,
    #[serde(flatten)]
    pub visit: DirectoryVisit,
}

/// Persisted form of [`DirectoryHistory`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    #[serde(default)]
    pub visits: Vec<VisitRecord>,
    #[serde(default)]
    pub recent: BTreeMap<PaneId, Vec<RecentDirectoryEntry>>,
}

/// Default location of the history file
pub fn default_history_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not find data directory")?;
    Ok(data_dir.join("panedeck").join("history.json"))
}

/// Index of the child directory in its parent's listing.
///
/// Used to put the cursor on the directory just left when going up. Only a
/// directory with exactly the child's name matches; a same-named file does
/// not. Returns 0 when nothing matches or `child_path` is the root.
pub fn find_subdirectory_in_parent(child_path: &Path, parent_entries: &[FileEntry]) -> usize {
    let Some(name) = last_segment(child_path) else {
        return 0;
    };
    parent_entries
        .iter()
        .position(|entry| entry.is_directory && entry.name == name)
        .unwrap_or(0)
}
