//! Per-pane state: listing, cursor, scroll and marks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::fs::FileEntry;
use crate::history::PaneId;
use crate::sort::SortSpec;

/// Identity of a marked entry.
///
/// Marks are keyed by name so they survive re-sorting, plus the directory flag
/// so a file and a directory with the same name are marked independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkKey {
    pub name: String,
    pub is_directory: bool,
}

impl MarkKey {
    pub fn new(name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            name: name.into(),
            is_directory,
        }
    }

    /// Key for a listed entry
    pub fn of(entry: &FileEntry) -> Self {
        Self::new(entry.name.clone(), entry.is_directory)
    }
}

/// One independently navigable directory view.
#[derive(Debug, Clone)]
pub struct PaneState {
    pub pane_id: PaneId,
    pub current_path: PathBuf,
    /// Current listing, already filtered and sorted
    pub files: Vec<FileEntry>,
    /// Selected entry; `None` is the explicit "no selection" state
    pub cursor: Option<usize>,
    pub scroll_offset: usize,
    pub sort: SortSpec,
    pub marked: HashSet<MarkKey>,
    /// Set when the cursor moved and the renderer should scroll it into view
    pub reveal_requested: bool,
}

impl PaneState {
    /// Create an empty pane at `path`. Call [`PaneState::replace_listing`] to
    /// fill it.
    pub fn new(pane_id: PaneId, path: impl Into<PathBuf>, sort: SortSpec) -> Self {
        Self {
            pane_id,
            current_path: path.into(),
            files: Vec::new(),
            cursor: None,
            scroll_offset: 0,
            sort,
            marked: HashSet::new(),
            reveal_requested: false,
        }
    }

    /// Cursor as a signed index where -1 means no selection
    pub fn cursor_index(&self) -> i64 {
        self.cursor.map_or(-1, |cursor| cursor as i64)
    }

    /// Entry under the cursor
    pub fn selected(&self) -> Option<&FileEntry> {
        self.cursor.and_then(|cursor| self.files.get(cursor))
    }

    /// Name of the entry under the cursor
    pub fn selected_name(&self) -> Option<&str> {
        self.selected().map(|entry| entry.name.as_str())
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.files.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Index of the first entry with this exact name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|entry| entry.name == name)
    }

    /// Whether a directory with this exact name is listed
    pub fn has_directory(&self, name: &str) -> bool {
        self.files
            .iter()
            .any(|entry| entry.is_directory && entry.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    // --- Listing ---

    /// Install a listing for a newly entered directory. Marks are dropped and
    /// the cursor is placed at `cursor`, clamped into the listing.
    pub fn replace_listing(&mut self, path: &Path, files: Vec<FileEntry>, cursor: usize, scroll: usize) {
        self.current_path = path.to_path_buf();
        self.files = self.sort.sort(&files);
        self.marked.clear();
        self.scroll_offset = scroll;
        self.place_cursor(cursor);
    }

    /// Install a fresh listing of the same directory. The cursor stays on the
    /// same name when it still exists and marks of vanished entries are
    /// dropped.
    pub fn refresh_listing(&mut self, files: Vec<FileEntry>) {
        let selected = self.selected_name().map(str::to_string);
        let previous_cursor = self.cursor;

        self.files = self.sort.sort(&files);
        let present: HashSet<MarkKey> = self.files.iter().map(MarkKey::of).collect();
        self.marked.retain(|key| present.contains(key));

        match selected.and_then(|name| self.position_of(&name)) {
            Some(index) => self.cursor = Some(index),
            None => match previous_cursor {
                Some(cursor) => self.place_cursor(cursor),
                None => self.cursor = None,
            },
        }
    }

    /// Re-sort with a new spec, keeping the cursor on the same entry.
    pub fn apply_sort(&mut self, sort: SortSpec) {
        let selected = self.selected().map(MarkKey::of);
        self.sort = sort;
        self.files = sort.sort(&self.files);
        if let Some(key) = selected {
            self.cursor = self
                .files
                .iter()
                .position(|entry| entry.name == key.name && entry.is_directory == key.is_directory);
            self.reveal_requested = true;
        }
    }

    // --- Cursor ---

    /// Put the cursor at `index`, clamped. Empty listings get no selection.
    pub fn place_cursor(&mut self, index: usize) {
        self.cursor = if self.files.is_empty() {
            None
        } else {
            Some(index.min(self.files.len() - 1))
        };
        self.reveal_requested = true;
    }

    /// Move the cursor by `delta`, stopping at either end. A pane without a
    /// selection starts from the top.
    pub fn move_cursor(&mut self, delta: isize) {
        let Some(cursor) = self.cursor else {
            self.place_cursor(0);
            return;
        };
        self.place_cursor(cursor.saturating_add_signed(delta));
    }

    pub fn cursor_first(&mut self) {
        self.place_cursor(0);
    }

    pub fn cursor_last(&mut self) {
        self.place_cursor(self.files.len().saturating_sub(1));
    }

    /// Adjust `scroll_offset` so the cursor lies within `rows` visible rows
    /// and clear the reveal request.
    pub fn reveal_cursor(&mut self, rows: usize) {
        self.reveal_requested = false;
        let rows = rows.max(1);
        let Some(cursor) = self.cursor else {
            self.scroll_offset = self.scroll_offset.min(self.files.len().saturating_sub(rows));
            return;
        };
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        } else if cursor >= self.scroll_offset + rows {
            self.scroll_offset = cursor + 1 - rows;
        }
    }

    // --- Marks ---

    pub fn is_marked(&self, entry: &FileEntry) -> bool {
        self.marked.contains(&MarkKey::of(entry))
    }

    /// Flip the mark of one entry
    pub fn toggle_one(&mut self, name: &str, is_directory: bool) {
        let key = MarkKey::new(name, is_directory);
        if !self.marked.remove(&key) {
            self.marked.insert(key);
        }
    }

    /// Mark every listed entry
    pub fn mark_all(&mut self) {
        self.marked = self.files.iter().map(MarkKey::of).collect();
    }

    /// Replace the marks with their symmetric difference against the listing.
    pub fn invert(&mut self) {
        let all: HashSet<MarkKey> = self.files.iter().map(MarkKey::of).collect();
        self.marked = all.symmetric_difference(&self.marked).cloned().collect();
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// Toggle the entry under the cursor, then advance unless at the last
    /// entry. Does nothing without a selection.
    pub fn toggle_and_advance(&mut self) {
        let Some(key) = self.selected().map(MarkKey::of) else {
            return;
        };
        self.toggle_one(&key.name, key.is_directory);
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.files.len() {
                self.cursor = Some(cursor + 1);
                self.reveal_requested = true;
            }
        }
    }

    /// Marked entries in listing order
    pub fn marked_entries(&self) -> Vec<&FileEntry> {
        self.files.iter().filter(|entry| self.is_marked(entry)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortCriterion, SortDirection};

    fn pane_with(names: &[&str]) -> PaneState {
        let mut pane = PaneState::new(0, "/p", SortSpec::default());
        let files = names
            .iter()
            .map(|name| FileEntry::file(*name, format!("/p/{name}"), 1, 0))
            .collect();
        pane.replace_listing(Path::new("/p"), files, 0, 0);
        pane
    }

    #[test]
    fn cursor_index_uses_minus_one_for_no_selection() {
        let mut pane = pane_with(&["a"]);
        assert_eq!(pane.cursor_index(), 0);
        pane.cursor = None;
        assert_eq!(pane.cursor_index(), -1);
    }

    #[test]
    fn empty_listing_has_no_selection() {
        let pane = pane_with(&[]);
        assert_eq!(pane.cursor, None);
        assert_eq!(pane.selected(), None);
    }

    #[test]
    fn move_cursor_stops_at_the_ends() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.move_cursor(-1);
        assert_eq!(pane.cursor, Some(0));
        pane.move_cursor(10);
        assert_eq!(pane.cursor, Some(2));
        pane.cursor = None;
        pane.move_cursor(1);
        assert_eq!(pane.cursor, Some(0));
    }

    #[test]
    fn invert_on_all_marked_clears_and_on_none_marks_everything() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.mark_all();
        pane.invert();
        assert!(pane.marked.is_empty());
        pane.invert();
        assert_eq!(pane.marked.len(), 3);
    }

    #[test]
    fn invert_is_a_symmetric_difference() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.toggle_one("b", false);
        pane.invert();
        let names: Vec<&str> = pane.marked_entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn toggle_and_advance_stops_at_last_entry() {
        let mut pane = pane_with(&["a", "b"]);
        pane.toggle_and_advance();
        assert_eq!(pane.cursor, Some(1));
        pane.toggle_and_advance();
        assert_eq!(pane.cursor, Some(1));
        assert_eq!(pane.marked.len(), 2);
        pane.toggle_and_advance();
        assert_eq!(pane.marked.len(), 1);
    }

    #[test]
    fn toggle_and_advance_without_selection_is_a_no_op() {
        let mut pane = pane_with(&["a"]);
        pane.cursor = None;
        pane.toggle_and_advance();
        assert!(pane.marked.is_empty());
        assert_eq!(pane.cursor, None);
    }

    #[test]
    fn same_named_file_and_directory_are_marked_independently() {
        let mut pane = PaneState::new(0, "/p", SortSpec::default());
        pane.replace_listing(
            Path::new("/p"),
            vec![
                FileEntry::directory("build", "/p/build", 0),
                FileEntry::file("build", "/p/build", 1, 0),
            ],
            0,
            0,
        );
        pane.toggle_one("build", true);
        assert!(pane.is_marked(&pane.files[0]));
        assert!(!pane.is_marked(&pane.files[1]));
    }

    #[test]
    fn marks_survive_resorting() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.toggle_one("a", false);
        pane.apply_sort(SortSpec::new(SortCriterion::Name, SortDirection::Desc, true));
        assert_eq!(pane.filenames(), vec!["c", "b", "a"]);
        assert!(pane.is_marked(&pane.files[2]));
    }

    #[test]
    fn apply_sort_keeps_cursor_on_same_entry() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.place_cursor(0);
        pane.apply_sort(SortSpec::new(SortCriterion::Name, SortDirection::Desc, true));
        assert_eq!(pane.selected_name(), Some("a"));
        assert_eq!(pane.cursor, Some(2));
    }

    #[test]
    fn refresh_prunes_vanished_marks_and_follows_cursor_name() {
        let mut pane = pane_with(&["a", "b", "c"]);
        pane.mark_all();
        pane.place_cursor(2);
        pane.refresh_listing(vec![
            FileEntry::file("0", "/p/0", 1, 0),
            FileEntry::file("c", "/p/c", 1, 0),
        ]);
        assert_eq!(pane.selected_name(), Some("c"));
        assert_eq!(pane.marked.len(), 1);
    }

    #[test]
    fn reveal_scrolls_cursor_into_view() {
        let names: Vec<String> = (0..50).map(|i| format!("f{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut pane = pane_with(&refs);
        pane.place_cursor(30);
        pane.reveal_cursor(10);
        assert_eq!(pane.scroll_offset, 21);
        assert!(!pane.reveal_requested);
        pane.place_cursor(5);
        pane.reveal_cursor(10);
        assert_eq!(pane.scroll_offset, 5);
    }
}
