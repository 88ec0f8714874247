//! The multi-pane workspace.
//!
//! A [`Workspace`] owns the panes, the focus, the layout mode, the linked flag
//! and the directory history. Directory contents come from a
//! [`DirectoryLister`] passed into each operation that needs one, so the
//! workspace itself never touches the disk.

mod linked;
mod navigation;
mod pane;

use std::path::{Path, PathBuf};

use crate::compare::EnhancedComparisonIndex;
use crate::fs::{DirectoryLister, FileEntry};
use crate::history::{DirectoryHistory, PaneId};
use crate::layout::{calculate_layout, LayoutMode, LayoutRect};
use crate::sort::SortSpec;

pub use linked::{resolve_targets, sync_cursor_by_name, Divergence, LinkedStep};
pub use navigation::NavigationOutcome;
pub use pane::{MarkKey, PaneState};

/// Upper bound on open panes
pub const MAX_PANES: usize = 4;

/// Rows moved by page up/down until the renderer reports the real height
const DEFAULT_PAGE_SIZE: usize = 20;

/// Initial workspace settings, usually taken from the user config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkspaceSettings {
    pub layout_mode: LayoutMode,
    pub linked: bool,
    pub show_hidden: bool,
    pub sort: SortSpec,
}

/// Panes plus the state shared between them
#[derive(Debug)]
pub struct Workspace {
    panes: Vec<PaneState>,
    focused: usize,
    layout_mode: LayoutMode,
    linked: bool,
    show_hidden: bool,
    default_sort: SortSpec,
    history: DirectoryHistory,
    next_pane_id: PaneId,
    page_size: usize,
}

impl Workspace {
    /// Create a workspace without panes.
    pub fn new(settings: WorkspaceSettings, history: DirectoryHistory) -> Self {
        Self {
            panes: Vec::new(),
            focused: 0,
            layout_mode: settings.layout_mode,
            linked: settings.linked,
            show_hidden: settings.show_hidden,
            default_sort: settings.sort,
            history,
            next_pane_id: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a workspace with one pane per path.
    pub fn with_panes(
        settings: WorkspaceSettings,
        history: DirectoryHistory,
        paths: &[PathBuf],
        lister: &dyn DirectoryLister,
    ) -> Self {
        let mut workspace = Self::new(settings, history);
        for path in paths.iter().take(MAX_PANES) {
            workspace.add_pane(path, lister);
        }
        workspace.focused = 0;
        workspace
    }

    // --- Accessors ---

    pub fn panes(&self) -> &[PaneState] {
        &self.panes
    }

    pub fn pane(&self, index: usize) -> Option<&PaneState> {
        self.panes.get(index)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn focused_pane(&self) -> Option<&PaneState> {
        self.panes.get(self.focused)
    }

    pub fn focused_pane_mut(&mut self) -> Option<&mut PaneState> {
        self.panes.get_mut(self.focused)
    }

    pub fn history(&self) -> &DirectoryHistory {
        &self.history
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows moved by page up/down
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    // --- Panes ---

    /// Open a new pane at `path` and focus it. Returns its index, or `None`
    /// when the pane limit is reached.
    pub fn add_pane(&mut self, path: &Path, lister: &dyn DirectoryLister) -> Option<usize> {
        if self.panes.len() >= MAX_PANES {
            tracing::debug!(max = MAX_PANES, "pane limit reached");
            return None;
        }
        let pane_id = self.next_pane_id;
        self.next_pane_id += 1;

        let mut pane = PaneState::new(pane_id, path, self.default_sort);
        let files = self.list(path, lister);
        pane.replace_listing(path, files, 0, 0);
        restore_cursor(&self.history, &mut pane);

        self.panes.push(pane);
        self.focused = self.panes.len() - 1;
        tracing::debug!(pane_id, path = %path.display(), "pane opened");
        Some(self.focused)
    }

    /// Close the pane at `index`. The last remaining pane cannot be closed.
    pub fn remove_pane(&mut self, index: usize) -> bool {
        if self.panes.len() <= 1 || index >= self.panes.len() {
            return false;
        }
        let pane = self.panes.remove(index);
        self.history.forget_pane(pane.pane_id);
        if self.focused >= self.panes.len() || self.focused > index {
            self.focused = self.focused.saturating_sub(1);
        }
        tracing::debug!(pane_id = pane.pane_id, "pane closed");
        true
    }

    /// Close the focused pane
    pub fn remove_focused_pane(&mut self) -> bool {
        self.remove_pane(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.panes.is_empty() {
            self.focused = (self.focused + 1) % self.panes.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.panes.is_empty() {
            self.focused = (self.focused + self.panes.len() - 1) % self.panes.len();
        }
    }

    /// Focus a pane by index (mouse click). Out-of-range indices are ignored.
    pub fn focus(&mut self, index: usize) {
        if index < self.panes.len() {
            self.focused = index;
        }
    }

    // --- Layout ---

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
    }

    pub fn cycle_layout(&mut self) {
        self.layout_mode = self.layout_mode.cycle();
    }

    /// Pane rectangles for a container of the given size
    pub fn layout(&self, width: i64, height: i64) -> Vec<LayoutRect> {
        calculate_layout(width, height, self.panes.len(), self.layout_mode)
    }

    // --- Linked mode ---

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
        if linked {
            self.sync_linked_cursor();
        }
    }

    pub fn toggle_linked(&mut self) {
        self.set_linked(!self.linked);
    }

    /// Linked mode only means something with two or more panes
    pub fn linked_indicator_visible(&self) -> bool {
        self.linked && self.panes.len() >= 2
    }

    /// Mirror the focused pane's cursor onto the other panes when linked
    pub(crate) fn sync_linked_cursor(&mut self) {
        if self.linked_indicator_visible() {
            sync_cursor_by_name(&mut self.panes, self.focused);
        }
    }

    fn unlink(&mut self, reason: &Divergence) {
        self.linked = false;
        tracing::info!(%reason, "linked navigation diverged, linked mode turned off");
    }

    // --- Comparison ---

    /// Cross-pane comparison of the current listings
    pub fn comparison_index(&self) -> EnhancedComparisonIndex {
        let lists: Vec<&[FileEntry]> = self.panes.iter().map(|pane| pane.files.as_slice()).collect();
        EnhancedComparisonIndex::build(&lists)
    }

    // --- Cursor ---

    /// Move the focused cursor by `delta`
    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.move_cursor(delta);
        }
        self.sync_linked_cursor();
    }

    pub fn page_up(&mut self) {
        self.move_cursor(-(self.page_size as isize));
    }

    pub fn page_down(&mut self) {
        self.move_cursor(self.page_size as isize);
    }

    pub fn cursor_first(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.cursor_first();
        }
        self.sync_linked_cursor();
    }

    pub fn cursor_last(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.cursor_last();
        }
        self.sync_linked_cursor();
    }

    /// Put the focused cursor at `index` (mouse click)
    pub fn select(&mut self, index: usize) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.place_cursor(index);
        }
        self.sync_linked_cursor();
    }

    /// Apply pending scroll-into-view requests, `rows[i]` being the visible
    /// height of pane `i`.
    pub fn apply_reveals(&mut self, rows: &[usize]) {
        for (pane, &rows) in self.panes.iter_mut().zip(rows) {
            if pane.reveal_requested {
                pane.reveal_cursor(rows);
            }
        }
    }

    // --- Marks ---

    pub fn toggle_mark_and_advance(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.toggle_and_advance();
        }
        self.sync_linked_cursor();
    }

    pub fn mark_all(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.mark_all();
        }
    }

    pub fn invert_marks(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.invert();
        }
    }

    pub fn clear_marks(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.clear_marks();
        }
    }

    // --- Sorting ---

    /// Re-sort the focused pane, keeping its cursor on the same entry
    pub fn set_sort(&mut self, sort: SortSpec) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.apply_sort(sort);
        }
        self.sync_linked_cursor();
    }

    pub fn cycle_sort_criterion(&mut self) {
        if let Some(mut sort) = self.focused_pane().map(|pane| pane.sort) {
            sort.criterion = sort.criterion.next();
            self.set_sort(sort);
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        if let Some(mut sort) = self.focused_pane().map(|pane| pane.sort) {
            sort.direction = sort.direction.toggle();
            self.set_sort(sort);
        }
    }

    pub fn toggle_directories_first(&mut self) {
        if let Some(mut sort) = self.focused_pane().map(|pane| pane.sort) {
            sort.directories_first = !sort.directories_first;
            self.set_sort(sort);
        }
    }

    // --- Listing ---

    /// Show or hide dotfiles in every pane
    pub fn toggle_hidden(&mut self, lister: &dyn DirectoryLister) {
        self.show_hidden = !self.show_hidden;
        self.refresh(lister);
    }

    /// Reload every pane's listing in place
    pub fn refresh(&mut self, lister: &dyn DirectoryLister) {
        for index in 0..self.panes.len() {
            let files = self.list(&self.panes[index].current_path, lister);
            self.panes[index].refresh_listing(files);
        }
        self.sync_linked_cursor();
    }

    /// List a directory, applying the hidden-file filter
    fn list(&self, path: &Path, lister: &dyn DirectoryLister) -> Vec<FileEntry> {
        let mut files = lister.list(path);
        if !self.show_hidden {
            files.retain(|entry| !entry.is_hidden());
        }
        files
    }
}

/// Place a freshly listed pane's cursor from history.
///
/// Restoring runs against the sorted listing the pane shows.
fn restore_cursor(history: &DirectoryHistory, pane: &mut PaneState) {
    let restored = history.restore_cursor_position(pane.pane_id, &pane.current_path, &pane.filenames());
    pane.place_cursor(restored.cursor);
    pane.scroll_offset = restored.scroll_offset;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryLister;

    fn lister() -> MemoryLister {
        MemoryLister::new()
            .with_dir(
                "/a",
                vec![
                    FileEntry::file("one.txt", "", 10, 0),
                    FileEntry::file(".hidden", "", 1, 0),
                ],
            )
            .with_dir("/b", vec![FileEntry::file("one.txt", "", 20, 0)])
    }

    fn workspace(paths: &[&str]) -> Workspace {
        let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
        Workspace::with_panes(
            WorkspaceSettings::default(),
            DirectoryHistory::new(),
            &paths,
            &lister(),
        )
    }

    #[test]
    fn hidden_files_are_filtered_until_toggled() {
        let mut ws = workspace(&["/a"]);
        assert_eq!(ws.panes()[0].filenames(), vec!["one.txt"]);
        ws.toggle_hidden(&lister());
        assert_eq!(ws.panes()[0].filenames(), vec![".hidden", "one.txt"]);
    }

    #[test]
    fn pane_count_is_capped() {
        let mut ws = workspace(&["/a", "/b", "/a", "/b"]);
        assert_eq!(ws.pane_count(), MAX_PANES);
        assert_eq!(ws.add_pane(Path::new("/a"), &lister()), None);
    }

    #[test]
    fn last_pane_cannot_be_closed() {
        let mut ws = workspace(&["/a", "/b"]);
        ws.focus(1);
        assert!(ws.remove_focused_pane());
        assert_eq!(ws.focused_index(), 0);
        assert!(!ws.remove_focused_pane());
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut ws = workspace(&["/a", "/b", "/a"]);
        ws.focus_prev();
        assert_eq!(ws.focused_index(), 2);
        ws.focus_next();
        assert_eq!(ws.focused_index(), 0);
    }

    #[test]
    fn linked_indicator_needs_two_panes() {
        let mut ws = workspace(&["/a"]);
        ws.set_linked(true);
        assert!(ws.is_linked());
        assert!(!ws.linked_indicator_visible());
        ws.add_pane(Path::new("/b"), &lister());
        assert!(ws.linked_indicator_visible());
    }

    #[test]
    fn comparison_index_covers_shared_names() {
        let ws = workspace(&["/a", "/b"]);
        let index = ws.comparison_index();
        assert_eq!(index.shared_filenames(), vec!["one.txt"]);
    }

    #[test]
    fn layout_uses_pane_count_and_mode() {
        let mut ws = workspace(&["/a", "/b"]);
        assert_eq!(ws.layout(100, 40).len(), 2);
        ws.set_layout_mode(LayoutMode::Fullscreen);
        assert!(ws.layout(100, 40).iter().all(|rect| rect.width == 100));
    }
}
