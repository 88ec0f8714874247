//! Directory navigation on Workspace.

use super::*;
use crate::fs::{join_child, parent_of};
use crate::history::find_subdirectory_in_parent;

/// What a navigation request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Nothing moved
    Unchanged,
    /// The focused pane (and any linked panes) moved
    Moved,
    /// Linked mode was turned off; the focused pane moved on its own if it
    /// could
    Unlinked,
}

/// Which end of the back/forward stack to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryDirection {
    Back,
    Forward,
}

impl Workspace {
    /// Enter the directory under the focused cursor.
    ///
    /// When linked, every pane enters its own child directory of that name or,
    /// if any pane can't, linked mode is turned off and only the focused pane
    /// moves.
    pub fn enter_selected(&mut self, lister: &dyn DirectoryLister) -> NavigationOutcome {
        let Some(entry) = self.focused_pane().and_then(PaneState::selected) else {
            return NavigationOutcome::Unchanged;
        };
        if !entry.is_directory {
            return NavigationOutcome::Unchanged;
        }
        let name = entry.name.clone();
        self.linked_step(LinkedStep::Enter(&name), lister)
    }

    /// Go to the parent directory, with the cursor on the directory just left.
    pub fn go_parent(&mut self, lister: &dyn DirectoryLister) -> NavigationOutcome {
        self.linked_step(LinkedStep::Parent, lister)
    }

    pub fn go_back(&mut self, lister: &dyn DirectoryLister) -> NavigationOutcome {
        self.walk_history(HistoryDirection::Back, lister)
    }

    pub fn go_forward(&mut self, lister: &dyn DirectoryLister) -> NavigationOutcome {
        self.walk_history(HistoryDirection::Forward, lister)
    }

    /// Send the focused pane to an arbitrary directory (bookmark jump).
    ///
    /// Other panes don't follow, so an active link is dropped.
    pub fn navigate_to(&mut self, path: &Path, lister: &dyn DirectoryLister) -> NavigationOutcome {
        let focused = self.focused;
        let Some(pane) = self.panes.get(focused) else {
            return NavigationOutcome::Unchanged;
        };
        if !lister.is_directory(path) {
            tracing::warn!(path = %path.display(), "navigation target is not a directory");
            return NavigationOutcome::Unchanged;
        }
        if pane.current_path == path {
            return NavigationOutcome::Unchanged;
        }

        let unlinked = self.linked_indicator_visible();
        if unlinked {
            self.unlink(&Divergence::Jumped { pane: focused });
        }
        self.load_directory(focused, path, lister, Arrival::Restore, true);
        if unlinked {
            NavigationOutcome::Unlinked
        } else {
            NavigationOutcome::Moved
        }
    }

    fn linked_step(&mut self, step: LinkedStep<'_>, lister: &dyn DirectoryLister) -> NavigationOutcome {
        if self.linked_indicator_visible() {
            let resolved = resolve_targets(&self.panes, step).and_then(|targets| {
                match targets.iter().position(|target| !lister.is_directory(target)) {
                    Some(pane) => Err(Divergence::Unreadable {
                        pane,
                        path: targets[pane].clone(),
                    }),
                    None => Ok(targets),
                }
            });

            match resolved {
                Ok(targets) => {
                    for (index, target) in targets.iter().enumerate() {
                        let arrival = Arrival::for_step(step, &self.panes[index].current_path);
                        self.load_directory(index, target, lister, arrival, true);
                    }
                    self.sync_linked_cursor();
                    return NavigationOutcome::Moved;
                }
                Err(reason) => {
                    self.unlink(&reason);
                    self.single_step(self.focused, step, lister);
                    return NavigationOutcome::Unlinked;
                }
            }
        }

        if self.single_step(self.focused, step, lister) {
            NavigationOutcome::Moved
        } else {
            NavigationOutcome::Unchanged
        }
    }

    /// Apply `step` to one pane; returns whether it moved.
    fn single_step(&mut self, index: usize, step: LinkedStep<'_>, lister: &dyn DirectoryLister) -> bool {
        let Some(pane) = self.panes.get(index) else {
            return false;
        };
        let target = match step {
            LinkedStep::Enter(name) => pane
                .has_directory(name)
                .then(|| join_child(&pane.current_path, name)),
            LinkedStep::Parent => parent_of(&pane.current_path),
        };
        let Some(target) = target else {
            return false;
        };
        if !lister.is_directory(&target) {
            tracing::warn!(path = %target.display(), "cannot open directory");
            return false;
        }
        let arrival = Arrival::for_step(step, &pane.current_path);
        self.load_directory(index, &target, lister, arrival, true);
        true
    }

    /// Walk every linked pane one step through its own history, or only the
    /// focused pane when unlinked.
    ///
    /// Targets are checked before any stack moves, so a pane that can't
    /// follow leaves every history intact and drops linked mode.
    fn walk_history(&mut self, direction: HistoryDirection, lister: &dyn DirectoryLister) -> NavigationOutcome {
        if self.linked_indicator_visible() {
            let resolved: Result<Vec<PathBuf>, Divergence> = (0..self.panes.len())
                .map(|pane| {
                    let target = self
                        .history_target(pane, direction)
                        .ok_or(Divergence::NoHistory { pane })?;
                    if lister.is_directory(&target) {
                        Ok(target)
                    } else {
                        Err(Divergence::Unreadable { pane, path: target })
                    }
                })
                .collect();

            return match resolved {
                Ok(targets) => {
                    for (index, target) in targets.iter().enumerate() {
                        self.commit_history_step(index, direction);
                        self.load_directory(index, target, lister, Arrival::Restore, false);
                    }
                    self.sync_linked_cursor();
                    NavigationOutcome::Moved
                }
                Err(reason) => {
                    self.unlink(&reason);
                    self.single_history_step(self.focused, direction, lister);
                    NavigationOutcome::Unlinked
                }
            };
        }

        if self.single_history_step(self.focused, direction, lister) {
            NavigationOutcome::Moved
        } else {
            NavigationOutcome::Unchanged
        }
    }

    /// Walk one pane through its history; returns whether it moved.
    fn single_history_step(
        &mut self,
        index: usize,
        direction: HistoryDirection,
        lister: &dyn DirectoryLister,
    ) -> bool {
        let Some(target) = self.history_target(index, direction) else {
            return false;
        };
        if !lister.is_directory(&target) {
            tracing::warn!(path = %target.display(), "history entry no longer exists");
            return false;
        }
        self.commit_history_step(index, direction);
        self.load_directory(index, &target, lister, Arrival::Restore, false);
        true
    }

    fn history_target(&self, index: usize, direction: HistoryDirection) -> Option<PathBuf> {
        let pane_id = self.panes.get(index)?.pane_id;
        let target = match direction {
            HistoryDirection::Back => self.history.peek_back(pane_id),
            HistoryDirection::Forward => self.history.peek_forward(pane_id),
        };
        target.map(Path::to_path_buf)
    }

    /// Move the pane's back/forward stack by one step. Must run before the
    /// pane's path changes.
    fn commit_history_step(&mut self, index: usize, direction: HistoryDirection) {
        let Some(pane) = self.panes.get(index) else {
            return;
        };
        match direction {
            HistoryDirection::Back => {
                self.history.navigate_back(pane.pane_id, &pane.current_path);
            }
            HistoryDirection::Forward => {
                self.history.navigate_forward(pane.pane_id, &pane.current_path);
            }
        }
    }

    /// Switch pane `index` to `target`, remembering where it was.
    fn load_directory(
        &mut self,
        index: usize,
        target: &Path,
        lister: &dyn DirectoryLister,
        arrival: Arrival,
        record: bool,
    ) {
        let files = self.list(target, lister);
        let pane = &mut self.panes[index];

        self.history.save_cursor_position(
            pane.pane_id,
            &pane.current_path,
            pane.selected_name(),
            pane.cursor.unwrap_or(0),
            pane.scroll_offset,
        );
        if record {
            self.history.record_navigation(pane.pane_id, &pane.current_path);
        }

        pane.replace_listing(target, files, 0, 0);
        match arrival {
            Arrival::Restore => restore_cursor(&self.history, pane),
            Arrival::FromChild(child) => {
                let index = find_subdirectory_in_parent(&child, &pane.files);
                pane.place_cursor(index);
            }
        }
        tracing::debug!(pane_id = pane.pane_id, path = %target.display(), "directory entered");
    }
}

/// How to place the cursor in a directory being entered
enum Arrival {
    /// From the pane's history for that directory
    Restore,
    /// On the child directory just left
    FromChild(PathBuf),
}

impl Arrival {
    fn for_step(step: LinkedStep<'_>, current: &Path) -> Self {
        match step {
            LinkedStep::Enter(_) => Self::Restore,
            LinkedStep::Parent => Self::FromChild(current.to_path_buf()),
        }
    }
}
