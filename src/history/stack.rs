//! Browser-style back/forward stack.

use std::path::{Path, PathBuf};

/// Maximum number of entries kept on the back stack
const MAX_BACK_ENTRIES: usize = 100;

/// Back/forward navigation for a single pane.
///
/// Visiting a new location pushes the location being left onto the back stack
/// and drops the forward branch; going back and forward moves the current
/// location between the two stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a forward navigation away from `from`.
    pub fn push(&mut self, from: &Path) {
        if self.back.last().map(PathBuf::as_path) != Some(from) {
            self.back.push(from.to_path_buf());
            if self.back.len() > MAX_BACK_ENTRIES {
                self.back.remove(0);
            }
        }
        self.forward.clear();
    }

    /// Step back from `current`, or `None` when there is nothing behind.
    pub fn go_back(&mut self, current: &Path) -> Option<PathBuf> {
        let previous = self.back.pop()?;
        self.forward.push(current.to_path_buf());
        Some(previous)
    }

    /// Step forward from `current`, or `None` at the newest location.
    pub fn go_forward(&mut self, current: &Path) -> Option<PathBuf> {
        let next = self.forward.pop()?;
        self.back.push(current.to_path_buf());
        Some(next)
    }

    /// Where [`NavigationStack::go_back`] would lead, without moving
    pub fn peek_back(&self) -> Option<&Path> {
        self.back.last().map(PathBuf::as_path)
    }

    /// Where [`NavigationStack::go_forward`] would lead, without moving
    pub fn peek_forward(&self) -> Option<&Path> {
        self.forward.last().map(PathBuf::as_path)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}
