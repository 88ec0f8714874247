//! Linked navigation across panes.
//!
//! Cursor moves are mirrored by name: every other pane looks the name up in
//! its own listing. Directory moves are resolved per pane from that pane's own
//! path, and a move that cannot be resolved for every pane is reported as a
//! [`Divergence`] so the caller can drop out of linked mode.

use std::path::PathBuf;

use thiserror::Error;

use super::pane::PaneState;
use crate::fs::{join_child, parent_of};

/// A directory move to apply to every linked pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedStep<'a> {
    /// Enter the child directory with this name
    Enter(&'a str),
    /// Go to the parent directory
    Parent,
}

/// Why a linked move could not be applied uniformly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Divergence {
    #[error("pane {pane} has no directory named {name:?}")]
    MissingDirectory { pane: usize, name: String },
    #[error("pane {pane} is already at the filesystem root")]
    AtRoot { pane: usize },
    #[error("pane {pane} cannot open {}", path.display())]
    Unreadable { pane: usize, path: PathBuf },
    #[error("pane {pane} has no history in that direction")]
    NoHistory { pane: usize },
    #[error("pane {pane} jumped to an unrelated directory")]
    Jumped { pane: usize },
}

/// Mirror the cursor of `source` onto every other pane.
///
/// A pane that lists the same name gets its cursor there and a reveal
/// request; a pane that doesn't loses its selection. When `source` has no
/// selection every other pane is cleared too.
pub fn sync_cursor_by_name(panes: &mut [PaneState], source: usize) {
    let Some(source_pane) = panes.get(source) else {
        return;
    };
    let name = source_pane.selected_name().map(str::to_string);

    for (index, pane) in panes.iter_mut().enumerate() {
        if index == source {
            continue;
        }
        pane.cursor = name.as_deref().and_then(|name| pane.position_of(name));
        if pane.cursor.is_some() {
            pane.reveal_requested = true;
        }
    }
}

/// Compute each pane's own target for `step`.
///
/// Targets are derived lexically from each pane's current path; a pane that
/// does not list the child directory, or is already at the root, makes the
/// whole step diverge.
pub fn resolve_targets(panes: &[PaneState], step: LinkedStep<'_>) -> Result<Vec<PathBuf>, Divergence> {
    panes
        .iter()
        .enumerate()
        .map(|(index, pane)| match step {
            LinkedStep::Enter(name) => {
                if pane.has_directory(name) {
                    Ok(join_child(&pane.current_path, name))
                } else {
                    Err(Divergence::MissingDirectory {
                        pane: index,
                        name: name.to_string(),
                    })
                }
            }
            LinkedStep::Parent => {
                parent_of(&pane.current_path).ok_or(Divergence::AtRoot { pane: index })
            }
        })
        .collect()
}
