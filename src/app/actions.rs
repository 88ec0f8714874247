//! Symbolic actions and their dispatch on App.

use std::fmt;
use std::str::FromStr;

use super::*;
use crate::bookmarks::{is_valid_slot, Bookmark};
use crate::workspace::NavigationOutcome;

/// Everything a keybinding can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    PageUp,
    PageDown,
    Enter,
    Parent,
    Back,
    Forward,
    ToggleMark,
    MarkAll,
    InvertMarks,
    ClearMarks,
    FocusNext,
    FocusPrev,
    AddPane,
    ClosePane,
    ToggleLinked,
    CycleLayout,
    ToggleHidden,
    ToggleCompare,
    Help,
    CycleSort,
    ToggleSortDirection,
    ToggleDirectoriesFirst,
    Refresh,
    Quit,
    JumpBookmark(u8),
    SetBookmark(u8),
}

/// Action names that are not part of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "cursor_up" => Action::CursorUp,
            "cursor_down" => Action::CursorDown,
            "cursor_first" => Action::CursorFirst,
            "cursor_last" => Action::CursorLast,
            "page_up" => Action::PageUp,
            "page_down" => Action::PageDown,
            "enter" => Action::Enter,
            "parent" => Action::Parent,
            "back" => Action::Back,
            "forward" => Action::Forward,
            "toggle_mark" => Action::ToggleMark,
            "mark_all" => Action::MarkAll,
            "invert_marks" => Action::InvertMarks,
            "clear_marks" => Action::ClearMarks,
            "focus_next" => Action::FocusNext,
            "focus_prev" => Action::FocusPrev,
            "add_pane" => Action::AddPane,
            "close_pane" => Action::ClosePane,
            "toggle_linked" => Action::ToggleLinked,
            "cycle_layout" => Action::CycleLayout,
            "toggle_hidden" => Action::ToggleHidden,
            "toggle_compare" => Action::ToggleCompare,
            "help" => Action::Help,
            "cycle_sort" => Action::CycleSort,
            "toggle_sort_direction" => Action::ToggleSortDirection,
            "toggle_directories_first" => Action::ToggleDirectoriesFirst,
            "refresh" => Action::Refresh,
            "quit" => Action::Quit,
            other => {
                let slot = |prefix: &str| {
                    other
                        .strip_prefix(prefix)
                        .and_then(|rest| rest.parse::<u8>().ok())
                        .filter(|slot| is_valid_slot(*slot))
                };
                if let Some(slot) = slot("jump_bookmark_") {
                    Action::JumpBookmark(slot)
                } else if let Some(slot) = slot("set_bookmark_") {
                    Action::SetBookmark(slot)
                } else {
                    return Err(UnknownAction(other.to_string()));
                }
            }
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::CursorUp => "cursor_up",
            Action::CursorDown => "cursor_down",
            Action::CursorFirst => "cursor_first",
            Action::CursorLast => "cursor_last",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Enter => "enter",
            Action::Parent => "parent",
            Action::Back => "back",
            Action::Forward => "forward",
            Action::ToggleMark => "toggle_mark",
            Action::MarkAll => "mark_all",
            Action::InvertMarks => "invert_marks",
            Action::ClearMarks => "clear_marks",
            Action::FocusNext => "focus_next",
            Action::FocusPrev => "focus_prev",
            Action::AddPane => "add_pane",
            Action::ClosePane => "close_pane",
            Action::ToggleLinked => "toggle_linked",
            Action::CycleLayout => "cycle_layout",
            Action::ToggleHidden => "toggle_hidden",
            Action::ToggleCompare => "toggle_compare",
            Action::Help => "help",
            Action::CycleSort => "cycle_sort",
            Action::ToggleSortDirection => "toggle_sort_direction",
            Action::ToggleDirectoriesFirst => "toggle_directories_first",
            Action::Refresh => "refresh",
            Action::Quit => "quit",
            Action::JumpBookmark(slot) => return write!(f, "jump_bookmark_{slot}"),
            Action::SetBookmark(slot) => return write!(f, "set_bookmark_{slot}"),
        };
        f.write_str(name)
    }
}

impl App {
    /// Run one action against the workspace
    pub fn dispatch(&mut self, action: Action) {
        let lister = self.lister;
        let ws = &mut self.workspace;

        match action {
            Action::CursorUp => ws.move_cursor(-1),
            Action::CursorDown => ws.move_cursor(1),
            Action::CursorFirst => ws.cursor_first(),
            Action::CursorLast => ws.cursor_last(),
            Action::PageUp => ws.page_up(),
            Action::PageDown => ws.page_down(),
            Action::Enter => {
                let outcome = ws.enter_selected(&lister);
                self.report_navigation(outcome);
            }
            Action::Parent => {
                let outcome = ws.go_parent(&lister);
                self.report_navigation(outcome);
            }
            Action::Back => {
                let outcome = ws.go_back(&lister);
                self.report_navigation(outcome);
            }
            Action::Forward => {
                let outcome = ws.go_forward(&lister);
                self.report_navigation(outcome);
            }
            Action::ToggleMark => ws.toggle_mark_and_advance(),
            Action::MarkAll => ws.mark_all(),
            Action::InvertMarks => ws.invert_marks(),
            Action::ClearMarks => ws.clear_marks(),
            Action::FocusNext => ws.focus_next(),
            Action::FocusPrev => ws.focus_prev(),
            Action::AddPane => {
                let path = ws.focused_pane().map(|pane| pane.current_path.clone());
                let added = path.and_then(|path| ws.add_pane(&path, &lister));
                if added.is_none() {
                    self.status_warning(format!("At most {MAX_PANES} panes"));
                }
            }
            Action::ClosePane => {
                if !ws.remove_focused_pane() {
                    self.status_warning("Cannot close the last pane");
                }
            }
            Action::ToggleLinked => {
                ws.toggle_linked();
                let message = if ws.is_linked() {
                    "Linked navigation on"
                } else {
                    "Linked navigation off"
                };
                self.status_info(message);
            }
            Action::CycleLayout => ws.cycle_layout(),
            Action::ToggleHidden => ws.toggle_hidden(&lister),
            Action::ToggleCompare => self.show_compare = !self.show_compare,
            Action::Help => self.show_help = !self.show_help,
            Action::CycleSort => ws.cycle_sort_criterion(),
            Action::ToggleSortDirection => ws.toggle_sort_direction(),
            Action::ToggleDirectoriesFirst => ws.toggle_directories_first(),
            Action::Refresh => ws.refresh(&lister),
            Action::Quit => self.should_quit = true,
            Action::JumpBookmark(slot) => self.jump_to_bookmark(slot),
            Action::SetBookmark(slot) => self.bookmark_current_directory(slot),
        }
    }

    fn report_navigation(&mut self, outcome: NavigationOutcome) {
        if outcome == NavigationOutcome::Unlinked {
            self.status_warning("Panes diverged, linked navigation off");
        }
    }

    /// Open the directory stored in `slot` in the focused pane
    pub fn jump_to_bookmark(&mut self, slot: u8) {
        let Some(path) = self.bookmarks.get(slot).map(|b| b.path.clone()) else {
            self.status_warning(format!("No bookmark in slot {slot}"));
            return;
        };
        let lister = self.lister;
        match self.workspace.navigate_to(&path, &lister) {
            NavigationOutcome::Unchanged => {
                if !lister.is_directory(&path) {
                    self.status_error(format!("Bookmark {slot} no longer exists"));
                }
            }
            NavigationOutcome::Moved => {}
            NavigationOutcome::Unlinked => self.status_info("Linked navigation off"),
        }
    }

    /// Store the focused pane's directory in `slot`
    pub fn bookmark_current_directory(&mut self, slot: u8) {
        let Some(path) = self
            .workspace
            .focused_pane()
            .map(|pane| pane.current_path.clone())
        else {
            return;
        };
        let bookmark = Bookmark::for_directory(slot, &path);
        let name = bookmark.name.clone();
        let verb = if self.bookmarks.has_slot(slot) {
            "Replaced bookmark"
        } else {
            "Bookmarked"
        };
        match self.bookmarks.set(bookmark) {
            Ok(()) => self.status_success(format!("{verb} {name} as {slot}")),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save bookmark");
                self.status_error(format!("Failed to save bookmark: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_round_trip() {
        for action in [
            Action::CursorDown,
            Action::ToggleDirectoriesFirst,
            Action::JumpBookmark(3),
            Action::SetBookmark(9),
        ] {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn unknown_and_out_of_range_names_are_rejected() {
        assert!("teleport".parse::<Action>().is_err());
        assert!("jump_bookmark_0".parse::<Action>().is_err());
        assert!("set_bookmark_10".parse::<Action>().is_err());
    }

    #[test]
    fn every_default_binding_names_a_known_action() {
        for definition in crate::input::defaults::default_definitions() {
            assert!(
                definition.action.parse::<Action>().is_ok(),
                "{} is not an action",
                definition.action
            );
        }
    }
}
