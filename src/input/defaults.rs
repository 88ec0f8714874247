//! Built-in keymap used when no keybindings file exists.

use super::keybinding::{ChordDefinition, KeyCategory};
use super::Modifiers;

/// Default chord definitions in priority order.
///
/// Some actions have more than one key (vim keys plus arrows); the reverse
/// lookup shown in the help overlay returns the last one listed.
pub fn default_definitions() -> Vec<ChordDefinition> {
    use KeyCategory::*;

    let none = Modifiers::NONE;
    let mut definitions = vec![
        // Navigation
        ChordDefinition::new("j", none, "cursor_down", "Move cursor down", Navigation),
        ChordDefinition::new("ArrowDown", none, "cursor_down", "Move cursor down", Navigation),
        ChordDefinition::new("k", none, "cursor_up", "Move cursor up", Navigation),
        ChordDefinition::new("ArrowUp", none, "cursor_up", "Move cursor up", Navigation),
        ChordDefinition::new("g", none, "cursor_first", "Go to first entry", Navigation),
        ChordDefinition::new("Home", none, "cursor_first", "Go to first entry", Navigation),
        ChordDefinition::new("G", Modifiers::shift(), "cursor_last", "Go to last entry", Navigation),
        ChordDefinition::new("End", none, "cursor_last", "Go to last entry", Navigation),
        ChordDefinition::new("PageUp", none, "page_up", "Page up", Navigation),
        ChordDefinition::new("PageDown", none, "page_down", "Page down", Navigation),
        ChordDefinition::new("l", none, "enter", "Open directory", Navigation),
        ChordDefinition::new("ArrowRight", none, "enter", "Open directory", Navigation),
        ChordDefinition::new("Enter", none, "enter", "Open directory", Navigation),
        ChordDefinition::new("h", none, "parent", "Go to parent directory", Navigation),
        ChordDefinition::new("ArrowLeft", none, "parent", "Go to parent directory", Navigation),
        ChordDefinition::new("Backspace", none, "parent", "Go to parent directory", Navigation),
        ChordDefinition::new("ArrowLeft", Modifiers::alt(), "back", "Go back", Navigation),
        ChordDefinition::new("ArrowRight", Modifiers::alt(), "forward", "Go forward", Navigation),
        // Selection
        ChordDefinition::new(" ", none, "toggle_mark", "Mark entry and advance", Selection),
        ChordDefinition::new("a", Modifiers::ctrl(), "mark_all", "Mark all entries", Selection),
        ChordDefinition::new("*", none, "invert_marks", "Invert marks", Selection),
        ChordDefinition::new("Escape", none, "clear_marks", "Clear marks", Selection),
        // Panes
        ChordDefinition::new("Tab", none, "focus_next", "Focus next pane", Panes),
        ChordDefinition::new("Tab", Modifiers::shift(), "focus_prev", "Focus previous pane", Panes),
        ChordDefinition::new("n", Modifiers::ctrl(), "add_pane", "Open a new pane", Panes),
        ChordDefinition::new("w", Modifiers::ctrl(), "close_pane", "Close focused pane", Panes),
        ChordDefinition::new("l", Modifiers::ctrl(), "toggle_linked", "Toggle linked navigation", Panes),
        // View
        ChordDefinition::new("t", Modifiers::ctrl(), "cycle_layout", "Cycle layout", View),
        ChordDefinition::new(".", none, "toggle_hidden", "Show/hide hidden files", View),
        ChordDefinition::new("c", none, "toggle_compare", "Toggle comparison highlighting", View),
        ChordDefinition::new("?", none, "help", "Show keybindings", View),
        // Sort
        ChordDefinition::new("s", none, "cycle_sort", "Cycle sort criterion", Sort),
        ChordDefinition::new("S", Modifiers::shift(), "toggle_sort_direction", "Reverse sort", Sort),
        ChordDefinition::new("d", none, "toggle_directories_first", "Toggle directories first", Sort),
        // Application
        ChordDefinition::new("r", none, "refresh", "Reload listings", Application),
        ChordDefinition::new("q", none, "quit", "Quit", Application),
    ];

    for slot in 1..=9u8 {
        let key = slot.to_string();
        definitions.push(ChordDefinition::new(
            key.clone(),
            none,
            format!("jump_bookmark_{slot}"),
            format!("Jump to bookmark {slot}"),
            Bookmarks,
        ));
        definitions.push(ChordDefinition::new(
            key,
            Modifiers::alt(),
            format!("set_bookmark_{slot}"),
            format!("Bookmark current directory as {slot}"),
            Bookmarks,
        ));
    }

    definitions
}
