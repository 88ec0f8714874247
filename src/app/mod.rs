//! Application state for the panedeck terminal front-end.
//!
//! The front-end owns a [`Workspace`], the keybinding registry and the
//! bookmark store, and turns key events into workspace operations.

mod actions;
mod state;

use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;

use crate::bookmarks::BookmarkManager;
use crate::config::Config;
use crate::fs::{DirectoryLister, LocalLister};
use crate::history::{default_history_path, DirectoryHistory};
use crate::input::{KeyChord, KeybindingRegistry};
use crate::workspace::{Workspace, MAX_PANES};

pub use actions::{Action, UnknownAction};
pub use state::{StatusKind, StatusMessage};

/// Application state
pub struct App {
    /// Panes, focus, history
    pub workspace: Workspace,
    /// Active keymap
    pub registry: KeybindingRegistry,
    /// Bookmarked directories
    pub bookmarks: BookmarkManager,
    /// Loaded configuration
    pub config: Config,
    /// Disk access for listings
    lister: LocalLister,
    /// Where history is persisted, if anywhere
    history_path: Option<PathBuf>,
    /// Transient message for the status line
    pub status: Option<StatusMessage>,
    /// Whether the keybinding overlay is shown
    pub show_help: bool,
    /// Whether comparison highlighting is shown
    pub show_compare: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Terminal size (width, height)
    pub term_size: (u16, u16),
}

impl App {
    /// Create the application with panes at `paths` (the current directory
    /// when empty).
    pub fn new(paths: Vec<PathBuf>) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Config::default()
        });

        let registry = Config::keybindings_path()
            .and_then(|path| KeybindingRegistry::load_or_default(&path))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to load keybindings, using defaults");
                KeybindingRegistry::with_defaults()
            });

        let bookmarks = BookmarkManager::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load bookmarks");
            BookmarkManager::empty()
        });

        let history_path = default_history_path().ok();
        let history = history_path
            .as_deref()
            .map(|path| {
                DirectoryHistory::load(path).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "failed to load history");
                    DirectoryHistory::new()
                })
            })
            .unwrap_or_default();

        let paths = if paths.is_empty() {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            vec![cwd; config.layout.pane_count]
        } else {
            paths
        };
        let paths = paths
            .into_iter()
            .map(|path| std::fs::canonicalize(&path).unwrap_or(path))
            .collect::<Vec<_>>();

        Ok(Self::with_parts(config, registry, bookmarks, history, history_path, &paths))
    }

    fn with_parts(
        config: Config,
        registry: KeybindingRegistry,
        bookmarks: BookmarkManager,
        history: DirectoryHistory,
        history_path: Option<PathBuf>,
        paths: &[PathBuf],
    ) -> Self {
        let lister = LocalLister::new();
        let workspace = Workspace::with_panes(config.workspace_settings(), history, paths, &lister);

        let mut app = Self {
            workspace,
            registry,
            bookmarks,
            config,
            lister,
            history_path,
            status: None,
            show_help: false,
            show_compare: false,
            should_quit: false,
            term_size: (0, 0),
        };

        let errors = app
            .registry
            .diagnostics()
            .iter()
            .filter(|d| d.severity == crate::input::Severity::Error)
            .count();
        if errors > 0 {
            app.status_warning(format!("{errors} invalid keybinding(s) ignored"));
        }
        app
    }

    /// Resolve a key event and run its action. Returns whether a binding
    /// matched.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(chord) = KeyChord::from_key_event(&key) else {
            return false;
        };

        // Escape closes the help overlay before it reaches the keymap
        if self.show_help && chord.key == "Escape" {
            self.show_help = false;
            return true;
        }

        let Some(name) = self.registry.match_chord(&chord) else {
            return false;
        };
        match name.parse::<Action>() {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "binding points at an unknown action");
                self.status_warning(e.to_string());
                false
            }
        }
    }

    /// Handle terminal resize
    pub fn resize(&mut self, width: u16, height: u16) {
        self.term_size = (width, height);
    }

    /// Drop an expired status message
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
    }

    /// Persist history before exit
    pub fn save_state(&self) -> Result<()> {
        if let Some(path) = &self.history_path {
            self.workspace
                .history()
                .save(path)
                .context("Failed to save directory history")?;
        }
        Ok(())
    }

    pub fn status_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusKind::Info));
    }

    pub fn status_success(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusKind::Success));
    }

    pub fn status_warning(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusKind::Warning));
    }

    pub fn status_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusKind::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_in(dir: &std::path::Path) -> App {
        App::with_parts(
            Config::default(),
            KeybindingRegistry::with_defaults(),
            BookmarkManager::empty(),
            DirectoryHistory::new(),
            None,
            &[dir.to_path_buf(), dir.to_path_buf()],
        )
    }

    #[test]
    fn keys_drive_the_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        let mut app = app_in(dir.path());

        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert_eq!(app.workspace.panes()[0].selected_name(), Some("b.txt"));

        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)));
        assert!(app.workspace.is_linked());
        assert_eq!(app.workspace.panes()[1].selected_name(), Some("b.txt"));

        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(app.should_quit);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)));
    }

    #[test]
    fn bookmarks_can_be_set_and_jumped_to() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut app = app_in(dir.path());

        app.dispatch(Action::SetBookmark(1));
        assert!(app.status.as_ref().unwrap().text.starts_with("Bookmarked"));
        app.dispatch(Action::Enter);
        assert_eq!(app.workspace.panes()[0].current_path, dir.path().join("sub"));

        app.dispatch(Action::JumpBookmark(1));
        assert_eq!(app.workspace.panes()[0].current_path, dir.path());

        app.dispatch(Action::SetBookmark(1));
        assert!(app.status.as_ref().unwrap().text.starts_with("Replaced bookmark"));
    }
}
