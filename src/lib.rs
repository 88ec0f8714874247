//! panedeck library crate.
//!
//! This library provides the workspace coordination core of a multi-pane
//! file manager, including:
//! - Pane layout geometry
//! - Sorting and cross-pane comparison of directory listings
//! - Per-directory cursor history and back/forward navigation
//! - Keybinding registration and matching
//! - Linked navigation and marks across panes
//!
//! plus the terminal front-end built on top of it.

pub mod app;
pub mod bookmarks;
pub mod compare;
pub mod config;
pub mod fs;
pub mod history;
pub mod input;
pub mod layout;
pub mod logging;
pub mod sort;
pub mod ui;
pub mod workspace;
