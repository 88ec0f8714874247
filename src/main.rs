use panedeck::app::{Action, App};
use panedeck::layout::{pane_at, LayoutMode, LayoutRect};
use panedeck::workspace::Workspace;
use panedeck::{logging, ui};

use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        poll, read, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

fn main() -> Result<()> {
    // Check if we're in a proper terminal
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("panedeck must be run in an interactive terminal");
    }

    let _logging = logging::init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let mut app = App::new(paths).context("Failed to initialize application")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Get initial terminal size
    let size = terminal.size().context("Failed to get terminal size")?;
    app.resize(size.width, size.height);

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal (always try to restore even on error)
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    if let Err(e) = app.save_state() {
        tracing::warn!(error = %e, "failed to persist state");
    }
    tracing::info!("exiting");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        // Keep page size and scroll positions in step with the pane sizes
        let screen = Rect::new(0, 0, app.term_size.0, app.term_size.1);
        let rows = ui::pane_rows(app, screen);
        if let Some(&focused_rows) = rows.get(app.workspace.focused_index()) {
            app.workspace.set_page_size(focused_rows);
        }
        app.workspace.apply_reveals(&rows);

        // Draw UI
        terminal.draw(|f| ui::draw(f, app))?;

        if poll(Duration::from_millis(250))? {
            match read()? {
                Event::Key(key) => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse, screen),
                Event::Resize(w, h) => app.resize(w, h),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Click focuses a pane and selects the row under the pointer; the wheel
/// moves the cursor.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent, screen: Rect) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (main, _) = ui::layout::create_layout_with_status(screen);
            let areas = ui::pane_areas(app, main);
            let index = if app.workspace.layout_mode() == LayoutMode::Fullscreen {
                Some(app.workspace.focused_index())
            } else {
                let rects: Vec<LayoutRect> = areas
                    .iter()
                    .map(|r| LayoutRect::new(r.x.into(), r.y.into(), r.width.into(), r.height.into()))
                    .collect();
                pane_at(&rects, mouse.column.into(), mouse.row.into())
            };
            let Some((index, area)) = index.and_then(|i| areas.get(i).map(|area| (i, *area))) else {
                return;
            };
            app.workspace.focus(index);

            // border plus header line above the first entry
            let first_row = area.y + 2;
            if mouse.row >= first_row && mouse.row < area.bottom().saturating_sub(1) {
                if let Some(row) = clicked_entry(&app.workspace, index, usize::from(mouse.row - first_row)) {
                    app.workspace.select(row);
                }
            }
        }
        MouseEventKind::ScrollDown => app.dispatch(Action::CursorDown),
        MouseEventKind::ScrollUp => app.dispatch(Action::CursorUp),
        _ => {}
    }
}

/// Listing index under a visible row of pane `index`, if that row holds an
/// entry.
fn clicked_entry(workspace: &Workspace, index: usize, visible_row: usize) -> Option<usize> {
    let pane = workspace.pane(index)?;
    let row = pane.scroll_offset + visible_row;
    (row < pane.files.len()).then_some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panedeck::fs::{FileEntry, MemoryLister};
    use panedeck::history::DirectoryHistory;
    use panedeck::workspace::WorkspaceSettings;

    #[test]
    fn clicks_below_the_listing_select_nothing() {
        let lister = MemoryLister::new().with_dir(
            "/d",
            vec![FileEntry::file("a.txt", "", 1, 0), FileEntry::file("b.txt", "", 1, 0)],
        );
        let workspace = Workspace::with_panes(
            WorkspaceSettings::default(),
            DirectoryHistory::new(),
            &[PathBuf::from("/d")],
            &lister,
        );

        assert_eq!(clicked_entry(&workspace, 0, 1), Some(1));
        assert_eq!(clicked_entry(&workspace, 0, 2), None);
        assert_eq!(clicked_entry(&workspace, 5, 0), None);
    }
}
