//! Terminal UI components: panes, status bar and the help overlay.

pub mod help_menu;
pub mod layout;
pub mod pane_view;
pub mod status_bar;

use ratatui::Frame;

use crate::app::App;
use crate::layout::LayoutMode;

pub use help_menu::HelpMenuWidget;
pub use pane_view::PaneView;
pub use status_bar::StatusBar;

/// Screen rects of every pane for the current terminal area
pub fn pane_areas(app: &App, area: ratatui::layout::Rect) -> Vec<ratatui::layout::Rect> {
    app.workspace
        .layout(i64::from(area.width), i64::from(area.height))
        .iter()
        .map(|rect| layout::to_screen_rect(area, rect))
        .collect()
}

/// Visible list rows of every pane, for scroll-into-view
pub fn pane_rows(app: &App, area: ratatui::layout::Rect) -> Vec<usize> {
    let (main, _) = layout::create_layout_with_status(area);
    pane_areas(app, main)
        .iter()
        .map(|rect| layout::list_rows(rect.height))
        .collect()
}

/// Draw the whole UI
pub fn draw(frame: &mut Frame, app: &App) {
    let (main, status) = layout::create_layout_with_status(frame.area());

    let workspace = &app.workspace;
    let compare = app.show_compare.then(|| workspace.comparison_index());
    let linked = workspace.linked_indicator_visible();
    let focused = workspace.focused_index();

    for (index, (pane, area)) in workspace
        .panes()
        .iter()
        .zip(pane_areas(app, main))
        .enumerate()
    {
        if workspace.layout_mode() == LayoutMode::Fullscreen && index != focused {
            continue;
        }
        let view = PaneView::new(pane, index)
            .focused(index == focused)
            .linked(linked)
            .compare(compare.as_ref());
        frame.render_widget(view, area);
    }

    frame.render_widget(
        StatusBar::new(workspace, app.status.as_ref(), app.show_compare),
        status,
    );

    if app.show_help {
        let help = HelpMenuWidget::new(&app.registry);
        let area = help.calculate_area(frame.area());
        frame.render_widget(help, area);
    }
}
