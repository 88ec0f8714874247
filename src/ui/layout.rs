use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::layout::LayoutRect;

/// Split the screen into the pane area and a one-line status bar
pub fn create_layout_with_status(area: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    (vertical[0], vertical[1])
}

/// Place a layout rect (relative to the pane area) on the screen, clipped to
/// the area.
pub fn to_screen_rect(area: Rect, rect: &LayoutRect) -> Rect {
    let x = area.x.saturating_add(u16::try_from(rect.x).unwrap_or(u16::MAX));
    let y = area.y.saturating_add(u16::try_from(rect.y).unwrap_or(u16::MAX));
    let width = u16::try_from(rect.width).unwrap_or(u16::MAX);
    let height = u16::try_from(rect.height).unwrap_or(u16::MAX);
    Rect::new(x, y, width, height).intersection(area)
}

/// Visible list rows of a bordered pane of the given outer height
pub fn list_rows(height: u16) -> usize {
    // borders plus the header line
    usize::from(height.saturating_sub(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_takes_the_last_line() {
        let (main, status) = create_layout_with_status(Rect::new(0, 0, 80, 24));
        assert_eq!(main.height, 23);
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn layout_rects_are_offset_into_the_area() {
        let area = Rect::new(0, 1, 80, 20);
        let rect = to_screen_rect(area, &LayoutRect::new(40, 10, 40, 10));
        assert_eq!(rect, Rect::new(40, 11, 40, 10));
    }
}
