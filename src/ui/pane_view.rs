//! Directory pane widget.
//!
//! Renders one pane's listing with the cursor, marks and, when enabled,
//! comparison highlighting against the other panes.

use chrono::{Local, TimeZone};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::compare::{EnhancedComparisonIndex, SizeRank, TimeRank};
use crate::fs::FileEntry;
use crate::workspace::PaneState;

/// Widget that renders a single pane
pub struct PaneView<'a> {
    pane: &'a PaneState,
    pane_index: usize,
    focused: bool,
    linked: bool,
    compare: Option<&'a EnhancedComparisonIndex>,
}

impl<'a> PaneView<'a> {
    pub fn new(pane: &'a PaneState, pane_index: usize) -> Self {
        Self {
            pane,
            pane_index,
            focused: false,
            linked: false,
            compare: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    /// Highlight entries shared with other panes
    pub fn compare(mut self, index: Option<&'a EnhancedComparisonIndex>) -> Self {
        self.compare = index;
        self
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(format!(" {} ", self.pane.current_path.display()))];
        if self.linked {
            spans.push(Span::styled(
                "[linked] ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    fn header(&self) -> Line<'static> {
        let sort = self.pane.sort;
        let marked = self.pane.marked.len();
        let mut text = format!(
            "{} entries  sort: {} {}",
            self.pane.files.len(),
            sort.criterion.display_name(),
            sort.direction.arrow()
        );
        if marked > 0 {
            text.push_str(&format!("  marked: {marked}"));
        }
        Line::styled(text, Style::default().fg(Color::DarkGray))
    }

    /// Color of an entry according to the comparison index
    fn compare_color(&self, entry: &FileEntry) -> Option<Color> {
        let state = self.compare?.get(self.pane_index, &entry.name)?;
        let color = match (state.size_rank_of(self.pane_index), state.time_rank_of(self.pane_index)) {
            (Some(SizeRank::Equal), Some(TimeRank::Equal)) => Color::DarkGray,
            (_, Some(TimeRank::Latest)) => Color::Green,
            (_, Some(TimeRank::Earliest)) => Color::Red,
            _ => Color::Yellow,
        };
        Some(color)
    }

    fn entry_line(&self, index: usize, entry: &FileEntry, width: usize) -> Line<'static> {
        let is_cursor = self.pane.cursor == Some(index);
        let marked = self.pane.is_marked(entry);

        let mut style = Style::default();
        if entry.is_directory {
            style = style.fg(Color::Blue).add_modifier(Modifier::BOLD);
        }
        if let Some(color) = self.compare_color(entry) {
            style = style.fg(color);
        }
        if marked {
            style = style.fg(Color::Yellow);
        }
        if is_cursor {
            style = if self.focused {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style.add_modifier(Modifier::UNDERLINED)
            };
        }

        let name = if entry.is_directory {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let size = if entry.is_directory {
            String::new()
        } else {
            format_size(entry.size_bytes)
        };
        let modified = format_mtime(entry.modified_at_ms);
        let marker = if marked { "*" } else { " " };

        let details = format!("{size:>8} {modified}");
        let name_width = width.saturating_sub(details.chars().count() + 2);
        let name = truncate(&name, name_width);
        let padding = name_width.saturating_sub(name.chars().count());

        Line::from(Span::styled(
            format!("{marker}{name}{} {details}", " ".repeat(padding)),
            style,
        ))
    }
}

impl Widget for PaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let rows = usize::from(inner.height.saturating_sub(1));
        let width = usize::from(inner.width);
        let mut lines = vec![self.header()];
        if self.pane.files.is_empty() {
            lines.push(Line::styled(" (empty)", Style::default().fg(Color::DarkGray)));
        }
        lines.extend(
            self.pane
                .files
                .iter()
                .enumerate()
                .skip(self.pane.scroll_offset)
                .take(rows)
                .map(|(index, entry)| self.entry_line(index, entry, width)),
        );

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes}B")
    } else {
        format!("{value:.1}{}", UNITS[unit])
    }
}

fn format_mtime(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
