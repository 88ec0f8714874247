//! One-line status bar: layout, linked state, focused entry and messages.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{StatusKind, StatusMessage};
use crate::workspace::Workspace;

pub struct StatusBar<'a> {
    workspace: &'a Workspace,
    message: Option<&'a StatusMessage>,
    compare: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(workspace: &'a Workspace, message: Option<&'a StatusMessage>, compare: bool) -> Self {
        Self {
            workspace,
            message,
            compare,
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let badge = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(
            format!(" {} ", self.workspace.layout_mode().display_name()),
            badge.bg(Color::Cyan),
        )];
        if self.workspace.linked_indicator_visible() {
            spans.push(Span::styled(" LINKED ", badge.bg(Color::Magenta)));
        }
        if self.compare {
            spans.push(Span::styled(" CMP ", badge.bg(Color::Green)));
        }
        spans.push(Span::raw(format!(
            " pane {}/{} ",
            self.workspace.focused_index() + 1,
            self.workspace.pane_count()
        )));

        if let Some(pane) = self.workspace.focused_pane() {
            if let Some(entry) = pane.selected() {
                spans.push(Span::styled(
                    entry.absolute_path.display().to_string(),
                    Style::default().fg(Color::White),
                ));
            }
        }

        if let Some(message) = self.message {
            let color = match message.kind {
                StatusKind::Info => Color::Cyan,
                StatusKind::Success => Color::Green,
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
            };
            spans.push(Span::styled(
                format!("  {}", message.text),
                Style::default().fg(color),
            ));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(self.spans()))
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}
