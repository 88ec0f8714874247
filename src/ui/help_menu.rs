//! Help overlay listing the active keybindings.
//!
//! Toggled by `?`. Bindings are grouped by category; an action bound to
//! several keys is shown once per key so every working key is discoverable.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::input::{format_key_combo, KeybindingRegistry};

/// Widget that renders the help overlay
pub struct HelpMenuWidget<'a> {
    registry: &'a KeybindingRegistry,
}

impl<'a> HelpMenuWidget<'a> {
    /// Create a new help menu widget
    pub fn new(registry: &'a KeybindingRegistry) -> Self {
        Self { registry }
    }

    /// Centered popup area, sized to the content where the screen allows.
    pub fn calculate_area(&self, screen: Rect) -> Rect {
        let wanted = self.build_lines().len() as u16 + 2; // +2 for borders
        let height = wanted.min(screen.height);
        let width = 60.min(screen.width);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }

    /// One header line per category followed by its bindings
    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (category, bindings) in self.registry.bindings_by_category() {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::styled(
                category.display_name().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(" {:<16}", format_key_combo(&binding.chord)),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(binding.description.clone(), Style::default().fg(Color::White)),
                ]));
            }
        }
        lines
    }
}

impl Widget for HelpMenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (overlay effect)
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " ? | Keybindings ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(Color::Black));

        Paragraph::new(self.build_lines())
            .block(block)
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ChordDefinition, KeyCategory, Modifiers};

    #[test]
    fn lines_group_bindings_under_category_headers() {
        let registry = KeybindingRegistry::new([
            ChordDefinition::new("q", Modifiers::NONE, "quit", "Quit", KeyCategory::Application),
            ChordDefinition::new("j", Modifiers::NONE, "down", "Down", KeyCategory::Navigation),
        ]);
        let lines = HelpMenuWidget::new(&registry).build_lines();
        // header, binding, blank, header, binding
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].to_string(), "Navigation");
        assert_eq!(lines[3].to_string(), "Application");
    }

    #[test]
    fn calculate_area_is_centered_and_clamped() {
        let registry = KeybindingRegistry::with_defaults();
        let widget = HelpMenuWidget::new(&registry);
        let area = widget.calculate_area(Rect::new(0, 0, 100, 30));
        assert_eq!(area.height, 30);
        assert_eq!(area.width, 60);
        assert_eq!(area.x, 20);
    }
}
