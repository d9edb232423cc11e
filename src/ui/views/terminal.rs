//! Screens shown after the last step was accepted

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;

impl App {
    pub(super) fn render_success(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Done ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(4),    // Summary
                Constraint::Length(3), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "All set!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        frame.render_widget(self.summary_lines(), chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    pub(super) fn render_custom_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Almost done ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let summary_rows = summary_height(self.wizard.graph().len());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(summary_rows), // Summary
                Constraint::Min(5),               // Notes
                Constraint::Length(3),            // Footer
            ])
            .split(inner);

        frame.render_widget(self.summary_lines(), chunks[0]);

        frame.render_widget(&self.notes, chunks[1]);

        self.render_footer(frame, chunks[2]);
    }

    /// `Step title  Item title` rows for the current selections
    fn summary_lines(&self) -> Paragraph<'static> {
        let graph = self.wizard.graph();
        let lines: Vec<Line> = graph
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let choice = self
                    .wizard
                    .selected_item(index)
                    .map_or_else(|| "(none)".to_string(), |item| item.title.clone());
                Line::from(vec![
                    Span::styled(
                        format!("{:<28}", step.title),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(choice, Style::default().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();
        Paragraph::new(lines)
    }
}

/// Rows for one summary line per step plus a spacer
fn summary_height(steps: usize) -> u16 {
    u16::try_from(steps).unwrap_or(u16::MAX).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_height_has_spacer_row() {
        assert_eq!(summary_height(3), 4);
    }

    #[test]
    fn test_summary_height_saturates() {
        assert_eq!(summary_height(70_000), u16::MAX);
        assert_eq!(summary_height(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(summary_height(usize::MAX), u16::MAX);
    }
}
