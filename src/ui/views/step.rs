//! Step screen: header, progress, option cards

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::App;
use wayfinder::graph::StepItem;
use wayfinder::options::CardVariant;
use wayfinder::resolver::Resolution;

const GRID_COLUMNS: usize = 2;

/// Glyph shown for an item's icon name
fn icon_glyph(icon: Option<&str>) -> &'static str {
    match icon {
        Some("code") => "</>",
        Some("globe") => "◍",
        Some("pencil") => "✎",
        Some("blocks" | "boxes" | "box" | "layers") => "▣",
        Some("cloud") => "☁",
        Some("server") => "▤",
        Some(_) => "•",
        None => " ",
    }
}

impl App {
    pub(super) fn render_step(&self, frame: &mut Frame, area: Rect, step: usize) {
        let Some(current) = self.wizard.graph().step(step) else {
            return;
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    current.title.as_str(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Description
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Spacer
                Constraint::Min(4),    // Options
                Constraint::Length(3), // Footer
            ])
            .split(inner);

        if let Some(description) = &current.description {
            let description = Paragraph::new(description.as_str())
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(description, chunks[0]);
        }

        let total = self.wizard.graph().len();
        let label = if self.wizard.auto_progress() {
            format!("Step {}/{}", step + 1, total)
        } else {
            format!("Step {}/{} (manual)", step + 1, total)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(self.wizard.progress().clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, chunks[1]);

        match self.wizard.step_options(step) {
            Resolution::Available(options) if !options.is_empty() => {
                match self.wizard.options().card_variant {
                    CardVariant::Default => {
                        self.render_card_grid(frame, chunks[3], step, &options.options)
                    }
                    CardVariant::Compact => {
                        self.render_compact_list(frame, chunks[3], step, &options.options)
                    }
                }
            }
            Resolution::Available(_) => render_nothing(frame, chunks[3], None),
            Resolution::Unavailable(reason) => {
                render_nothing(frame, chunks[3], Some(reason.to_string()))
            }
        }

        self.render_footer(frame, chunks[4]);
    }

    fn card_style(&self, step: usize, index: usize, item: &StepItem) -> (Style, bool) {
        let selected = self.wizard.is_selected(step, &item.id);
        let style = if selected {
            Style::default().fg(Color::Green)
        } else if index == self.highlight {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        (style, selected)
    }

    fn render_card_grid(&self, frame: &mut Frame, area: Rect, step: usize, items: &[&StepItem]) {
        let card_height = if self.config.ui.show_descriptions { 4 } else { 3 };
        let rows = items.len().div_ceil(GRID_COLUMNS);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(card_height); rows])
            .split(area);

        for (row, row_area) in row_areas.iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, GRID_COLUMNS as u32);
                    GRID_COLUMNS
                ])
                .split(*row_area);

            for (column, card_area) in columns.iter().enumerate() {
                let index = row * GRID_COLUMNS + column;
                let Some(item) = items.get(index) else {
                    break;
                };
                self.render_card(frame, *card_area, step, index, item);
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, step: usize, index: usize, item: &StepItem) {
        let (style, selected) = self.card_style(step, index, item);

        let mut title = vec![
            Span::raw(" "),
            Span::raw(icon_glyph(item.icon.as_deref())),
            Span::raw(" "),
            Span::styled(item.title.as_str(), style.add_modifier(Modifier::BOLD)),
        ];
        if selected {
            title.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
        }
        title.push(Span::raw(" "));

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(style);

        let body = if self.config.ui.show_descriptions {
            item.description.as_deref().unwrap_or_default()
        } else {
            ""
        };
        let card = Paragraph::new(body)
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(card, area);
    }

    fn render_compact_list(&self, frame: &mut Frame, area: Rect, step: usize, items: &[&StepItem]) {
        let list_items: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let (style, selected) = self.card_style(step, index, item);
                let marker = if index == self.highlight { "> " } else { "  " };
                let check = if selected { "✓ " } else { "  " };

                let mut lines = vec![Line::from(vec![
                    Span::raw(marker),
                    Span::styled(check, Style::default().fg(Color::Green)),
                    Span::styled(item.title.as_str(), style.add_modifier(Modifier::BOLD)),
                ])];
                if self.config.ui.show_descriptions {
                    if let Some(description) = &item.description {
                        lines.push(Line::from(vec![
                            Span::raw("     "),
                            Span::styled(
                                description.as_str(),
                                Style::default().fg(Color::DarkGray),
                            ),
                        ]));
                    }
                }
                ListItem::new(lines)
            })
            .collect();

        frame.render_widget(List::new(list_items), area);
    }
}

/// Placeholder when a step has no options to offer
fn render_nothing(frame: &mut Frame, area: Rect, reason: Option<String>) {
    let mut lines = vec![Line::from(Span::styled(
        "Nothing to show",
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(reason) = reason {
        lines.push(Line::from(Span::styled(
            reason,
            Style::default().fg(Color::DarkGray),
        )));
    }
    let placeholder = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(placeholder, area);
}
