//! Render methods for each wizard screen

mod step;
mod terminal;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::app::{App, Screen};
use crate::ui::keybindings::footer_hint;

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let area = centered_rect(80, 90, frame.area());
        match self.screen() {
            Screen::Step(step) => self.render_step(frame, area, step),
            Screen::Success => self.render_success(frame, area),
            Screen::CustomForm => self.render_custom_form(frame, area),
        }
    }

    /// Status line above the key hints
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        if let Some(status) = &self.status {
            let status = Paragraph::new(Line::from(Span::styled(
                status.as_str(),
                Style::default().fg(Color::Yellow),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(status, chunks[0]);
        }

        let hints = Paragraph::new(footer_hint(self.screen().context()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(hints, chunks[1]);
    }
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use wayfinder::config::Config;
    use wayfinder::loader::bundled_graph;
    use wayfinder::options::{CardVariant, TrailingPhase, WizardOptions};

    fn rendered(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(options: WizardOptions) -> App {
        let config = Config {
            wizard: options,
            ..Config::default()
        };
        App::new(bundled_graph().unwrap(), config)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(50, 50, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 25);
        assert_eq!(inner.x, 25);
    }

    #[test]
    fn test_first_step_shows_cards_and_progress() {
        let text = rendered(&app(WizardOptions::default()));
        assert!(text.contains("Step 1/3"));
        assert!(text.contains("Web Application"));
        assert!(text.contains("Pick option"));
    }

    #[test]
    fn test_compact_variant_lists_options() {
        let text = rendered(&app(WizardOptions {
            card_variant: CardVariant::Compact,
            ..WizardOptions::default()
        }));
        assert!(text.contains("Blog"));
    }

    #[test]
    fn test_selected_option_is_marked() {
        let mut app = app(WizardOptions {
            auto_progress: false,
            ..WizardOptions::default()
        });
        press(&mut app, KeyCode::Enter);
        assert!(rendered(&app).contains('✓'));
    }

    #[test]
    fn test_success_screen_shows_summary() {
        let mut app = app(WizardOptions {
            trailing_phase: TrailingPhase::Success,
            ..WizardOptions::default()
        });
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Char('n'));

        let text = rendered(&app);
        assert!(text.contains("All set"));
        assert!(text.contains("Framework"));
    }

    #[test]
    fn test_custom_form_shows_notes_box() {
        let mut app = app(WizardOptions {
            trailing_phase: TrailingPhase::CustomForm,
            ..WizardOptions::default()
        });
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Char('n'));

        let text = rendered(&app);
        assert!(text.contains("Notes"));
        assert!(text.contains("Ctrl+S submit"));
    }
}
