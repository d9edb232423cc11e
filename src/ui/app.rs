use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::ui::keybindings::ShortcutContext;
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard, WizardTerminal};
use wayfinder::config::Config;
use wayfinder::graph::StepGraph;
use wayfinder::options::TrailingPhase;
use wayfinder::store::Selections;
use wayfinder::summary::Summary;
use wayfinder::wizard::{Blocked, Completion, Phase, Transition, Wizard};

/// Which screen the wizard is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Step(usize),
    Success,
    CustomForm,
}

impl Screen {
    pub fn context(&self) -> ShortcutContext {
        match self {
            Screen::Step(_) => ShortcutContext::Step,
            Screen::Success => ShortcutContext::Success,
            Screen::CustomForm => ShortcutContext::CustomForm,
        }
    }
}

/// Terminal front end over one [`Wizard`]
pub struct App {
    pub(super) wizard: Wizard,
    pub(super) config: Config,
    /// Index into the current step's options
    pub(super) highlight: usize,
    pub(super) status: Option<String>,
    pub(super) notes: TextArea<'static>,
    should_quit: bool,
    /// Selections handed over by the last accepted finish
    finished: Option<Selections>,
    outcome: Option<Summary>,
    completions: Receiver<Selections>,
}

impl App {
    pub fn new(graph: StepGraph, config: Config) -> Self {
        let (tx, completions) = mpsc::channel();
        let wizard = Wizard::builder(graph)
            .options(config.wizard.clone())
            .on_complete(move |selections: &Selections| {
                // Receiver lives as long as the app; a failed send only means shutdown
                let _ = tx.send(selections.clone());
                Completion::Accepted
            })
            .build();

        let mut app = Self {
            wizard,
            config,
            highlight: 0,
            status: None,
            notes: notes_area(),
            should_quit: false,
            finished: None,
            outcome: None,
            completions,
        };
        app.sync_highlight();
        app
    }

    pub fn screen(&self) -> Screen {
        match self.wizard.phase() {
            Phase::Active(step) => Screen::Step(step),
            Phase::Terminal => match self.wizard.options().trailing_phase {
                TrailingPhase::CustomForm => Screen::CustomForm,
                _ => Screen::Success,
            },
        }
    }

    /// Run the draw and input loop until the user quits or finishes.
    ///
    /// Returns the summary of an accepted finish, `None` if the user quit.
    pub fn run(mut self) -> Result<Option<Summary>> {
        install_panic_hook();
        let (_guard, mut terminal) = TerminalGuard::enter()?;
        self.event_loop(&mut terminal)?;
        Ok(self.outcome)
    }

    fn event_loop(&mut self, terminal: &mut WizardTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen() {
            Screen::Step(step) => self.handle_step_key(step, key),
            Screen::Success => self.handle_success_key(key),
            Screen::CustomForm => self.handle_form_key(key),
        }
        self.collect_completions();
    }

    fn handle_step_key(&mut self, step: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlight = self.highlight.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.option_count();
                if count > 0 {
                    self.highlight = (self.highlight + 1).min(count - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.pick_highlighted(step),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('n') => {
                let transition = self.wizard.go_next();
                self.apply(transition);
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('b') => {
                let transition = self.wizard.go_back();
                self.apply(transition);
            }
            KeyCode::Char('a') => {
                let enabled = !self.wizard.auto_progress();
                self.wizard.set_auto_progress(enabled);
                self.status = Some(format!(
                    "Auto-progress {}",
                    if enabled { "on" } else { "off" }
                ));
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_success_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('b') => {
                let transition = self.wizard.go_back();
                self.apply(transition);
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc => {
                self.outcome = self.finished_summary(None);
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                let notes = self.notes.lines().join("\n");
                self.outcome = self.finished_summary(Some(notes));
                self.should_quit = true;
            }
            (KeyCode::Esc, _) => {
                let transition = self.wizard.go_back();
                self.apply(transition);
            }
            _ => {
                self.notes.input(key);
            }
        }
    }

    fn pick_highlighted(&mut self, step: usize) {
        let id = self
            .wizard
            .step_options(step)
            .options()
            .and_then(|options| options.options.get(self.highlight))
            .map(|item| item.id.clone());

        match id {
            Some(id) => {
                let transition = self.wizard.select_option(step, &id);
                self.apply(transition);
            }
            None => self.status = Some("Nothing to pick here".to_string()),
        }
    }

    /// Update status line and highlight after a wizard command
    fn apply(&mut self, transition: Transition) {
        self.status = match &transition {
            Transition::Blocked(reason) => Some(blocked_message(reason)),
            Transition::Selected { cleared, .. } if *cleared > 0 => {
                Some(format!("Cleared {cleared} later choice(s)"))
            }
            Transition::Completed(Completion::Rejected) => {
                Some("Finish was not accepted".to_string())
            }
            _ => None,
        };

        match transition {
            Transition::Selected {
                advanced_to: Some(_),
                ..
            }
            | Transition::Moved { .. } => self.sync_highlight(),
            Transition::Completed(Completion::Accepted) => {
                self.collect_completions();
                if !self.wizard.options().trailing_phase.is_configured() {
                    self.outcome = self.finished_summary(None);
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.wizard.reset();
        self.finished = None;
        self.notes = notes_area();
        self.sync_highlight();
        self.status = Some("Started over".to_string());
    }

    /// Point the highlight at the current step's selection, or the first option
    fn sync_highlight(&mut self) {
        let step = self.wizard.current_step();
        self.highlight = self
            .wizard
            .step_options(step)
            .options()
            .and_then(|options| {
                let selected = self.wizard.selections().get(step)?;
                options.options.iter().position(|item| item.id == selected)
            })
            .unwrap_or(0);
    }

    fn option_count(&self) -> usize {
        self.wizard
            .current_options()
            .options()
            .map_or(0, |options| options.options.len())
    }

    fn collect_completions(&mut self) {
        while let Ok(selections) = self.completions.try_recv() {
            self.finished = Some(selections);
        }
    }

    fn finished_summary(&self, notes: Option<String>) -> Option<Summary> {
        let selections = self.finished.as_ref()?;
        let summary = Summary::from_selections(self.wizard.graph(), selections);
        Some(match notes {
            Some(notes) => summary.with_notes(notes),
            None => summary,
        })
    }
}

/// Empty free-text box of the custom form
fn notes_area() -> TextArea<'static> {
    let mut notes = TextArea::default();
    notes.set_placeholder_text("Anything else we should know?");
    notes.set_block(
        Block::default()
            .title(" Notes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    notes
}

fn blocked_message(reason: &Blocked) -> String {
    match reason {
        Blocked::CannotProceed => "Pick an option first".to_string(),
        other => {
            let text = other.to_string();
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => text,
            }
        }
    }
}
