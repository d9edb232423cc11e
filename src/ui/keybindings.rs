//! Keyboard shortcuts registry.
//!
//! Single source of truth for the footer hints of each wizard screen. The
//! key handling itself lives in `App::handle_key`.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., vim-style letter or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Screen where this shortcut is active
    pub context: ShortcutContext,
}

/// Screens with their own key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Choosing an option on a step
    Step,
    /// Success screen after finishing
    Success,
    /// Free-text form after finishing
    CustomForm,
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Step ===
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Move down",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Move up",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        description: "Pick option",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: Some(KeyCode::Right),
        description: "Next / Finish",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('b'),
        alt_key: Some(KeyCode::Left),
        description: "Back",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('a'),
        alt_key: None,
        description: "Toggle auto-progress",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        description: "Start over",
        context: ShortcutContext::Step,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Quit",
        context: ShortcutContext::Step,
    },
    // === Success ===
    Shortcut {
        key: KeyCode::Char('b'),
        alt_key: Some(KeyCode::Left),
        description: "Back to last step",
        context: ShortcutContext::Success,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        description: "Start over",
        context: ShortcutContext::Success,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Enter),
        description: "Done",
        context: ShortcutContext::Success,
    },
    // === Custom form ===
    Shortcut {
        key: KeyCode::Char('s'),
        alt_key: None,
        description: "Ctrl+S submit",
        context: ShortcutContext::CustomForm,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Back to last step",
        context: ShortcutContext::CustomForm,
    },
];

/// Shortcuts active in one context, in registry order
pub fn shortcuts_for(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// One-line footer hint for a context
pub fn footer_hint(context: ShortcutContext) -> String {
    shortcuts_for(context)
        .map(|s| match s.context {
            // Modifier is part of the description
            ShortcutContext::CustomForm if s.key == KeyCode::Char('s') => {
                s.description.to_string()
            }
            _ => format!("[{}] {}", s.key_display(), s.description),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
