//! Keybinding Parity Tests
//!
//! Ensures every wizard command handled by the terminal front end has a
//! footer hint in the shortcut registry, and that the registry does not
//! advertise keys the event handlers never match.

// Note: We use include_str! to read source files directly since the ui
// module lives in the binary crate.

const KEYBINDINGS_SRC: &str = include_str!("../src/ui/keybindings.rs");
const APP_SRC: &str = include_str!("../src/ui/app.rs");

/// Description strings declared in the registry
fn registry_descriptions() -> Vec<String> {
    let mut descriptions = Vec::new();
    for line in KEYBINDINGS_SRC.lines() {
        if let Some(start) = line.find("description:") {
            if let Some(quote_start) = line[start..].find('"') {
                let after_quote = &line[start + quote_start + 1..];
                if let Some(quote_end) = after_quote.find('"') {
                    descriptions.push(after_quote[..quote_end].to_string());
                }
            }
        }
    }
    descriptions
}

/// Each tuple: (registry description, key pattern matched in app.rs)
const WIZARD_COMMANDS: &[(&str, &str)] = &[
    ("Move down", "KeyCode::Char('j')"),
    ("Move up", "KeyCode::Char('k')"),
    ("Pick option", "KeyCode::Char(' ')"),
    ("Next / Finish", "KeyCode::Char('n')"),
    ("Back", "KeyCode::Char('b')"),
    ("Toggle auto-progress", "KeyCode::Char('a')"),
    ("Start over", "KeyCode::Char('r')"),
    ("Quit", "KeyCode::Char('q')"),
    ("Ctrl+S submit", "KeyModifiers::CONTROL"),
];

#[test]
fn every_command_has_a_hint() {
    let descriptions = registry_descriptions();
    for (description, _) in WIZARD_COMMANDS {
        assert!(
            descriptions.iter().any(|d| d == description),
            "missing shortcut hint: {description}"
        );
    }
}

#[test]
fn every_command_is_handled() {
    for (description, pattern) in WIZARD_COMMANDS {
        assert!(
            APP_SRC.contains(pattern),
            "'{description}' advertised but {pattern} is not handled"
        );
    }
}

#[test]
fn registry_is_not_empty() {
    assert!(registry_descriptions().len() >= WIZARD_COMMANDS.len());
}
