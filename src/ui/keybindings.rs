//! Keyboard shortcuts for the stepper TUI.
//!
//! Single source for key dispatch in the app, the footer hints and the help
//! overlay.

use crossterm::event::KeyCode;

#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: KeyCode,
    /// Alternative key (e.g., vi-style letter for an arrow key)
    pub alt_key: Option<KeyCode>,
    /// Inclusive end of a character range starting at `key` (e.g., '1'..='9')
    pub range_end: Option<KeyCode>,
    pub description: &'static str,
    pub category: ShortcutCategory,
    /// Shown in the one-line footer as well as the help overlay
    pub in_footer: bool,
    pub action: ShortcutAction,
}

/// What the app does when a shortcut's key is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    PreviousStep,
    NextStep,
    /// Activate the indicator selected by the pressed digit
    JumpToStep,
    /// Next, or Last on the terminal step
    Primary,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Actions => "Actions",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
            ShortcutCategory::General,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter", "→/l", "1-9")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        if let Some(end) = &self.range_end {
            return format!("{}-{}", primary, format_keycode(end));
        }
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for the help overlay (left-padded to 7 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<7}", self.key_display())
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        if self.key == key || self.alt_key == Some(key) {
            return true;
        }
        match (self.key, self.range_end, key) {
            (KeyCode::Char(start), Some(KeyCode::Char(end)), KeyCode::Char(c)) => {
                (start..=end).contains(&c)
            }
            _ => false,
        }
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => format!("{:?}", key),
    }
}

pub static SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Char('h')),
        range_end: None,
        description: "Previous step",
        category: ShortcutCategory::Navigation,
        in_footer: true,
        action: ShortcutAction::PreviousStep,
    },
    Shortcut {
        key: KeyCode::Right,
        alt_key: Some(KeyCode::Char('l')),
        range_end: None,
        description: "Next step",
        category: ShortcutCategory::Navigation,
        in_footer: true,
        action: ShortcutAction::NextStep,
    },
    Shortcut {
        key: KeyCode::Char('1'),
        alt_key: None,
        range_end: Some(KeyCode::Char('9')),
        description: "Jump to step by indicator",
        category: ShortcutCategory::Navigation,
        in_footer: false,
        action: ShortcutAction::JumpToStep,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        range_end: None,
        description: "Next, or finish on the last step",
        category: ShortcutCategory::Actions,
        in_footer: true,
        action: ShortcutAction::Primary,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        range_end: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        in_footer: true,
        action: ShortcutAction::ToggleHelp,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        range_end: None,
        description: "Quit",
        category: ShortcutCategory::General,
        in_footer: true,
        action: ShortcutAction::Quit,
    },
];

/// The action bound to `key`, if any
pub fn action_for(key: KeyCode) -> Option<ShortcutAction> {
    SHORTCUTS
        .iter()
        .find(|s| s.matches(key))
        .map(|s| s.action)
}

pub fn footer_shortcuts() -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(|s| s.in_footer)
}

pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}
