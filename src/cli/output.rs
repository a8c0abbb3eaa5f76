//! Labeled, optionally colored messages on stdout.

use std::fmt;
use std::sync::{OnceLock, RwLock};

use colored::{ColoredString, Colorize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

impl MessageKind {
    fn prefix(self) -> Option<&'static str> {
        match self {
            MessageKind::Info => Some("INFO: [i]"),
            MessageKind::Success => Some("SUCCESS: [✓]"),
            MessageKind::Warning => Some("WARNING: [!]"),
            MessageKind::Error => Some("ERROR: [x]"),
            MessageKind::Hint => Some("HINT: [?]"),
            MessageKind::Section => None,
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            MessageKind::Info => text.normal(),
            MessageKind::Success => text.bright_green(),
            MessageKind::Warning => text.bright_yellow(),
            MessageKind::Error => text.bright_red(),
            MessageKind::Hint => text.bright_cyan(),
            MessageKind::Section => text.bold(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No ANSI styling (script mode, `ui_color_enabled = false`).
    pub plain: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

fn preferences_lock() -> &'static RwLock<OutputPreferences> {
    PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()))
}

pub fn set_preferences(prefs: OutputPreferences) {
    colored::control::set_override(!prefs.plain);
    if let Ok(mut guard) = preferences_lock().write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    preferences_lock()
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Message text with its label, before styling.
pub(crate) fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    match kind.prefix() {
        Some(prefix) => format!("{prefix} {message}"),
        None => format!("=== {} ===", message.to_string().trim()),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let text = format_message(kind, message);
    let styled = if current_preferences().plain {
        text
    } else {
        kind.paint(&text).to_string()
    };
    if kind == MessageKind::Section {
        println!();
    }
    println!("{styled}");
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Pre-rendered text (tables, summaries) printed as is.
pub fn block(text: &str) {
    println!("{text}");
}
