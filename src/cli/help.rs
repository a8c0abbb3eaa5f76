//! Text for the `help` command.

use crate::cli::registry::{CommandEntry, CommandRegistry};

const NAME_WIDTH: usize = 16;

/// One line per command, in registration order.
pub fn overview(registry: &CommandRegistry) -> String {
    let mut lines: Vec<String> = registry
        .list()
        .into_iter()
        .map(|entry| format!("  {:<width$} {}", entry.name, entry.description, width = NAME_WIDTH))
        .collect();
    lines.push(String::new());
    lines.push("Dates are YYYY-MM-DD or `today`. Ids may be shortened to their first characters.".into());
    lines.push("Use `help <command>` for details.".into());
    lines.join("\n")
}

pub fn command(entry: &CommandEntry) -> String {
    let mut text = format!("{}\n\nUsage: {}", entry.description, entry.usage);
    if !entry.aliases.is_empty() {
        text.push_str(&format!("\nAliases: {}", entry.aliases.join(", ")));
    }
    if entry.mutates {
        text.push_str("\nChanges are saved automatically after a short pause.");
    }
    text
}
