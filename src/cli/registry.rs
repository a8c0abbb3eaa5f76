use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::cli::error::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Levenshtein distance beyond which no suggestion is offered.
const SUGGESTION_DISTANCE: usize = 3;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub aliases: &'static [&'static str],
    /// A successful run leaves edits that need saving.
    pub mutates: bool,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            aliases: &[],
            mutates: false,
        }
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn mutating(mut self) -> Self {
        self.mutates = true;
        self
    }
}

/// Commands in help order, looked up by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`; a later entry with the same name replaces the earlier one.
    pub fn register(&mut self, entry: CommandEntry) {
        let slot = match self.lookup.get(entry.name) {
            Some(&slot) => {
                self.entries[slot] = entry;
                slot
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        let entry = &self.entries[slot];
        for key in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
            self.lookup.insert(key, slot);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.entries.iter().collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Closest known name or alias, if it is a plausible typo of `input`.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_ascii_lowercase();
        self.lookup
            .keys()
            .map(|&key| (strsim::levenshtein(key, &input), key))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min()
            .map(|(_, key)| key)
    }
}

static REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut registry = CommandRegistry::new();
    for entry in crate::cli::commands::all_definitions() {
        registry.register(entry);
    }
    registry
});

/// The shell's command table, built on first use.
pub fn registry() -> &'static CommandRegistry {
    &REGISTRY
}
