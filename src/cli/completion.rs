//! Tab completion for the interactive editor.

use std::borrow::Cow;

use pitaka_config::Config;
use pitaka_core::Granularity;
use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

const CONFIG_ACTIONS: [&str; 5] = ["show", "set", "backup", "backups", "restore"];

/// Completes command names, then a few well-known arguments.
pub(crate) struct ShellCompleter {
    commands: Vec<String>,
}

impl ShellCompleter {
    pub(crate) fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn argument_candidates(&self, words: &[&str]) -> Vec<String> {
        match words {
            ["help"] => self.commands.clone(),
            ["trend"] => Granularity::ALL
                .iter()
                .map(|g| g.label().to_ascii_lowercase().replace('-', ""))
                .collect(),
            ["config"] => CONFIG_ACTIONS.iter().map(|a| a.to_string()).collect(),
            ["config", "set"] => Config::KEYS.iter().map(|k| k.to_string()).collect(),
            ["report"] => vec!["json".to_string()],
            _ => Vec::new(),
        }
    }

    /// Candidates for the word ending at the cursor and where that word starts.
    pub(crate) fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let before = &line[..pos];
        let start = before
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let needle = before[start..].to_ascii_lowercase();
        let previous: Vec<&str> = before[..start].split_whitespace().collect();

        let pool = if previous.is_empty() {
            self.commands.clone()
        } else {
            self.argument_candidates(&previous)
        };
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .collect();
        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(line, pos);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for ShellCompleter {}
