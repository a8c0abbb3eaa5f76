use std::io::{self, BufRead, Lines, StdinLock};

use rustyline::{error::ReadlineError, history::DefaultHistory, Cmd, Editor, KeyEvent};

use crate::cli::completion::ShellCompleter;
use crate::cli::error::{CliError, CommandError};
use crate::cli::output;
use crate::cli::shell_context::{CliMode, LoopControl, ShellContext, SCRIPT_ENV};

/// What a line source produced for one prompt.
enum Input {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupt,
    Closed,
}

trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError>;

    fn remember(&mut self, _line: &str) {}
}

struct EditorSource {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl EditorSource {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(context.command_names())));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupt),
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %err, "history entry dropped");
        }
    }
}

struct ScriptSource {
    lines: Lines<StdinLock<'static>>,
}

impl LineSource for ScriptSource {
    fn next_line(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let result = match mode {
        CliMode::Interactive => EditorSource::new(&context).and_then(|mut source| {
            output::info("Type `help` to see available commands.");
            drive(&mut context, &mut source)
        }),
        CliMode::Script => drive(
            &mut context,
            &mut ScriptSource {
                lines: io::stdin().lock().lines(),
            },
        ),
    };
    context.shutdown()?;
    result
}

fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let prompt = context.prompt();
        let line = match source.next_line(&prompt)? {
            Input::Line(line) => line,
            Input::Interrupt => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Input::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            context.poll_autosave();
            continue;
        }
        source.remember(trimmed);
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    if line.trim_start().starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(message) => {
            context.print_warning(&message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());
    tracing::debug!(%command, args = args.len(), "dispatching command");

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Splits a line with shell quoting rules.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    shell_words::split(line).map_err(|err| format!("could not read that line: {err}"))
}
