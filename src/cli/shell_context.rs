use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use pitaka_config::{default_base_dir, Config, ConfigManager};
use pitaka_core::{
    format::MoneyFormatter, validation::parse_record_date, Clock, CoreError, Debouncer,
    FinanceBackend, FixedClock, LoadCommit, SaveOutcome, Session, SystemClock,
};
use pitaka_storage_json::{JsonFinanceStore, StoragePaths};

use crate::cli::error::{CliError, CommandError};
use crate::cli::output::{self, OutputPreferences, set_preferences};
use crate::cli::registry::{registry, CommandEntry, CommandRegistry};

pub const SCRIPT_ENV: &str = "PITAKA_CLI_SCRIPT";
pub const HOME_ENV: &str = "PITAKA_HOME";
pub const TODAY_ENV: &str = "PITAKA_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: &'static CommandRegistry,
    pub theme: ColorfulTheme,
    pub session: Session,
    pub store: JsonFinanceStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub base_dir: PathBuf,
    pub clock: Box<dyn Clock>,
    /// Holds the number of edits waiting for the next automatic save.
    pub autosave: Debouncer<usize>,
    pub money: MoneyFormatter,
    pub unsaved_changes: usize,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base_dir = std::env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_base_dir);
        let clock: Box<dyn Clock> = match std::env::var(TODAY_ENV) {
            Ok(raw) => Box::new(FixedClock::new(parse_record_date(&raw)?)),
            Err(_) => Box::new(SystemClock),
        };
        Self::with_parts(mode, base_dir, clock)
    }

    pub fn with_parts(
        mode: CliMode,
        base_dir: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load()?;
        set_preferences(OutputPreferences {
            plain: mode == CliMode::Script || !config.ui_color_enabled,
        });

        let data_root = config.resolve_data_root(&base_dir);
        let store = JsonFinanceStore::new(StoragePaths::under(&data_root), &config.profile_name)?;

        let mut context = Self {
            mode,
            registry: registry(),
            theme: ColorfulTheme::default(),
            session: Session::default(),
            money: MoneyFormatter::for_locale(&config.currency, &config.locale),
            autosave: Debouncer::new(Duration::milliseconds(config.autosave_delay_ms as i64)),
            store,
            config_manager,
            config,
            base_dir,
            clock,
            unsaved_changes: 0,
            last_command: None,
            running: true,
        };
        context.load_records()?;
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&'static CommandEntry> {
        let registry = self.registry;
        registry.get(name)
    }

    pub fn prompt(&self) -> String {
        let marker = if self.unsaved_changes > 0 { "*" } else { "" };
        format!("pitaka({}){marker}> ", self.store.owner())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let registry = self.registry;
        let Some(entry) = registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let result = match (entry.handler)(self, args) {
            Ok(()) => {
                if entry.mutates {
                    self.record_change();
                }
                Ok(LoopControl::Continue)
            }
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        };
        self.poll_autosave();
        result
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    fn record_change(&mut self) {
        self.unsaved_changes += 1;
        self.autosave.schedule(self.clock.now(), self.unsaved_changes);
    }

    /// Saves once the debounce window has passed since the last edit.
    pub(crate) fn poll_autosave(&mut self) {
        let Some(pending) = self.autosave.poll(self.clock.now()) else {
            return;
        };
        tracing::debug!(pending, "autosave due");
        if let Err(err) = self.persist() {
            tracing::warn!(error = %err, "autosave failed");
            output::warning(format!("Autosave failed: {err}"));
        }
    }

    /// Writes the session through the store and adopts any reassigned ids.
    pub(crate) fn persist(&mut self) -> Result<SaveOutcome, CommandError> {
        self.autosave.cancel();
        let snapshot = self.session.begin_save()?;
        let result = self.store.save(&snapshot);
        let outcome = self.session.finish_save(result)?;
        self.unsaved_changes = 0;
        if let Some(mapping) = &outcome.id_mapping {
            tracing::info!(remapped = mapping.len(), "adopted canonical record ids");
        }
        Ok(outcome)
    }

    /// Replaces the session's records with the stored document.
    pub(crate) fn load_records(&mut self) -> Result<LoadCommit, CoreError> {
        self.autosave.cancel();
        let commit = self.session.load_with(&self.store)?;
        if commit == LoadCommit::Applied {
            self.unsaved_changes = 0;
            let data = self.session.data();
            tracing::info!(
                owner = %self.store.owner(),
                income = data.income_history.len(),
                expenses = data.expenses.len(),
                "records loaded"
            );
        }
        Ok(commit)
    }

    /// Flushes pending edits and closes the session.
    pub(crate) fn shutdown(&mut self) -> Result<(), CliError> {
        if self.autosave.flush().is_some() || self.unsaved_changes > 0 {
            match self.persist() {
                Ok(outcome) => output::info(format!(
                    "Saved {} records before exit.",
                    outcome.saved.total()
                )),
                Err(err) => self.report_error(err)?,
            }
        }
        self.session.teardown();
        Ok(())
    }

    /// Applies new preferences to the running shell.
    pub(crate) fn apply_config(&mut self, config: Config) -> Result<(), CommandError> {
        let data_root = config.resolve_data_root(&self.base_dir);
        let store = JsonFinanceStore::new(StoragePaths::under(&data_root), &config.profile_name)?;
        let store_changed = store.document_path() != self.store.document_path();

        self.money = MoneyFormatter::for_locale(&config.currency, &config.locale);
        self.autosave = Debouncer::new(Duration::milliseconds(config.autosave_delay_ms as i64));
        set_preferences(OutputPreferences {
            plain: self.mode == CliMode::Script || !config.ui_color_enabled,
        });
        self.config = config;

        if store_changed {
            if self.unsaved_changes > 0 {
                self.persist()?;
            }
            self.store = store;
            self.load_records()?;
        }
        Ok(())
    }
}
