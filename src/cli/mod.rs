pub mod commands;
mod completion;
pub mod error;
pub mod help;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;
pub mod table;

pub use error::{CliError, CommandError, CommandResult};
pub use shell::run_cli;
