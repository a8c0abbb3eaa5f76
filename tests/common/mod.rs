use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const TODAY: &str = "2024-03-16";

/// Fresh, isolated `PITAKA_HOME`.
pub fn pitaka_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Script-mode shell bound to `home` with the reference date pinned.
pub fn shell(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pitaka_cli").expect("pitaka_cli binary");
    cmd.env("PITAKA_CLI_SCRIPT", "1")
        .env("PITAKA_HOME", home)
        .env("PITAKA_TODAY", TODAY)
        .env_remove("RUST_LOG");
    cmd
}

pub fn data_file(home: &Path) -> PathBuf {
    home.join("data").join("default.json")
}
