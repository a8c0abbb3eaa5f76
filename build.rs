use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let git_hash = run("git", &["rev-parse", "--short", "HEAD"]);
    let git_status = run("git", &["status", "--porcelain"]).map(|porcelain| {
        if porcelain.is_empty() {
            "clean".to_string()
        } else {
            "dirty".to_string()
        }
    });
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    stamp("HASH", git_hash.unwrap_or_else(unknown));
    stamp("STATUS", git_status.unwrap_or_else(unknown));
    stamp("TIMESTAMP", timestamp);
    stamp("TARGET", env::var("TARGET").unwrap_or_else(|_| unknown()));
    stamp("PROFILE", env::var("PROFILE").unwrap_or_else(|_| unknown()));
    stamp("RUSTC", run("rustc", &["--version"]).unwrap_or_else(unknown));
}

fn stamp(key: &str, value: String) {
    println!("cargo:rustc-env=PITAKA_BUILD_{key}={value}");
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Trimmed stdout of a successful command.
fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|stdout| stdout.trim().to_string())
}
