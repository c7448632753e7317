use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs the `gos` binary against a throwaway database.
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("test.db");

        Self { temp_dir, db_path }
    }

    /// A command with an isolated database and no `gos.toml` in reach.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gos").expect("Failed to find gos binary");
        cmd.current_dir(self.temp_dir.path())
            .env("GOS_DATABASE_PATH", &self.db_path)
            .env("GOS_TIMEZONE", "UTC")
            .env_remove("GOS_LOG");
        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Adds a mission and returns the short ID printed for it.
    pub fn add_mission(&self, args: &[&str]) -> String {
        let mut full = vec!["mission", "add"];
        full.extend_from_slice(args);
        let output = self.run_success(&full).get_output().stdout.clone();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output));

        stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix("→ ID: "))
            .map(|id| id.trim().to_string())
            .expect("mission add did not print an ID")
    }
}

/// Drops ANSI color sequences so output can be matched as plain text.
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}
