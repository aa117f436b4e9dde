//! CLI-based test fixture
//!
//! Spawns the planscope binary as a separate process against plan files
//! written into a temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary workspace holding plan files for CLI invocations
pub struct CliFixture {
    temp_dir: TempDir,
}

/// Captured result of one CLI invocation
pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Write a file into the fixture directory
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Run the CLI with the given arguments
    pub fn run<I, S>(&self, args: I) -> CliOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let output: Output = Command::new(env!("CARGO_BIN_EXE_planscope"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "error")
            .output()
            .expect("Failed to spawn planscope");

        CliOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
