//! Shell executor port for running external commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The output of a shell command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

/// Executes shell commands.
///
/// The installer drives `tar`, `./configure`, and `make` through this
/// port; the extractor uses it to run the scaffold tool. Abstracting
/// shell execution allows deterministic replay by recording and
/// replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string in the system shell and returns its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or fails to execute.
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;

    /// Runs a command string with the given working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or fails to execute.
    fn run_in(
        &self,
        dir: &Path,
        command: &str,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;

    /// Runs a command with stdin/stdout/stderr inherited from this
    /// process and returns its exit code.
    ///
    /// Used for tools that interact with the user directly, such as the
    /// scaffold tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    fn run_interactive(
        &self,
        command: &str,
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;
}
