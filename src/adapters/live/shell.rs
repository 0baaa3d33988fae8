//! Live shell executor using `std::process::Command`.

use std::path::Path;
use std::process::Command;

use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Live shell executor that runs commands via the system shell.
pub struct LiveShellExecutor;

fn to_output(output: &std::process::Output) -> ShellOutput {
    ShellOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("sh").arg("-c").arg(command).output()?;
        Ok(to_output(&output))
    }

    fn run_in(
        &self,
        dir: &Path,
        command: &str,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("sh").arg("-c").arg(command).current_dir(dir).output()?;
        Ok(to_output(&output))
    }

    fn run_interactive(
        &self,
        command: &str,
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let status = Command::new("sh").arg("-c").arg(command).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
