//! Live git adapter using `git` CLI commands.

use std::path::Path;
use std::process::Command;

use crate::ports::git::GitRepo;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn clone(
        &self,
        url: &str,
        branch: &str,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("git")
            .args(["clone", url, "-b", branch])
            .arg(dest)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git clone {url} failed: {stderr}").into());
        }
        Ok(())
    }

    fn checkout(
        &self,
        dir: &Path,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["checkout", branch])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git checkout {branch} failed: {stderr}").into());
        }
        Ok(())
    }
}
