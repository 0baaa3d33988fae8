//! Recording adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::GitRepo;

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CloneInput<'a> {
    url: &'a str,
    branch: &'a str,
    dest: &'a str,
}

#[derive(Serialize)]
struct CheckoutInput<'a> {
    dir: &'a str,
    branch: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn clone(
        &self,
        url: &str,
        branch: &str,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.clone(url, branch, dest);
        let input = CloneInput { url, branch, dest: &dest.display().to_string() };
        record_result(&self.recorder, "git", "clone", &input, &result);
        result
    }

    fn checkout(
        &self,
        dir: &Path,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.checkout(dir, branch);
        let input = CheckoutInput { dir: &dir.display().to_string(), branch };
        record_result(&self.recorder, "git", "checkout", &input, &result);
        result
    }
}
