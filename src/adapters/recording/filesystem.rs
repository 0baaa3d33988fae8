//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a str,
    contents: &'a str,
}

#[derive(Serialize)]
struct SrcDestInput<'a> {
    src: &'a str,
    dest: &'a str,
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        let input = PathInput { path: &display(path) };
        record_result(&self.recorder, "fs", "read_to_string", &input, &result);
        result
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: &display(path), contents };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let input = PathInput { path: &display(path) };
        record_interaction(&self.recorder, "fs", "exists", &input, &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        let input = PathInput { path: &display(path) };
        record_interaction(&self.recorder, "fs", "is_dir", &input, &result);
        result
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.list_dir(path);
        let input = PathInput { path: &display(path) };
        record_result(&self.recorder, "fs", "list_dir", &input, &result);
        result
    }

    fn create_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.create_dir_all(path);
        let input = PathInput { path: &display(path) };
        record_result(&self.recorder, "fs", "create_dir_all", &input, &result);
        result
    }

    fn copy_file(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.copy_file(src, dest);
        let input = SrcDestInput { src: &display(src), dest: &display(dest) };
        record_result(&self.recorder, "fs", "copy_file", &input, &result);
        result
    }

    fn remove_file(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.remove_file(path);
        let input = PathInput { path: &display(path) };
        record_result(&self.recorder, "fs", "remove_file", &input, &result);
        result
    }

    fn remove_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.remove_dir_all(path);
        let input = PathInput { path: &display(path) };
        record_result(&self.recorder, "fs", "remove_dir_all", &input, &result);
        result
    }

    fn rename(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.rename(src, dest);
        let input = SrcDestInput { src: &display(src), dest: &display(dest) };
        record_result(&self.recorder, "fs", "rename", &input, &result);
        result
    }
}
