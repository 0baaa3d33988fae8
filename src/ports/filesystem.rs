//! Filesystem port for file and directory operations.

use std::path::Path;

/// Provides filesystem access for the extractor and installer.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk. The extractor's directory walks are
/// built on `is_dir`/`list_dir`; everything it copies goes through
/// `copy_file` and `create_dir_all`.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entries in a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a directory and all missing parents. Succeeds if the
    /// directory already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Copies a single file to the destination path, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreadable or the destination
    /// is unwritable.
    fn copy_file(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Removes a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be removed.
    fn remove_file(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Removes a directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Renames a file or directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not exist or the rename fails.
    fn rename(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
