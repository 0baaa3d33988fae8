//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn copy_file(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(src, dest)?;
        Ok(())
    }

    fn remove_file(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::remove_file(path)?)
    }

    fn remove_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::remove_dir_all(path)?)
    }

    fn rename(
        &self,
        src: &Path,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::rename(src, dest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_file_contents() {
        let dir = std::env::temp_dir().join("silt_live_fs_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("nested/out.txt");

        let fs = LiveFileSystem;
        fs.write(&path, "contents").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "contents");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = std::env::temp_dir().join("silt_live_fs_sorted");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.txt"), "").unwrap();
        std::fs::write(dir.join("a.txt"), "").unwrap();

        let fs = LiveFileSystem;
        assert_eq!(fs.list_dir(&dir).unwrap(), vec!["a.txt", "b.txt"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn copy_file_creates_parent_directories() {
        let dir = std::env::temp_dir().join("silt_live_fs_copy");
        std::fs::create_dir_all(&dir).unwrap();
        let src = dir.join("src.hh");
        std::fs::write(&src, "header").unwrap();

        let fs = LiveFileSystem;
        let dest = dir.join("deep/tree/src.hh");
        fs.copy_file(&src, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "header");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
