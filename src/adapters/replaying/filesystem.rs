//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(&output, "fs::read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "write");
        replay_result(&output, "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "exists");
        output.as_bool().expect("fs::exists: expected boolean output")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "is_dir");
        output.as_bool().expect("fs::is_dir: expected boolean output")
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "list_dir");
        replay_result(&output, "fs::list_dir")
    }

    fn create_dir_all(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "create_dir_all");
        replay_result(&output, "fs::create_dir_all")
    }

    fn copy_file(
        &self,
        _src: &Path,
        _dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "copy_file");
        replay_result(&output, "fs::copy_file")
    }

    fn remove_file(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "remove_file");
        replay_result(&output, "fs::remove_file")
    }

    fn remove_dir_all(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "remove_dir_all");
        replay_result(&output, "fs::remove_dir_all")
    }

    fn rename(
        &self,
        _src: &Path,
        _dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "rename");
        replay_result(&output, "fs::rename")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_read_to_string() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "fs".into(),
            method: "read_to_string".into(),
            input: json!({"path": "/a.hh"}),
            output: json!({"ok": "#include <silt/common/base.hh>\n"}),
        }]);
        let fs = ReplayingFileSystem::new(replayer);
        let content = fs.read_to_string(Path::new("/a.hh")).unwrap();
        assert!(content.contains("base.hh"));
    }

    #[test]
    fn replays_error_result() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "fs".into(),
            method: "list_dir".into(),
            input: json!({"path": "/missing"}),
            output: json!({"err": "No such file or directory"}),
        }]);
        let fs = ReplayingFileSystem::new(replayer);
        let result = fs.list_dir(Path::new("/missing"));
        assert!(result.is_err());
    }
}
