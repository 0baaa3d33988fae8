//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingGitRepo, RecordingHttpClient, RecordingPrompt,
    RecordingShellExecutor,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingGitRepo, ReplayingHttpClient, ReplayingPrompt,
    ReplayingShellExecutor,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::ports::http::{HttpClient, HttpFuture};
use crate::ports::prompt::Prompt;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Git for cloning and updating companion repositories.
    pub git: Box<dyn GitRepo>,
    /// HTTP client for downloads and reference-database queries.
    pub http: Box<dyn HttpClient>,
    /// Prompt for interactive confirmation.
    pub prompt: Box<dyn Prompt>,
    /// Shell executor for running commands.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::git::LiveGitRepo;
        use crate::adapters::live::http::LiveHttpClient;
        use crate::adapters::live::prompt::LivePrompt;
        use crate::adapters::live::shell::LiveShellExecutor;

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            http: Box::new(LiveHttpClient::new()),
            prompt: Box::new(LivePrompt),
            shell: Box::new(LiveShellExecutor),
        }
    }

    /// Creates a recording context that captures per-port cassettes.
    ///
    /// Uses live adapters for actual work and wraps each in a recording
    /// adapter writing into `dir`. This is the developer-only mechanism
    /// for capturing cassettes via the `SILT_RECORD` env var. The caller
    /// must drop the context and then `finish` the returned session to
    /// flush the cassette files.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::git::LiveGitRepo;
        use crate::adapters::live::http::LiveHttpClient;
        use crate::adapters::live::prompt::LivePrompt;
        use crate::adapters::live::shell::LiveShellExecutor;

        let session = RecordingSession::new(dir)?;

        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&session.fs),
            )),
            git: Box::new(RecordingGitRepo::new(Box::new(LiveGitRepo), Arc::clone(&session.git))),
            http: Box::new(RecordingHttpClient::new(
                Box::new(LiveHttpClient::new()),
                Arc::clone(&session.http),
            )),
            prompt: Box::new(RecordingPrompt::new(
                Box::new(LivePrompt),
                Arc::clone(&session.prompt),
            )),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&session.shell),
            )),
        };

        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette — each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        // Each port gets its own replayer from the same cassette so that
        // per-port cursors are independent.
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette))),
            http: Box::new(ReplayingHttpClient::new(CassetteReplayer::new(&cassette))),
            prompt: Box::new(ReplayingPrompt::new(CassetteReplayer::new(&cassette))),
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Each port can have its own cassette file. Ports without a configured
    /// cassette file will use a panicking adapter that fails with a clear
    /// message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(PanickingGitRepo),
            },
            http: match replayers.http {
                Some(r) => Box::new(ReplayingHttpClient::new(r)),
                None => Box::new(PanickingHttpClient),
            },
            prompt: match replayers.prompt {
                Some(r) => Box::new(ReplayingPrompt::new(r)),
                None => Box::new(PanickingPrompt),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig — no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn is_dir(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn create_dir_all(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn copy_file(
        &self,
        _src: &Path,
        _dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn remove_file(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn remove_dir_all(
        &self,
        _path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn rename(
        &self,
        _src: &Path,
        _dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
}

struct PanickingGitRepo;
impl GitRepo for PanickingGitRepo {
    fn clone(
        &self,
        _url: &str,
        _branch: &str,
        _dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("GitRepo port not configured in CassetteConfig — no cassette loaded for git");
    }
    fn checkout(
        &self,
        _dir: &Path,
        _branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("GitRepo port not configured in CassetteConfig — no cassette loaded for git");
    }
}

struct PanickingHttpClient;
impl HttpClient for PanickingHttpClient {
    fn download<'a>(&'a self, _url: &str, _dest: &Path) -> HttpFuture<'a, ()> {
        panic!("HttpClient port not configured in CassetteConfig — no cassette loaded for http");
    }
    fn get_text<'a>(&'a self, _url: &str) -> HttpFuture<'a, String> {
        panic!("HttpClient port not configured in CassetteConfig — no cassette loaded for http");
    }
}

struct PanickingPrompt;
impl Prompt for PanickingPrompt {
    fn confirm(
        &self,
        _message: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        panic!("Prompt port not configured in CassetteConfig — no cassette loaded for prompt");
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(
        &self,
        _command: &str,
    ) -> Result<crate::ports::shell::ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor port not configured in CassetteConfig — no cassette loaded for shell");
    }
    fn run_in(
        &self,
        _dir: &Path,
        _command: &str,
    ) -> Result<crate::ports::shell::ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor port not configured in CassetteConfig — no cassette loaded for shell");
    }
    fn run_interactive(
        &self,
        _command: &str,
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor port not configured in CassetteConfig — no cassette loaded for shell");
    }
}
