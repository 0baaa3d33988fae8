//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod prompt;
pub mod shell;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use http::ReplayingHttpClient;
pub use prompt::ReplayingPrompt;
pub use shell::ReplayingShellExecutor;

/// Pops the next recorded output for the given port/method pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Converts a recorded output into a `Result` using the ok/err convention.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
