//! Replaying adapter for the `Prompt` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::prompt::Prompt;

/// Replays recorded confirmations from a cassette.
pub struct ReplayingPrompt {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingPrompt {
    /// Creates a new replaying prompt from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Prompt for ReplayingPrompt {
    fn confirm(
        &self,
        _message: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "prompt", "confirm");
        replay_result(&output, "prompt::confirm")
    }
}
