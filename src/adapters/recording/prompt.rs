//! Recording adapter for the `Prompt` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Prompt;

/// Records prompt interactions while delegating to an inner implementation.
pub struct RecordingPrompt {
    inner: Box<dyn Prompt>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPrompt {
    /// Creates a new recording prompt wrapping the given implementation.
    pub fn new(inner: Box<dyn Prompt>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct MessageInput<'a> {
    message: &'a str,
}

impl Prompt for RecordingPrompt {
    fn confirm(
        &self,
        message: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.confirm(message);
        let input = MessageInput { message };
        record_result(&self.recorder, "prompt", "confirm", &input, &result);
        result
    }
}
