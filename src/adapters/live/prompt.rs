//! Live prompt adapter reading from stdin.

use std::io::{BufRead, Write};

use crate::ports::prompt::Prompt;

/// Live prompt that writes to stdout and reads a line from stdin.
pub struct LivePrompt;

impl Prompt for LivePrompt {
    fn confirm(
        &self,
        message: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        print!("{message}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let bytes = std::io::stdin().lock().read_line(&mut line)?;
        // EOF (e.g. closed stdin) counts as a decline rather than a hang.
        Ok(bytes > 0)
    }
}
