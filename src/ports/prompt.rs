//! Prompt port for interactive confirmation.

/// Asks the user to confirm before a destructive or long-running step.
///
/// The extract command prints an explanation of everything it is about
/// to do and waits for confirmation before running the scaffold tool.
/// Abstracting the prompt keeps that flow replayable in tests.
pub trait Prompt: Send + Sync {
    /// Shows `message` and waits for the user to confirm.
    ///
    /// Returns `true` if the user confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&self, message: &str)
        -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
