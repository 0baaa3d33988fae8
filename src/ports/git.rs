//! Git port for cloning and updating companion repositories.

use std::path::Path;

/// Provides the git operations the installer needs.
///
/// Abstracting git access allows deterministic replay and testing
/// without network access or a real repository.
pub trait GitRepo: Send + Sync {
    /// Clones `url` at the given branch into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails (network, missing branch,
    /// existing destination).
    fn clone(
        &self,
        url: &str,
        branch: &str,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Checks out the given branch in an existing clone at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout fails or `dir` is not a clone.
    fn checkout(
        &self,
        dir: &Path,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
