//! `silt install` command.

use crate::context::ServiceContext;
use crate::install::{self, expand_selection, InstallConfig, InstallOptions};

/// Execute the `install` command.
///
/// The working directory is taken as the workspace top: companion
/// repositories are cloned next to it and libraries build under
/// `external/`.
///
/// # Errors
///
/// Returns an error string if a package name is unknown or any install
/// step fails.
pub fn run_with_context(
    ctx: &ServiceContext,
    packages: &[String],
    download: bool,
    clean: bool,
) -> Result<(), String> {
    let selection = expand_selection(packages)?;
    let top_dir = std::env::current_dir()
        .map_err(|e| format!("Failed to determine working directory: {e}"))?;
    let config = InstallConfig::new(top_dir);
    let options = InstallOptions { download_only: download, cleanup: clean };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(install::run(ctx, &config, &selection, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_package_fails_before_touching_anything() {
        let ctx = ServiceContext::live();
        let result = run_with_context(&ctx, &["no-such-package".to_string()], false, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown package"));
    }
}
