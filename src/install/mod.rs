//! External-dependency installer.
//!
//! Installs a fixed catalog of companion repositories (git clones next
//! to the framework checkout) and third-party libraries (tarballs
//! downloaded, unpacked, and built under `external/`). There is no
//! retry or version solving; each package either installs or the run
//! aborts with the failing step's output.

pub mod catalog;

use std::path::Path;

use crate::context::ServiceContext;

pub use catalog::{expand_selection, InstallConfig, Package, PackageKind};

/// Behavior flags for an install run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Stop after fetching; skip unpack and build steps.
    pub download_only: bool,
    /// Remove the package's installed files instead of installing.
    pub cleanup: bool,
}

/// Installs (or cleans) every package in `packages`, in order.
///
/// # Errors
///
/// Returns an error on the first package whose download, unpack, or
/// build step fails; packages processed before it stay installed.
pub async fn run(
    ctx: &ServiceContext,
    config: &InstallConfig,
    packages: &[&Package],
    options: InstallOptions,
) -> Result<(), String> {
    for package in packages {
        if options.cleanup {
            clean_package(ctx, config, package)?;
            continue;
        }
        match &package.kind {
            PackageKind::Repository { url, dir, branch } => {
                install_repository(ctx, config, package.name, url, dir, &branch.resolve(config))?;
            }
            PackageKind::Library {
                url,
                archive,
                unpacked_dir,
                dir,
                build,
                strip_from_configure,
                hints,
            } => {
                install_library(
                    ctx,
                    config,
                    options,
                    LibrarySteps {
                        name: package.name,
                        url,
                        archive,
                        unpacked_dir,
                        dir,
                        build,
                        strip_from_configure: *strip_from_configure,
                        hints,
                    },
                )
                .await?;
            }
        }
    }
    Ok(())
}

/// Clones a companion repository, or updates an existing clone to the
/// release branch.
fn install_repository(
    ctx: &ServiceContext,
    config: &InstallConfig,
    name: &str,
    url: &str,
    dir: &str,
    branch: &str,
) -> Result<(), String> {
    check_workspace_layout(ctx, config)?;

    let dest = config.top_dir.join(dir);
    if ctx.fs.exists(&dest) {
        println!("Skip cloning {dir} because the folder already exists.");
        ctx.git
            .checkout(&dest, branch)
            .map_err(|e| format!("Failed to switch {dir} to {branch}: {e}"))?;
        return Ok(());
    }

    println!("Cloning {name} into {dir}");
    ctx.git.clone(url, branch, &dest).map_err(|e| format!("Failed to clone {url}: {e}"))?;
    Ok(())
}

/// The steps for one third-party library, resolved from the catalog.
struct LibrarySteps<'a> {
    name: &'a str,
    url: &'a str,
    archive: &'a str,
    unpacked_dir: &'a str,
    dir: &'a str,
    build: &'a [&'a str],
    strip_from_configure: Option<&'a str>,
    hints: &'a [&'a str],
}

/// Downloads, unpacks, and builds a third-party library under the
/// external directory.
async fn install_library(
    ctx: &ServiceContext,
    config: &InstallConfig,
    options: InstallOptions,
    steps: LibrarySteps<'_>,
) -> Result<(), String> {
    ctx.fs
        .create_dir_all(&config.external_dir)
        .map_err(|e| format!("Failed to create {}: {e}", config.external_dir.display()))?;

    let archive_path = config.external_dir.join(steps.archive);
    if ctx.fs.exists(&archive_path) {
        println!("Skip downloading {} because the archive already exists.", steps.archive);
    } else {
        println!("Downloading {}", steps.url);
        ctx.http
            .download(steps.url, &archive_path)
            .await
            .map_err(|e| format!("Failed to download {}: {e}", steps.url))?;
    }

    if options.download_only {
        return Ok(());
    }

    let lib_dir = config.external_dir.join(steps.dir);
    if ctx.fs.exists(&lib_dir) {
        ctx.fs
            .remove_dir_all(&lib_dir)
            .map_err(|e| format!("Failed to remove stale {}: {e}", lib_dir.display()))?;
    }

    run_step(ctx, &config.external_dir, &format!("tar -xzf {}", steps.archive))?;
    if steps.unpacked_dir != steps.dir {
        let unpacked = config.external_dir.join(steps.unpacked_dir);
        ctx.fs.rename(&unpacked, &lib_dir).map_err(|e| {
            format!("Failed to rename {} to {}: {e}", unpacked.display(), lib_dir.display())
        })?;
    }

    if let Some(needle) = steps.strip_from_configure {
        patch_configure(ctx, &lib_dir, needle)?;
    }

    for command in steps.build {
        println!("[{}] {command}", steps.name);
        run_step(ctx, &lib_dir, command)?;
    }
    println!("Successfully installed {}.", steps.name);

    for hint in steps.hints {
        println!("{hint}");
    }
    Ok(())
}

/// Removes whatever the package installed.
fn clean_package(
    ctx: &ServiceContext,
    config: &InstallConfig,
    package: &Package,
) -> Result<(), String> {
    let dir = match &package.kind {
        PackageKind::Repository { dir, .. } => config.top_dir.join(dir),
        PackageKind::Library { dir, .. } => config.external_dir.join(dir),
    };
    if ctx.fs.exists(&dir) {
        ctx.fs
            .remove_dir_all(&dir)
            .map_err(|e| format!("Failed to remove {}: {e}", dir.display()))?;
        println!("{} is removed.", package.name);
    }
    Ok(())
}

/// Companion repositories sit next to `mesh-common`; cloning anywhere
/// else produces a checkout the build system will never find.
fn check_workspace_layout(ctx: &ServiceContext, config: &InstallConfig) -> Result<(), String> {
    if ctx.fs.is_dir(&config.top_dir.join("mesh-common")) {
        Ok(())
    } else {
        Err("mesh-common not found. Run silt install from the directory that contains \
             the mesh-common checkout."
            .to_string())
    }
}

/// Runs one shell command in `dir`, failing on a non-zero exit code.
fn run_step(ctx: &ServiceContext, dir: &Path, command: &str) -> Result<(), String> {
    let output = ctx
        .shell
        .run_in(dir, command)
        .map_err(|e| format!("Failed to run `{command}` in {}: {e}", dir.display()))?;
    if output.exit_code != 0 {
        return Err(format!(
            "`{command}` in {} failed with exit code {}: {}",
            dir.display(),
            output.exit_code,
            output.stderr.trim()
        ));
    }
    Ok(())
}

/// Drops a problematic substring from a library's `configure` script.
fn patch_configure(ctx: &ServiceContext, lib_dir: &Path, needle: &str) -> Result<(), String> {
    let configure = lib_dir.join("configure");
    let content = ctx
        .fs
        .read_to_string(&configure)
        .map_err(|e| format!("Failed to read {}: {e}", configure.display()))?;
    ctx.fs
        .write(&configure, &content.replace(needle, ""))
        .map_err(|e| format!("Failed to write {}: {e}", configure.display()))
}
