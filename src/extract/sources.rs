//! Source enumeration: find the compiled sources to seed the closure walk.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::extract::paths::ModulePaths;

/// Filename suffix of compiled source files.
pub const SOURCE_SUFFIX: &str = ".cc";

/// Enumerates every `.cc` file beneath the requested subfolders.
///
/// The walk is depth-first over sorted directory listings, so the
/// result order is deterministic.
///
/// # Errors
///
/// Returns an error if a directory cannot be read, or if no source
/// files are found at all (there is nothing to extract).
pub fn enumerate_sources(
    ctx: &ServiceContext,
    paths: &ModulePaths,
) -> Result<Vec<PathBuf>, String> {
    let mut sources = Vec::new();
    for subfolder in paths.subfolder_paths() {
        for file in walk_files(ctx, &subfolder)? {
            if file.to_str().is_some_and(|f| f.ends_with(SOURCE_SUFFIX)) {
                sources.push(file);
            }
        }
    }

    if sources.is_empty() {
        let requested: Vec<String> =
            paths.subfolders().iter().map(|s| s.display().to_string()).collect();
        return Err(format!(
            "No source files {SOURCE_SUFFIX} found in the directories {}",
            requested.join(" ")
        ));
    }

    Ok(sources)
}

/// Collects every regular file beneath `dir`, depth-first over sorted
/// directory listings.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub(crate) fn walk_files(ctx: &ServiceContext, dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    let entries = ctx
        .fs
        .list_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
    for name in entries {
        let path = dir.join(&name);
        if ctx.fs.is_dir(&path) {
            files.extend(walk_files(ctx, &path)?);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("proj/app/nested")).unwrap();
        std::fs::create_dir_all(dir.join("proj/core")).unwrap();
        std::fs::write(dir.join("proj/app/main.cc"), "int main() {}\n").unwrap();
        std::fs::write(dir.join("proj/app/helper.hh"), "\n").unwrap();
        std::fs::write(dir.join("proj/app/nested/extra.cc"), "\n").unwrap();
        dir
    }

    fn resolve(ctx: &ServiceContext, dir: &Path, subfolders: &[&str]) -> ModulePaths {
        let module = dir.join("proj").display().to_string();
        let subs: Vec<String> = subfolders.iter().map(|s| (*s).to_string()).collect();
        ModulePaths::resolve(ctx, &module, &subs).unwrap()
    }

    #[test]
    fn finds_sources_recursively() {
        let dir = fixture("silt_sources_recursive");
        let ctx = ServiceContext::live();
        let paths = resolve(&ctx, &dir, &["app"]);

        let sources = enumerate_sources(&ctx, &paths).unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().any(|s| s.ends_with("app/main.cc")));
        assert!(sources.iter().any(|s| s.ends_with("app/nested/extra.cc")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn headers_are_not_sources() {
        let dir = fixture("silt_sources_headers");
        let ctx = ServiceContext::live();
        let paths = resolve(&ctx, &dir, &["app"]);

        let sources = enumerate_sources(&ctx, &paths).unwrap();
        assert!(sources.iter().all(|s| !s.to_string_lossy().ends_with(".hh")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_subfolder_yields_discovery_error() {
        let dir = fixture("silt_sources_empty");
        let ctx = ServiceContext::live();
        let paths = resolve(&ctx, &dir, &["core"]);

        let result = enumerate_sources(&ctx, &paths);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("No source files"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
