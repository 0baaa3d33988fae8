//! Tree materialization: copy discovered files into the new module.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::extract::headers::HeaderSet;
use crate::extract::paths::ModulePaths;

/// Copies every discovered header and every source-containing directory
/// into the new module, substituting the module-name path component.
///
/// Source directories are copied whole, so data and reference files
/// that sit next to the sources ride along. Re-running against an existing
/// destination is not an error; unrelated files already there are left
/// alone.
///
/// # Errors
///
/// Returns an error on the first unreadable source or unwritable
/// destination. Files copied before the failure are left in place;
/// re-running from scratch is the recovery path.
pub fn materialize(
    ctx: &ServiceContext,
    paths: &ModulePaths,
    headers: &HeaderSet,
    sources: &[PathBuf],
    new_module: &str,
) -> Result<(), String> {
    for header in headers {
        let Some(dest) = paths.dest_for(header, new_module) else {
            continue;
        };
        ctx.fs.copy_file(header, &dest).map_err(|e| {
            format!("Failed to copy {} to {}: {e}", header.display(), dest.display())
        })?;
    }

    for dir in source_directories(sources) {
        let Some(dest) = paths.dest_for(&dir, new_module) else {
            continue;
        };
        copy_tree(ctx, &dir, &dest)?;
    }

    Ok(())
}

/// The distinct directories containing the seed sources, in order.
fn source_directories(sources: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for source in sources {
        if let Some(parent) = source.parent() {
            if !dirs.iter().any(|d| d == parent) {
                dirs.push(parent.to_path_buf());
            }
        }
    }
    dirs
}

/// Recursively copies `src` into `dest`, creating directories as needed.
fn copy_tree(ctx: &ServiceContext, src: &Path, dest: &Path) -> Result<(), String> {
    ctx.fs
        .create_dir_all(dest)
        .map_err(|e| format!("Failed to create directory {}: {e}", dest.display()))?;

    let entries = ctx
        .fs
        .list_dir(src)
        .map_err(|e| format!("Failed to read directory {}: {e}", src.display()))?;
    for name in entries {
        let from = src.join(&name);
        let to = dest.join(&name);
        if ctx.fs.is_dir(&from) {
            copy_tree(ctx, &from, &to)?;
        } else {
            ctx.fs.copy_file(&from, &to).map_err(|e| {
                format!("Failed to copy {} to {}: {e}", from.display(), to.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::headers::collect_headers;
    use crate::extract::sources::enumerate_sources;

    fn fixture(name: &str) -> (PathBuf, ServiceContext) {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("proj/app/data")).unwrap();
        std::fs::create_dir_all(dir.join("proj/core")).unwrap();
        std::fs::write(
            dir.join("proj/app/main.cc"),
            "#include \"helper.hh\"\n#include <proj/core/util.hh>\n",
        )
        .unwrap();
        std::fs::write(dir.join("proj/app/helper.hh"), "\n").unwrap();
        std::fs::write(dir.join("proj/app/data/input.csv"), "1,2,3\n").unwrap();
        std::fs::write(dir.join("proj/core/util.hh"), "\n").unwrap();
        (dir, ServiceContext::live())
    }

    fn run_extraction(dir: &Path, ctx: &ServiceContext) {
        let module = dir.join("proj").display().to_string();
        let paths = ModulePaths::resolve(ctx, &module, &["app".to_string()]).unwrap();
        let sources = enumerate_sources(ctx, &paths).unwrap();
        let headers = collect_headers(ctx, &paths, &sources).unwrap();
        materialize(ctx, &paths, &headers, &sources, "extracted").unwrap();
    }

    #[test]
    fn copies_headers_and_source_tree() {
        let (dir, ctx) = fixture("silt_materialize_basic");
        run_extraction(&dir, &ctx);

        assert!(dir.join("extracted/app/main.cc").exists());
        assert!(dir.join("extracted/app/helper.hh").exists());
        assert!(dir.join("extracted/core/util.hh").exists());
        // Data files next to the sources ride along.
        assert!(dir.join("extracted/app/data/input.csv").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rerun_preserves_unrelated_destination_files() {
        let (dir, ctx) = fixture("silt_materialize_idempotent");
        std::fs::create_dir_all(dir.join("extracted")).unwrap();
        std::fs::write(dir.join("extracted/NOTES.md"), "keep me\n").unwrap();

        run_extraction(&dir, &ctx);
        run_extraction(&dir, &ctx);

        assert_eq!(
            std::fs::read_to_string(dir.join("extracted/NOTES.md")).unwrap(),
            "keep me\n"
        );
        assert!(dir.join("extracted/app/main.cc").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
