//! Path resolution for an extraction run.

use std::path::{Component, Path, PathBuf};

use crate::context::ServiceContext;

/// Resolved locations for an extraction run.
///
/// Created once per invocation and never mutated. All later phases
/// resolve against these paths.
#[derive(Debug, Clone)]
pub struct ModulePaths {
    root: PathBuf,
    name: String,
    parent: PathBuf,
    subfolders: Vec<PathBuf>,
}

impl ModulePaths {
    /// Resolves the module directory and subfolder arguments.
    ///
    /// The command must be invoked one level above `module_dir`. Each
    /// subfolder may be given with or without the leading module-dir
    /// component; both forms resolve to the same in-module path.
    ///
    /// # Errors
    ///
    /// Returns an error if `module_dir` is not a directory, or if any
    /// subfolder does not exist as a directory beneath it.
    pub fn resolve(
        ctx: &ServiceContext,
        module_dir: &str,
        subfolders: &[String],
    ) -> Result<Self, String> {
        let trimmed = module_dir.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err("Module directory must not be empty".to_string());
        }

        let root = absolutize(Path::new(trimmed))?;
        if !ctx.fs.is_dir(&root) {
            return Err(format!(
                "No module directory {trimmed} found. Run this command one level above it."
            ));
        }

        let name = root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Cannot determine module name from {}", root.display()))?
            .to_string();
        let parent = root
            .parent()
            .ok_or_else(|| format!("Module directory {} has no parent", root.display()))?
            .to_path_buf();

        let mut resolved = Vec::new();
        for sub in subfolders {
            let stripped = sub
                .trim_end_matches('/')
                .strip_prefix(&format!("{trimmed}/"))
                .unwrap_or(sub.trim_end_matches('/'));
            let rel = PathBuf::from(stripped);
            if !ctx.fs.is_dir(&root.join(&rel)) {
                return Err(format!("Subfolder {sub} does not exist in module {name}"));
            }
            resolved.push(rel);
        }

        Ok(Self { root, name, parent, subfolders: resolved })
    }

    /// Absolute path of the module root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The module's directory name (its include prefix).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory containing the module, where the new module is created.
    #[must_use]
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Requested subfolders, relative to the module root.
    #[must_use]
    pub fn subfolders(&self) -> &[PathBuf] {
        &self.subfolders
    }

    /// Absolute paths of the requested subfolders.
    #[must_use]
    pub fn subfolder_paths(&self) -> Vec<PathBuf> {
        self.subfolders.iter().map(|s| self.root.join(s)).collect()
    }

    /// Maps a path inside this module to its place in the new module,
    /// substituting the module-name component.
    ///
    /// Returns `None` for paths outside the module root.
    #[must_use]
    pub fn dest_for(&self, path: &Path, new_module: &str) -> Option<PathBuf> {
        let rel = path.strip_prefix(&self.root).ok()?;
        Some(self.parent.join(new_module).join(rel))
    }
}

/// Makes a path absolute against the current working directory.
fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to determine working directory: {e}"))?;
    Ok(normalize(&cwd.join(path)))
}

/// Lexically normalizes a path, resolving `.` and `..` components.
///
/// Purely textual; symlinks are not followed. Used to give every
/// discovered header one canonical spelling so the visited-set
/// deduplicates correctly.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}
