//! Header closure walk: discover every header the seed sources reach.
//!
//! Include directives are extracted textually. Bracketed includes are
//! followed only when they reference the module's own include tree;
//! everything else is an external dependency and stays out of scope.
//! Conditional compilation is not evaluated; an include is followed
//! regardless of any `#ifdef` around it.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::context::ServiceContext;
use crate::extract::paths::{normalize, ModulePaths};

static BRACKET_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#include\s*<([^<>]+)>"#).expect("valid regex"));
static QUOTE_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#include\s*"([^"]+)""#).expect("valid regex"));

/// The set of headers discovered by the closure walk.
///
/// Deduplicated by normalized path; insertion order is preserved so
/// output and copying are deterministic. The set only ever grows.
#[derive(Debug, Default)]
pub struct HeaderSet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl HeaderSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning `true` if it was not yet present.
    fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    /// Returns `true` if the header is already in the set.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Iterates headers in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.order.iter()
    }

    /// Number of discovered headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no headers were discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Computes the transitive closure of headers reachable from `seeds`.
///
/// A single coordinator owns the visited set and drains a worklist;
/// the visited check is what breaks include cycles. Headers referenced
/// but missing on disk are skipped silently; not every textual include
/// resolves locally.
///
/// # Errors
///
/// Returns an error if a seed source cannot be read.
pub fn collect_headers(
    ctx: &ServiceContext,
    paths: &ModulePaths,
    seeds: &[PathBuf],
) -> Result<HeaderSet, String> {
    let mut headers = HeaderSet::new();
    let seed_set: HashSet<PathBuf> = seeds.iter().map(|s| normalize(s)).collect();
    let mut worklist: VecDeque<PathBuf> = VecDeque::new();
    for seed in seeds {
        let seed = normalize(seed);
        if !worklist.contains(&seed) {
            worklist.push_back(seed);
        }
    }

    while let Some(file) = worklist.pop_front() {
        let content = match ctx.fs.read_to_string(&file) {
            Ok(content) => content,
            // Seeds come from the enumerator and must be readable.
            Err(e) if seed_set.contains(&file) => {
                return Err(format!("Failed to read source {}: {e}", file.display()));
            }
            // A header that vanished between scheduling and reading.
            Err(_) => continue,
        };

        for include in scan_includes(&content, paths.name()) {
            let candidate = match include {
                Include::Bracketed(rel) => normalize(&paths.root().join(rel)),
                Include::Quoted(rel) => {
                    let dir = file.parent().unwrap_or_else(|| Path::new(""));
                    normalize(&dir.join(rel))
                }
            };
            // Headers that resolve outside the module tree cannot be
            // carried into the new module; they stay behind.
            if !candidate.starts_with(paths.root()) {
                continue;
            }
            if headers.contains(&candidate) || !ctx.fs.exists(&candidate) {
                continue;
            }
            headers.insert(candidate.clone());
            worklist.push_back(candidate);
        }
    }

    Ok(headers)
}

/// A single include directive, classified by its syntactic form.
enum Include {
    /// `#include <...>` resolved against the module root; the leading
    /// module-name component has already been stripped.
    Bracketed(PathBuf),
    /// `#include "..."` resolved against the including file's directory.
    Quoted(PathBuf),
}

/// Extracts the include directives of interest from `content`.
///
/// Bracketed includes are kept only when their first path component is
/// `module_name`, a self-reference into the module's include tree.
fn scan_includes(content: &str, module_name: &str) -> Vec<Include> {
    let mut includes = Vec::new();

    for capture in BRACKET_INCLUDE.captures_iter(content) {
        let include = Path::new(&capture[1]);
        let mut components = include.components();
        let first = components.next();
        if first.is_some_and(|c| c.as_os_str() == module_name) {
            includes.push(Include::Bracketed(components.as_path().to_path_buf()));
        }
    }

    for capture in QUOTE_INCLUDE.captures_iter(content) {
        includes.push(Include::Quoted(PathBuf::from(&capture[1])));
    }

    includes
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        dir: PathBuf,
        ctx: ServiceContext,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(name);
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(dir.join("proj/app")).unwrap();
            Self { dir, ctx: ServiceContext::live() }
        }

        fn file(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.dir.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
            path
        }

        fn paths(&self) -> ModulePaths {
            let module = self.dir.join("proj").display().to_string();
            ModulePaths::resolve(&self.ctx, &module, &["app".to_string()]).unwrap()
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn source_without_includes_yields_empty_set() {
        let fx = Fixture::new("silt_headers_none");
        let source = fx.file("proj/app/main.cc", "int main() { return 0; }\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn quoted_include_resolves_against_including_file() {
        let fx = Fixture::new("silt_headers_quoted");
        let source = fx.file("proj/app/main.cc", "#include \"sub/x.hh\"\n");
        let expected = fx.file("proj/app/sub/x.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert_eq!(headers.len(), 1);
        assert!(headers.contains(&expected));
    }

    #[test]
    fn bracketed_include_of_other_module_is_ignored() {
        let fx = Fixture::new("silt_headers_external");
        let source = fx.file(
            "proj/app/main.cc",
            "#include <othermodule/x.hh>\n#include <vector>\n",
        );
        // Even a resolvable path is out of scope when the prefix differs.
        fx.file("othermodule/x.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn cyclic_includes_terminate_with_each_header_once() {
        let fx = Fixture::new("silt_headers_cycle");
        let source = fx.file("proj/app/main.cc", "#include <proj/core/a.hh>\n");
        let a = fx.file("proj/core/a.hh", "#include <proj/core/b.hh>\n");
        let b = fx.file("proj/core/b.hh", "#include <proj/core/a.hh>\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert_eq!(headers.len(), 2);
        assert!(headers.contains(&a));
        assert!(headers.contains(&b));
    }

    #[test]
    fn missing_header_is_skipped_silently() {
        let fx = Fixture::new("silt_headers_missing");
        let source = fx.file(
            "proj/app/main.cc",
            "#include <proj/core/real.hh>\n#include \"optional.hh\"\n",
        );
        let real = fx.file("proj/core/real.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert_eq!(headers.len(), 1);
        assert!(headers.contains(&real));
    }

    #[test]
    fn transitive_closure_spans_quoted_and_bracketed_includes() {
        let fx = Fixture::new("silt_headers_scenario");
        let source = fx.file(
            "proj/app/main.cc",
            "#include \"helper.hh\"\n#include <proj/core/util.hh>\n",
        );
        let helper = fx.file("proj/app/helper.hh", "\n");
        let util = fx.file("proj/core/util.hh", "#include <proj/core/base.hh>\n");
        let base = fx.file("proj/core/base.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert_eq!(headers.len(), 3);
        assert!(headers.contains(&helper));
        assert!(headers.contains(&util));
        assert!(headers.contains(&base));
    }

    #[test]
    fn discovery_order_is_deterministic() {
        let fx = Fixture::new("silt_headers_order");
        let source = fx.file(
            "proj/app/main.cc",
            "#include <proj/core/first.hh>\n#include <proj/core/second.hh>\n",
        );
        fx.file("proj/core/first.hh", "\n");
        fx.file("proj/core/second.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        let order: Vec<_> =
            headers.iter().map(|h| h.file_name().unwrap().to_string_lossy().to_string()).collect();
        assert_eq!(order, vec!["first.hh", "second.hh"]);
    }

    #[test]
    fn quoted_include_escaping_the_module_is_ignored() {
        let fx = Fixture::new("silt_headers_escape");
        let source = fx.file("proj/app/main.cc", "#include \"../../outside.hh\"\n");
        fx.file("outside.hh", "\n");

        let headers = collect_headers(&fx.ctx, &fx.paths(), &[source]).unwrap();
        assert!(headers.is_empty());
    }
}
