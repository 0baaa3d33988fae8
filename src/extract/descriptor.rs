//! Build descriptor generation for the materialized tree.
//!
//! Every directory gets a `CMakeLists.txt` declaring its child
//! directories and the headers to install. Existing descriptors are
//! merged in place: only the two generated sentinel blocks are
//! replaced, everything hand-written around them survives.

use std::path::Path;

use crate::context::ServiceContext;

/// Filename of the per-directory build descriptor.
pub const DESCRIPTOR_FILE: &str = "CMakeLists.txt";

/// Header suffixes listed in install rules.
const HEADER_SUFFIXES: [&str; 2] = [".h", ".hh"];

/// Sentinel opening the subdirectory block.
const SUBDIRECTORY_SENTINEL: &str = "add_subdirectory(";
/// Sentinel opening the install block. Matches both `install(FILE` and
/// `install(FILES`.
const INSTALL_SENTINEL: &str = "install(FILE";

/// Regenerates the build descriptor of every directory beneath `root`,
/// including `root` itself.
///
/// Runs after materialization because the install rules need the final
/// directory listing. Directories are visited in sorted order and the
/// generated blocks are themselves sorted, so regenerating an unchanged
/// tree rewrites byte-identical files.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a descriptor
/// cannot be written.
pub fn generate_descriptors(ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    generate_for_dir(ctx, root, root)
}

fn generate_for_dir(ctx: &ServiceContext, root: &Path, dir: &Path) -> Result<(), String> {
    let entries = ctx
        .fs
        .list_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;

    let mut subdirs = Vec::new();
    let mut headers = Vec::new();
    for name in entries {
        if ctx.fs.is_dir(&dir.join(&name)) {
            subdirs.push(name);
        } else if HEADER_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            headers.push(name);
        }
    }

    let destination = install_destination(root, dir);
    write_descriptor(ctx, &dir.join(DESCRIPTOR_FILE), &subdirs, &headers, &destination)?;

    for sub in &subdirs {
        generate_for_dir(ctx, root, &dir.join(sub))?;
    }
    Ok(())
}

/// The install path of `dir` relative to the tree root, with a leading
/// slash; empty for the root itself.
fn install_destination(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => String::new(),
        Ok(rel) => format!("/{}", rel.display()),
        Err(_) => String::new(),
    }
}

/// Writes (or merges) one directory's descriptor.
fn write_descriptor(
    ctx: &ServiceContext,
    descriptor: &Path,
    subdirs: &[String],
    headers: &[String],
    destination: &str,
) -> Result<(), String> {
    let subdirectory_content = subdirectory_block(subdirs);
    let install_content = install_block(headers, destination);

    let content = if ctx.fs.exists(descriptor) {
        let existing = ctx
            .fs
            .read_to_string(descriptor)
            .map_err(|e| format!("Failed to read {}: {e}", descriptor.display()))?;
        let merged = replace_block(
            existing.trim(),
            SUBDIRECTORY_SENTINEL,
            &subdirectory_content,
            BlockPosition::Top,
        );
        replace_block(&merged, INSTALL_SENTINEL, &install_content, BlockPosition::Bottom)
    } else if subdirectory_content.is_empty() {
        install_content
    } else if install_content.is_empty() {
        subdirectory_content
    } else {
        format!("{subdirectory_content}\n{install_content}")
    };

    if content.is_empty() {
        return Ok(());
    }
    let content = format!("{}\n", content.trim_end());
    ctx.fs
        .write(descriptor, &content)
        .map_err(|e| format!("Failed to write {}: {e}", descriptor.display()))
}

/// One `add_subdirectory(...)` line per child directory.
fn subdirectory_block(dirs: &[String]) -> String {
    dirs.iter().map(|d| format!("add_subdirectory({d})")).collect::<Vec<_>>().join("\n")
}

/// An `install(FILES ...)` rule for the directory's headers; empty when
/// there is nothing to install.
fn install_block(headers: &[String], destination: &str) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let mut block = String::from("install(FILES\n");
    for header in headers {
        block.push_str(&format!("    {header}\n"));
    }
    block.push_str(&format!("DESTINATION ${{CMAKE_INSTALL_INCLUDEDIR}}{destination})"));
    block
}

/// Where a missing block is inserted during a merge.
enum BlockPosition {
    Top,
    Bottom,
}

/// Replaces every sentinel block in `content` with `replacement`.
///
/// A block starts at a line whose first non-blank characters are the
/// sentinel and runs to the line on which its parentheses balance. The
/// replacement lands where the first block was; if no block exists, it
/// is prepended or appended per `position`.
fn replace_block(
    content: &str,
    sentinel: &str,
    replacement: &str,
    position: BlockPosition,
) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut replacement_at: Option<usize> = None;
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        if line.trim_start().starts_with(sentinel) {
            if replacement_at.is_none() {
                replacement_at = Some(kept.len());
            }
            // Consume through the line where the parentheses close.
            let mut depth = paren_depth(line);
            while depth > 0 {
                let Some(next) = lines.next() else { break };
                depth += paren_depth(next);
            }
        } else {
            kept.push(line);
        }
    }

    let mut out: Vec<String> = kept.iter().map(|l| (*l).to_string()).collect();
    if replacement.is_empty() {
        return out.join("\n");
    }
    match replacement_at {
        Some(index) => out.insert(index, replacement.to_string()),
        None => match position {
            BlockPosition::Top => out.insert(0, replacement.to_string()),
            BlockPosition::Bottom => out.push(replacement.to_string()),
        },
    }
    out.join("\n")
}

/// Net parenthesis depth contributed by one line.
fn paren_depth(line: &str) -> i32 {
    let mut depth = 0;
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth
}
