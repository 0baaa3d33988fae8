//! `silt extract` command.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::extract::{
    collect_headers, enumerate_sources, generate_descriptors, materialize, ModulePaths,
};

/// Name of the external project-scaffolding tool.
const SCAFFOLD_TOOL: &str = "meshproject";

/// Scaffold-generated placeholder directories superseded by the
/// extracted content.
const SCAFFOLD_PLACEHOLDERS: [&str; 2] = ["src", "mesh"];

/// Execute the `extract` command.
///
/// # Errors
///
/// Returns an error string if path resolution, source discovery, the
/// scaffold tool, or any copy step fails.
pub fn run_with_context(
    ctx: &ServiceContext,
    module_dir: &str,
    subfolders: &[String],
) -> Result<(), String> {
    let paths = ModulePaths::resolve(ctx, module_dir, subfolders)?;
    let sources = enumerate_sources(ctx, &paths)?;
    let scaffold = locate_scaffold_tool(ctx, &paths)?;

    print_summary(&paths, &sources);
    let confirmed = ctx
        .prompt
        .confirm("Read the above and press [Enter] to proceed...")
        .map_err(|e| format!("Failed to read confirmation: {e}"))?;
    if !confirmed {
        return Err("Aborted.".to_string());
    }

    let new_module = run_scaffold_tool(ctx, &paths, &scaffold)?;
    println!();
    println!("Found new module {new_module}");
    println!("Determining required headers...");

    let headers = collect_headers(ctx, &paths, &sources)?;
    println!("The following header files are extracted:");
    for header in &headers {
        println!("  {}", header.display());
    }

    materialize(ctx, &paths, &headers, &sources, &new_module)?;

    let new_root = paths.parent().join(&new_module);
    remove_scaffold_leftovers(ctx, &new_root)?;
    generate_descriptors(ctx, &new_root)?;
    move_patches_dir(ctx, paths.parent(), &new_root)?;

    print_guidance(&new_module);
    Ok(())
}

/// Locates the scaffold tool: the workspace copy under
/// `mesh-common/bin` wins, otherwise the search path is consulted.
fn locate_scaffold_tool(ctx: &ServiceContext, paths: &ModulePaths) -> Result<String, String> {
    let workspace_copy = paths.parent().join("mesh-common/bin").join(SCAFFOLD_TOOL);
    if ctx.fs.exists(&workspace_copy) {
        return Ok(workspace_copy.display().to_string());
    }

    let lookup = ctx
        .shell
        .run(&format!("command -v {SCAFFOLD_TOOL}"))
        .map_err(|e| format!("Failed to look up {SCAFFOLD_TOOL}: {e}"))?;
    if lookup.exit_code == 0 && !lookup.stdout.trim().is_empty() {
        return Ok(lookup.stdout.trim().to_string());
    }

    Err(format!(
        "Could not find {SCAFFOLD_TOOL}. Either have it in your search path or run this \
         command from a directory that contains mesh-common."
    ))
}

/// Runs the scaffold tool and identifies the module directory it created
/// as the difference in the parent directory's listing.
fn run_scaffold_tool(
    ctx: &ServiceContext,
    paths: &ModulePaths,
    scaffold: &str,
) -> Result<String, String> {
    let parent = paths.parent();
    let before = ctx
        .fs
        .list_dir(parent)
        .map_err(|e| format!("Failed to read directory {}: {e}", parent.display()))?;

    let exit_code = ctx
        .shell
        .run_interactive(&format!("cd '{}' && {scaffold}", parent.display()))
        .map_err(|e| format!("Failed to run {scaffold}: {e}"))?;
    if exit_code != 0 {
        return Err(format!("{SCAFFOLD_TOOL} failed with exit code {exit_code}"));
    }

    let after = ctx
        .fs
        .list_dir(parent)
        .map_err(|e| format!("Failed to read directory {}: {e}", parent.display()))?;

    after
        .into_iter()
        .find(|name| !before.contains(name) && ctx.fs.is_dir(&parent.join(name)))
        .ok_or_else(|| "Could not find the new module. Aborting.".to_string())
}

/// Explains what the extraction is about to do.
fn print_summary(paths: &ModulePaths, sources: &[PathBuf]) {
    println!();
    println!("This command will");
    println!("- extract the following sub-folders of {}:", paths.name());
    println!();
    for subfolder in paths.subfolders() {
        println!("  {},", subfolder.display());
    }
    println!();
    println!("  and all headers in {} required to build the executables", paths.name());
    println!("  from the sources");
    println!();
    for source in sources {
        println!("  {},", source.display());
    }
    println!();
    println!("- copy the extracted files into a freshly created module, retaining the");
    println!("  directory structure, and");
    println!();
    println!("- update/create all required build descriptors.");
    println!();
    println!("You receive a fully-working module containing the subset of {}", paths.name());
    println!("required to run your application.");
    println!("{SCAFFOLD_TOOL} will be run now. The new module should NOT depend on the");
    println!("module in {}.", paths.name());
    println!();
}

/// Removes scaffold placeholder content and architecture-dependent
/// leftovers from the new module.
fn remove_scaffold_leftovers(ctx: &ServiceContext, new_root: &Path) -> Result<(), String> {
    for placeholder in SCAFFOLD_PLACEHOLDERS {
        let dir = new_root.join(placeholder);
        if ctx.fs.is_dir(&dir) {
            ctx.fs
                .remove_dir_all(&dir)
                .map_err(|e| format!("Failed to remove {}: {e}", dir.display()))?;
        }
    }

    for name in ["Makefile", "Makefile.in"] {
        let file = new_root.join(name);
        if ctx.fs.exists(&file) {
            ctx.fs
                .remove_file(&file)
                .map_err(|e| format!("Failed to remove {}: {e}", file.display()))?;
        }
    }
    Ok(())
}

/// Moves a sibling `patches/` directory into the new module when one
/// exists.
fn move_patches_dir(
    ctx: &ServiceContext,
    parent: &Path,
    new_root: &Path,
) -> Result<(), String> {
    let patches = parent.join("patches");
    if ctx.fs.is_dir(&patches) {
        ctx.fs
            .rename(&patches, &new_root.join("patches"))
            .map_err(|e| format!("Failed to move {}: {e}", patches.display()))?;
    }
    Ok(())
}

/// Tells the user what to do with the extracted module.
fn print_guidance(new_module: &str) {
    let line = "*".repeat(80);
    println!();
    println!("{line}");
    println!("The extracted module is contained in the subfolder \"{new_module}\".");
    println!("You can build it using \"meshcontrol --only={new_module} all\".");
    println!("{line}");
    println!("BEFORE building, you can rename the module and commit it to your");
    println!("publication repository.");
}
