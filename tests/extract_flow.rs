//! End-to-end extraction flow against a real module tree.
//!
//! Builds a small module fixture, provides a fake scaffold tool on the
//! search path, confirms the prompt through stdin, and checks the
//! extracted module afterwards.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Creates the module under test: one app subfolder with a source and
/// a local header, plus core headers reachable only through includes.
fn write_module(dir: &Path) {
    std::fs::create_dir_all(dir.join("proj/app/data")).unwrap();
    std::fs::create_dir_all(dir.join("proj/core")).unwrap();
    std::fs::write(
        dir.join("proj/app/main.cc"),
        "#include \"helper.hh\"\n#include <proj/core/util.hh>\n\nint main() { return 0; }\n",
    )
    .unwrap();
    std::fs::write(dir.join("proj/app/helper.hh"), "// helper\n").unwrap();
    std::fs::write(dir.join("proj/app/data/reference.csv"), "1,2,3\n").unwrap();
    std::fs::write(dir.join("proj/core/util.hh"), "#include <proj/core/base.hh>\n").unwrap();
    std::fs::write(dir.join("proj/core/base.hh"), "// base\n").unwrap();
}

/// Installs a fake `meshproject` that scaffolds a module directory the
/// way the real tool would.
#[cfg(unix)]
fn write_scaffold_tool(dir: &Path) -> PathBuf {
    let bin_dir = dir.join("tools");
    std::fs::create_dir_all(&bin_dir).unwrap();
    let tool = bin_dir.join("meshproject");
    std::fs::write(
        &tool,
        "#!/bin/sh\nmkdir -p newmod/src newmod/mesh/newmod\ntouch newmod/Makefile\n",
    )
    .unwrap();
    let mut perms = std::fs::metadata(&tool).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&tool, perms).unwrap();
    bin_dir
}

#[cfg(unix)]
#[test]
fn extracts_a_module_end_to_end() {
    let dir = workspace("silt_it_extract_flow");
    write_module(&dir);
    let bin_dir = write_scaffold_tool(&dir);

    let path_var = format!("{}:{}", bin_dir.display(), std::env::var("PATH").unwrap_or_default());
    let bin = env!("CARGO_BIN_EXE_silt");
    let mut child = Command::new(bin)
        .current_dir(&dir)
        .env("PATH", path_var)
        .args(["extract", "proj", "app"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn silt binary");

    // Confirm the prompt.
    child.stdin.as_mut().unwrap().write_all(b"\n").unwrap();
    let output = child.wait_with_output().expect("failed to wait for silt binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Found new module newmod"));

    let newmod = dir.join("newmod");

    // The requested subfolder is copied whole, data files included.
    assert!(newmod.join("app/main.cc").exists());
    assert!(newmod.join("app/helper.hh").exists());
    assert!(newmod.join("app/data/reference.csv").exists());

    // Headers outside the subfolder arrive through the closure walk.
    assert!(newmod.join("core/util.hh").exists());
    assert!(newmod.join("core/base.hh").exists());

    // Scaffold placeholders are gone.
    assert!(!newmod.join("src").exists());
    assert!(!newmod.join("mesh").exists());
    assert!(!newmod.join("Makefile").exists());

    // Build descriptors cover the whole extracted tree.
    let root_descriptor = std::fs::read_to_string(newmod.join("CMakeLists.txt")).unwrap();
    assert!(root_descriptor.contains("add_subdirectory(app)"));
    assert!(root_descriptor.contains("add_subdirectory(core)"));

    let core_descriptor = std::fs::read_to_string(newmod.join("core/CMakeLists.txt")).unwrap();
    assert!(core_descriptor.contains("install(FILES"));
    assert!(core_descriptor.contains("    base.hh"));
    assert!(core_descriptor.contains("    util.hh"));
    assert!(core_descriptor.contains("DESTINATION ${CMAKE_INSTALL_INCLUDEDIR}/core)"));

    // The original module is untouched.
    assert!(dir.join("proj/core/util.hh").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn declined_prompt_aborts_before_scaffolding() {
    let dir = workspace("silt_it_extract_decline");
    write_module(&dir);
    let bin_dir = write_scaffold_tool(&dir);

    let path_var = format!("{}:{}", bin_dir.display(), std::env::var("PATH").unwrap_or_default());
    let bin = env!("CARGO_BIN_EXE_silt");
    // Closed stdin means the prompt is declined.
    let output = Command::new(bin)
        .current_dir(&dir)
        .env("PATH", path_var)
        .args(["extract", "proj", "app"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run silt binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Aborted"));
    assert!(!dir.join("newmod").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
