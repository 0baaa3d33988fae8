//! Integration tests for top-level CLI behavior.

use std::path::PathBuf;
use std::process::Command;

fn run_silt(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_silt");
    Command::new(bin).args(args).output().expect("failed to run silt binary")
}

fn run_silt_in(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_silt");
    Command::new(bin).current_dir(dir).args(args).output().expect("failed to run silt binary")
}

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_silt(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn extract_without_subfolders_shows_usage() {
    let output = run_silt(&["extract", "silt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("SUBFOLDERS") || stderr.contains("subfolders"));
}

#[test]
fn extract_missing_module_dir_fails() {
    let dir = workspace("silt_it_extract_missing");
    let output = run_silt_in(&dir, &["extract", "absent", "app"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("one level above"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn extract_without_sources_fails() {
    let dir = workspace("silt_it_extract_nosrc");
    std::fs::create_dir_all(dir.join("proj/app")).unwrap();

    let output = run_silt_in(&dir, &["extract", "proj", "app"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("No source files"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn extract_without_scaffold_tool_fails() {
    let dir = workspace("silt_it_extract_noscaffold");
    std::fs::create_dir_all(dir.join("proj/app")).unwrap();
    std::fs::write(dir.join("proj/app/main.cc"), "int main() {}\n").unwrap();

    let bin = env!("CARGO_BIN_EXE_silt");
    // An empty PATH guarantees the scaffold tool cannot be found.
    let output = Command::new(bin)
        .current_dir(&dir)
        .env("PATH", "")
        .args(["extract", "proj", "app"])
        .output()
        .expect("failed to run silt binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("meshproject"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn install_without_packages_shows_usage() {
    let output = run_silt(&["install"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("PACKAGES") || stderr.contains("packages"));
}

#[test]
fn install_unknown_package_fails() {
    let output = run_silt(&["install", "fortran77"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Unknown package fortran77"));
}

#[test]
fn install_repo_outside_workspace_fails() {
    let dir = workspace("silt_it_install_nowhere");
    let output = run_silt_in(&dir, &["install", "tutorials"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("mesh-common"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn co2_table_help_shows_output_flag() {
    let output = run_silt(&["co2-table", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--output"));
}

#[test]
fn help_lists_all_subcommands() {
    let output = run_silt(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("install"));
    assert!(stdout.contains("co2-table"));
}
