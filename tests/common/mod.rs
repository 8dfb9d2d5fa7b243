//! Shared test helpers for stencil integration tests.
//!
//! All tests run against temp directories — no side effects on the real
//! config. CLI tests clear `STENCIL_*` environment variables so the host
//! environment can't leak in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Create a fresh project directory.
pub fn setup_project() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Write a file under `dir`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    fs::write(&path, contents).expect("failed to write file");
    path
}

/// Run stencil with the given args in the given directory.
///
/// `XDG_CONFIG_HOME` is pinned inside the project directory so the default
/// context directory never touches the real user config.
pub fn stencil_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stencil"))
        .args(args)
        .current_dir(dir)
        .env_remove("STENCIL_CONTEXT_DIR")
        .env_remove("STENCIL_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .output()
        .expect("failed to execute stencil")
}

/// Run stencil and assert it succeeds. Returns stdout as a string.
pub fn stencil_ok(dir: &Path, args: &[&str]) -> String {
    let out = stencil_in(dir, args);
    assert!(
        out.status.success(),
        "stencil {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).expect("stdout was not utf-8")
}

/// Run stencil and assert it fails. Returns stderr as a string.
pub fn stencil_err(dir: &Path, args: &[&str]) -> String {
    let out = stencil_in(dir, args);
    assert!(
        !out.status.success(),
        "stencil {args:?} unexpectedly succeeded: {}",
        String::from_utf8_lossy(&out.stdout)
    );
    String::from_utf8(out.stderr).expect("stderr was not utf-8")
}
