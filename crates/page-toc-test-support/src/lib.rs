//! Shared test harness utilities for page-toc crates.

use std::fs;
use std::path::{Path, PathBuf};

use page_toc_config::Config;

/// Returns the built-in configuration rooted at `root`, ignoring any
/// `.page-toc.toml` files on disk.
pub fn test_config(root: impl Into<PathBuf>) -> Config {
    Config::builtin(root)
}

/// Wrap `body` in a minimal HTML document.
pub fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Fixture</title></head><body>{body}</body></html>"
    )
}

/// Write `contents` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}
