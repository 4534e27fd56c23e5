//! Shared error utilities

use miette::NamedSource;
use std::path::{Path, PathBuf};

/// Format a template path for error display
///
/// Paths under the current directory are shown relative to it so that
/// diagnostics stay short and clickable in terminals.
pub fn format_error_path(path: &Path) -> String {
    display_path(path).display().to_string()
}

fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Create a NamedSource with proper formatting for error display
pub fn create_named_source(path: &Path, content: String) -> NamedSource<String> {
    NamedSource::new(format_error_path(path), content)
}
