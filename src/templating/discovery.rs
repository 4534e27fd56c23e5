//! Glob pattern resolution for template files

use globwalk::{FileType, GlobWalkerBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::error::ParseError;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// A glob pattern split into the directory to walk and the pattern relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPattern {
    pub base_dir: PathBuf,
    pub relative: String,
    /// Maximum walk depth, `None` when the pattern contains `**`
    pub max_depth: Option<usize>,
}

impl SplitPattern {
    pub fn new(pattern: &str) -> Self {
        let path = Path::new(pattern);
        let mut base_dir = PathBuf::new();
        let mut rest: Vec<String> = Vec::new();

        for component in path.components() {
            let part = component.as_os_str().to_string_lossy();
            let is_glob = part.contains(GLOB_META);
            if rest.is_empty() && !is_glob {
                base_dir.push(component.as_os_str());
            } else {
                rest.push(part.into_owned());
            }
        }

        // A literal path names a single file inside its parent
        if rest.is_empty()
            && let Some(Component::Normal(name)) = path.components().next_back()
        {
            base_dir.pop();
            rest.push(name.to_string_lossy().into_owned());
        }

        if base_dir.as_os_str().is_empty() {
            base_dir = PathBuf::from(".");
        }

        let max_depth = if rest.iter().any(|part| part.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Self {
            base_dir,
            relative: rest.join("/"),
            max_depth,
        }
    }
}

/// Resolve a glob pattern to a sorted list of matching template files
pub fn collect_template_files(pattern: &str) -> Result<Vec<PathBuf>, ParseError> {
    let split = SplitPattern::new(pattern);
    debug!(
        base_dir = %split.base_dir.display(),
        relative = %split.relative,
        "Resolving template pattern"
    );

    if split.relative.is_empty() || !split.base_dir.is_dir() {
        return Err(ParseError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    let relative = escape_gitignore_prefix(&split.relative);
    let mut builder = GlobWalkerBuilder::from_patterns(&split.base_dir, &[relative.as_str()])
        .file_type(FileType::FILE)
        .follow_links(true)
        .case_insensitive(false);
    if let Some(depth) = split.max_depth {
        builder = builder.max_depth(depth);
    }

    let walker = builder.build().map_err(|source| ParseError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ParseError::Walk {
            pattern: pattern.to_string(),
            source,
        })?;
        debug!(path = %entry.path().display(), "Matched template file");
        files.push(entry.into_path());
    }

    if files.is_empty() {
        return Err(ParseError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    Ok(files)
}

/// globwalk reads patterns with gitignore syntax, where a leading `!`
/// negates and a leading `#` starts a comment
fn escape_gitignore_prefix(relative: &str) -> String {
    if relative.starts_with(['!', '#']) {
        format!("\\{relative}")
    } else {
        relative.to_string()
    }
}

/// Template name for a file: its base name
pub fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
