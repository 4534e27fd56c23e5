//! Parse and render error types with miette integration

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while building a [`TemplateRegistry`](super::TemplateRegistry).
#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    #[error("invalid template pattern `{pattern}`")]
    #[diagnostic(code(script_registry::parse::pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globwalk::GlobError,
    },

    #[error("template pattern `{pattern}` matches no files")]
    #[diagnostic(
        code(script_registry::parse::no_matches),
        help("Check that the directory exists and the pattern names at least one template file")
    )]
    NoMatches { pattern: String },

    #[error("failed to walk template files for `{pattern}`")]
    #[diagnostic(code(script_registry::parse::walk))]
    Walk {
        pattern: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read template {}", .path.display())]
    #[diagnostic(code(script_registry::parse::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template name `{name}` is defined by both {} and {}", .first.display(), .second.display())]
    #[diagnostic(
        code(script_registry::parse::duplicate),
        help("Templates are named by file name; rename one of the files or narrow the pattern")
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(TemplateError),
}

/// Failure while rendering a named template.
#[derive(Error, Debug, Diagnostic)]
pub enum RenderError {
    #[error("template registry is not initialized")]
    #[diagnostic(
        code(script_registry::render::uninitialized),
        help("Call `parse` or `must_parse` once at startup before executing templates")
    )]
    Uninitialized,

    #[error("template `{name}` not found")]
    #[diagnostic(code(script_registry::render::not_found))]
    NotFound { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Evaluation(TemplateError),
}

impl RenderError {
    /// Name of the missing template, if this is a lookup failure.
    pub fn missing_name(&self) -> Option<&str> {
        match self {
            RenderError::NotFound { name } => Some(name.as_str()),
            _ => None,
        }
    }
}

/// A MiniJinja error annotated with the template source it came from.
#[derive(Error, Debug, Diagnostic)]
#[error("{name}: {reason}")]
pub struct TemplateError {
    name: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("{}", self.reason)]
    span: Option<SourceSpan>,

    reason: String,

    #[help]
    help: Option<String>,

    // Kept for chained error support
    #[source]
    source: Option<minijinja::Error>,
}

impl TemplateError {
    /// Create a new template error from a MiniJinja error
    ///
    /// Location, reason and help come from the innermost error in the chain,
    /// so `name` and `source` must describe the template that one points into.
    pub fn from_minijinja_error(
        error: minijinja::Error,
        name: &str,
        source: String,
        source_path: &Path,
    ) -> Self {
        let (span, reason, help) = Self::extract_error_info(Self::innermost(&error), &source);
        let src = crate::error_utils::create_named_source(source_path, source);

        Self {
            name: name.to_string(),
            src,
            span,
            reason,
            help,
            source: Some(error),
        }
    }

    /// Name of the template the error points into.
    pub fn template_name(&self) -> &str {
        &self.name
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn kind(&self) -> Option<minijinja::ErrorKind> {
        self.source.as_ref().map(|e| Self::innermost(e).kind())
    }

    /// Follow the source chain to the deepest MiniJinja error.
    ///
    /// A failure inside an included template surfaces as a `BadInclude` on
    /// the including template, with the real error as its source.
    pub fn innermost(error: &minijinja::Error) -> &minijinja::Error {
        let mut current = error;
        while let Some(next) = current
            .source()
            .and_then(|source| source.downcast_ref::<minijinja::Error>())
        {
            current = next;
        }
        current
    }

    fn extract_error_info(
        error: &minijinja::Error,
        source: &str,
    ) -> (Option<SourceSpan>, String, Option<String>) {
        let span = if let Some(range) = error.range() {
            Some(SourceSpan::from(range))
        } else {
            // MiniJinja uses 1-based line numbers
            error
                .line()
                .map(|line| SourceSpan::from(Self::line_to_offset(source, line.saturating_sub(1))))
        };

        let detail = error.detail().unwrap_or("unknown");
        let reason = match error.kind() {
            minijinja::ErrorKind::UndefinedError => match error.detail() {
                Some(detail) => format!("undefined value: {detail}"),
                None => "undefined value".to_string(),
            },
            minijinja::ErrorKind::SyntaxError => {
                format!("syntax error: {}", error.detail().unwrap_or("invalid syntax"))
            }
            minijinja::ErrorKind::TemplateNotFound => format!("template not found: {detail}"),
            minijinja::ErrorKind::InvalidOperation => format!("invalid operation: {detail}"),
            minijinja::ErrorKind::TooManyArguments => format!("too many arguments: {detail}"),
            minijinja::ErrorKind::MissingArgument => format!("missing argument: {detail}"),
            minijinja::ErrorKind::UnknownFilter => format!("unknown filter: {detail}"),
            minijinja::ErrorKind::UnknownFunction => format!("unknown function: {detail}"),
            minijinja::ErrorKind::UnknownMethod => format!("unknown method: {detail}"),
            minijinja::ErrorKind::BadInclude => format!("bad include: {detail}"),
            minijinja::ErrorKind::BadEscape => "bad escape sequence".to_string(),
            minijinja::ErrorKind::CannotUnpack => "cannot unpack value".to_string(),
            minijinja::ErrorKind::CannotDeserialize => "cannot deserialize value".to_string(),
            minijinja::ErrorKind::WriteFailure => "write failure".to_string(),
            _ => error.to_string(),
        };

        let help = match error.kind() {
            minijinja::ErrorKind::UndefinedError => Some(
                "The data passed to this template has no such field. Supply it, or \
                 set `undefined: lenient` in the registry options"
                    .to_string(),
            ),
            minijinja::ErrorKind::SyntaxError => Some(
                "Check the MiniJinja template syntax at https://docs.rs/minijinja/".to_string(),
            ),
            minijinja::ErrorKind::TemplateNotFound | minijinja::ErrorKind::BadInclude => Some(
                "Included templates must be matched by the same pattern and are named by file name"
                    .to_string(),
            ),
            _ => None,
        };

        (span, reason, help)
    }

    /// Calculate byte offset from line number
    fn line_to_offset(source: &str, target_line: usize) -> usize {
        let mut current_line = 0;

        for (idx, ch) in source.char_indices() {
            if current_line == target_line {
                return idx;
            }

            if ch == '\n' {
                current_line += 1;
            }
        }

        source.len()
    }
}
