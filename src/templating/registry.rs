use minijinja::Environment;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::discovery::{collect_template_files, template_name};
use super::error::{ParseError, RenderError, TemplateError};
use super::options::RegistryOptions;

/// A compiled set of named templates.
///
/// Built once from the files matched by a glob pattern and read-only after
/// that. Each file becomes one template named by its file name, and templates
/// in the same registry can `{% include %}` each other by that name.
///
/// The registry is `Send + Sync`; share it by reference (or `Arc`) and render
/// from any number of threads.
pub struct TemplateRegistry {
    env: Environment<'static>,
    sources: BTreeMap<String, PathBuf>,
    options: RegistryOptions,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("sources", &self.sources)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TemplateRegistry {
    /// Parse every file matched by `pattern` with default options
    pub fn parse(pattern: &str) -> Result<Self, ParseError> {
        Self::parse_with(pattern, &RegistryOptions::default())
    }

    pub fn parse_with(pattern: &str, options: &RegistryOptions) -> Result<Self, ParseError> {
        let files = collect_template_files(pattern)?;
        let registry = Self::from_files(&files, options)?;
        info!(
            pattern,
            templates = registry.len(),
            "Parsed template registry"
        );
        Ok(registry)
    }

    /// Compile an explicit list of files
    pub fn from_files(files: &[PathBuf], options: &RegistryOptions) -> Result<Self, ParseError> {
        let mut env = Environment::new();
        options.configure(&mut env);

        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();
        for path in files {
            let name = template_name(path);
            if let Some(first) = sources.get(&name) {
                return Err(ParseError::DuplicateName {
                    name,
                    first: first.clone(),
                    second: path.clone(),
                });
            }

            let content = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
                path: path.clone(),
                source,
            })?;

            debug!(name = %name, path = %path.display(), "Compiling template");
            if let Err(error) = env.add_template_owned(name.clone(), content.clone()) {
                return Err(ParseError::Syntax(TemplateError::from_minijinja_error(
                    error, &name, content, path,
                )));
            }
            sources.insert(name, path.clone());
        }

        Ok(Self {
            env,
            sources,
            options: options.clone(),
        })
    }

    /// Render the template called `name` against `data`
    pub fn render<S: Serialize>(&self, name: &str, data: S) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| RenderError::NotFound {
                name: name.to_string(),
            })?;

        template
            .render(data)
            .map_err(|error| RenderError::Evaluation(self.annotate(error, name)))
    }

    /// Attach the failing template's source to a render error.
    ///
    /// The error may point into an included template rather than `name`.
    fn annotate(&self, error: minijinja::Error, name: &str) -> TemplateError {
        let failing = TemplateError::innermost(&error)
            .name()
            .unwrap_or(name)
            .to_string();
        let source = self
            .env
            .get_template(&failing)
            .map(|t| t.source().to_string())
            .unwrap_or_default();
        let path = self
            .sources
            .get(&failing)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&failing));
        TemplateError::from_minijinja_error(error, &failing, source, &path)
    }

    /// Template names in sorted order
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Source file a template was compiled from
    pub fn source_path(&self, name: &str) -> Option<&Path> {
        self.sources.get(name).map(PathBuf::as_path)
    }

    pub fn sources(&self) -> &BTreeMap<String, PathBuf> {
        &self.sources
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
