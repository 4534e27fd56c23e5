//! Panicking wrappers for startup code where a template failure has no
//! recovery path.

use serde::Serialize;

use super::global;
use super::registry::TemplateRegistry;

/// Parse and install the process-wide registry, panicking on any error
pub fn must_parse(pattern: &str) {
    if let Err(err) = global::parse(pattern) {
        panic!("template parse ({err})");
    }
}

/// Render from the process-wide registry, panicking on any error
pub fn must_execute<S: Serialize>(name: &str, data: S) -> String {
    global::execute(name, data).unwrap_or_else(|err| panic!("template execute ({err})"))
}

/// Build a registry value, panicking on any error
pub fn must_build(pattern: &str) -> TemplateRegistry {
    TemplateRegistry::parse(pattern).unwrap_or_else(|err| panic!("template parse ({err})"))
}

/// Render from a registry value, panicking on any error
pub fn must_render<S: Serialize>(registry: &TemplateRegistry, name: &str, data: S) -> String {
    registry
        .render(name, data)
        .unwrap_or_else(|err| panic!("template execute ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_must_build_and_render() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("greet.tmpl"), "Hi {{ Who }}!").unwrap();

        let registry = must_build(&format!("{}/*.tmpl", dir.path().display()));
        assert_eq!(
            must_render(&registry, "greet.tmpl", json!({ "Who": "Bob" })),
            "Hi Bob!"
        );
    }

    #[test]
    #[should_panic(expected = "template parse (template pattern")]
    fn test_must_build_panics_without_matches() {
        let dir = tempdir().unwrap();
        must_build(&format!("{}/*.tmpl", dir.path().display()));
    }

    #[test]
    #[should_panic(expected = "template execute (template `missing.tmpl` not found)")]
    fn test_must_render_panics_on_missing_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("greet.tmpl"), "Hi").unwrap();

        let registry = must_build(&format!("{}/*.tmpl", dir.path().display()));
        must_render(&registry, "missing.tmpl", json!({}));
    }
}
