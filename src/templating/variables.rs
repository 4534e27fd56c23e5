use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::env;
use std::path::Path;

use super::Vars;

/// Prefix for environment variables exposed to templates
pub const ENV_PREFIX: &str = "SCRIPT_VAR_";

/// Builds template data from layered sources.
///
/// Later sources override earlier ones; callers add them lowest precedence
/// first (data file, then environment, then CLI).
pub struct VariableResolver {
    variables: Vars,
}

impl Default for VariableResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableResolver {
    pub fn new() -> Self {
        Self {
            variables: Vars::new(),
        }
    }

    /// Add every top-level key of a YAML or JSON mapping file
    pub fn add_data_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {}", path.display()))?;

        // YAML is a superset of JSON, so one parser covers both
        let value: Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse data file {}", path.display()))?;

        match value {
            Value::Object(map) => {
                self.variables.extend(map);
                Ok(())
            }
            Value::Null => Ok(()),
            _ => bail!(
                "Data file {} must contain a mapping at the top level",
                path.display()
            ),
        }
    }

    pub fn add_vars(&mut self, vars: &Vars) {
        for (key, value) in vars {
            self.variables.insert(key.clone(), value.clone());
        }
    }

    /// Add variables from environment (SCRIPT_VAR_* -> variable name)
    pub fn add_env_vars(&mut self) {
        for (key, value) in env::vars() {
            if let Some(var_name) = key.strip_prefix(ENV_PREFIX) {
                self.variables
                    .insert(var_name.to_lowercase(), Value::String(value));
            }
        }
    }

    /// Add variables from CLI flags
    pub fn add_cli_vars(&mut self, cli_vars: &[(String, String)]) {
        for (key, value) in cli_vars {
            self.variables
                .insert(key.clone(), Value::String(value.clone()));
        }
    }

    pub fn get_variables(&self) -> &Vars {
        &self.variables
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn into_variables(self) -> Vars {
        self.variables
    }
}

/// Parse a `name=value` CLI assignment
pub fn parse_var_assignment(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("invalid variable `{raw}`, expected name=value");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid variable `{raw}`, name is empty");
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_variable_precedence() {
        let mut resolver = VariableResolver::new();

        let mut vars = Vars::new();
        vars.insert("test_var".to_string(), json!("from_vars"));
        vars.insert("only_in_vars".to_string(), json!("vars_only"));
        resolver.add_vars(&vars);

        resolver.add_cli_vars(&[
            ("test_var".to_string(), "from_cli".to_string()),
            ("only_in_cli".to_string(), "cli_only".to_string()),
        ]);

        assert_eq!(resolver.get_variable("test_var"), Some(&json!("from_cli")));
        assert_eq!(
            resolver.get_variable("only_in_vars"),
            Some(&json!("vars_only"))
        );
        assert_eq!(resolver.get_variable("only_in_cli"), Some(&json!("cli_only")));
    }

    #[test]
    fn test_env_vars_override_data_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.yml");
        fs::write(&data, "shared_resolver_var: from_file\nport: 5432\n").unwrap();

        let mut resolver = VariableResolver::new();
        resolver.add_data_file(&data).unwrap();
        assert_eq!(resolver.get_variable("port"), Some(&json!(5432)));

        unsafe {
            env::set_var("SCRIPT_VAR_SHARED_RESOLVER_VAR", "from_env");
        }
        resolver.add_env_vars();
        assert_eq!(
            resolver.get_variable("shared_resolver_var"),
            Some(&json!("from_env"))
        );

        resolver.add_cli_vars(&[("shared_resolver_var".to_string(), "from_cli".to_string())]);
        assert_eq!(
            resolver.get_variable("shared_resolver_var"),
            Some(&json!("from_cli"))
        );

        unsafe {
            env::remove_var("SCRIPT_VAR_SHARED_RESOLVER_VAR");
        }
    }

    #[test]
    fn test_json_data_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.json");
        fs::write(&data, r#"{"hosts": ["a", "b"], "Who": "Bob"}"#).unwrap();

        let mut resolver = VariableResolver::new();
        resolver.add_data_file(&data).unwrap();
        let vars = resolver.into_variables();
        assert_eq!(vars.get("hosts"), Some(&json!(["a", "b"])));
        assert_eq!(vars.get("Who"), Some(&json!("Bob")));
    }

    #[test]
    fn test_data_file_must_be_mapping() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.yml");
        fs::write(&data, "- one\n- two\n").unwrap();

        let err = VariableResolver::new().add_data_file(&data).unwrap_err();
        assert!(err.to_string().contains("must contain a mapping"));
    }

    #[test]
    fn test_parse_var_assignment() {
        assert_eq!(
            parse_var_assignment("host=db1.internal").unwrap(),
            ("host".to_string(), "db1.internal".to_string())
        );
        assert_eq!(
            parse_var_assignment("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_var_assignment("novalue").is_err());
        assert!(parse_var_assignment("=x").is_err());
    }

    #[test]
    fn test_empty_resolver() {
        let resolver = VariableResolver::new();
        assert_eq!(resolver.get_variable("nonexistent"), None);
        assert!(resolver.get_variables().is_empty());
    }
}
