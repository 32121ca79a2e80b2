//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config PATH`
//! 2. `$HELIX_CONFIG` environment variable
//! 3. `~/.config/helix/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use rhizome_helix_core::parse_number;
use rhizome_helix_eval::{Domain, Variable, VariableRegistry};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub domain: DomainConfig,
    pub output: OutputConfig,
    pub variables: Vec<VariableConfig>,
}

/// Sampled interval for `x`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Text output settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Digits after the decimal point.
    pub precision: usize,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// A variable preset. Giving both `min` and `max` makes it a slider range.
#[derive(Debug, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    /// Number text, e.g. `"1+2i"`.
    pub value: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// --- Defaults ---

impl Default for DomainConfig {
    fn default() -> Self {
        let domain = Domain::default();
        Self {
            min: domain.begin(),
            max: domain.end(),
            step: domain.step(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            format: OutputFormat::Csv,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// --- Variables ---

impl VariableConfig {
    pub fn to_variable(&self) -> Result<Variable> {
        let value = parse_number(&self.value)
            .with_context(|| format!("variable '{}': invalid value '{}'", self.name, self.value))?;
        match (self.min, self.max) {
            (None, None) => Ok(Variable::constant(&self.name, value)),
            (Some(min), Some(max)) => Ok(Variable {
                value,
                ..Variable::range(&self.name, min, max, 0.0)
            }),
            _ => bail!("variable '{}': min and max must be given together", self.name),
        }
    }
}

impl Config {
    /// Default registry with the configured variables applied on top.
    pub fn registry(&self) -> Result<VariableRegistry> {
        let mut registry = VariableRegistry::new();
        for var in &self.variables {
            override_variable(&mut registry, var.to_variable()?);
        }
        Ok(registry)
    }
}

/// Replaces any variable of the same name instead of shadowing it.
pub fn override_variable(registry: &mut VariableRegistry, var: Variable) {
    while registry.remove(&var.name).is_some() {}
    registry.define(var);
}

// --- Loading ---

/// Load config from disk. Returns defaults if no config file exists.
///
/// An explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_from(p);
    }
    match config_path(None) {
        Some(p) if p.exists() => load_from(&p),
        _ => Ok(Config::default()),
    }
}

/// Parse one config file.
pub fn load_from(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Resolve the config file path.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }

    if let Ok(p) = std::env::var("HELIX_CONFIG") {
        return Some(PathBuf::from(p));
    }

    dirs_home().map(|home| home.join(".config").join("helix").join("config.toml"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Show the active config path (for `helix config`).
pub fn show_config_path(explicit: Option<&Path>) -> String {
    match config_path(explicit) {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_helix_complex::Complex;
    use rhizome_helix_eval::VariableKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.domain.min, -2.0);
        assert_eq!(config.domain.max, 2.0);
        assert_eq!(config.domain.step, 0.05);
        assert_eq!(config.output.precision, 4);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.variables.is_empty());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[domain]
step = 0.1
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.domain.step, 0.1);
        // Other fields should be defaults
        assert_eq!(config.domain.min, -2.0);
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[domain]
min = 0.0
max = 1.0
step = 0.25

[output]
precision = 6
format = "json"

[[variables]]
name = "a"
value = "1+2i"

[[variables]]
name = "k"
value = "0.5"
min = 0.0
max = 1.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.precision, 6);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.variables.len(), 2);

        let registry = config.registry().unwrap();
        assert_eq!(registry.resolve("a"), Some(Complex::new(1.0, 2.0)));
        assert_eq!(registry.resolve("k"), Some(Complex::real(0.5)));
        assert_eq!(
            registry.get("k").unwrap().kind,
            VariableKind::Range { min: 0.0, max: 1.0 }
        );
        assert!(registry.resolve("pi").is_some());
    }

    #[test]
    fn test_config_variable_replaces_default() {
        let config: Config = toml::from_str(
            r#"
[[variables]]
name = "pi"
value = "3"
"#,
        )
        .unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(registry.resolve("pi"), Some(Complex::real(3.0)));
        assert_eq!(registry.iter().filter(|v| v.name == "pi").count(), 1);
    }

    #[test]
    fn test_invalid_variable_value() {
        let config: Config = toml::from_str(
            r#"
[[variables]]
name = "a"
value = "one"
"#,
        )
        .unwrap();
        let err = config.registry().unwrap_err();
        assert!(err.to_string().contains("variable 'a'"));
    }

    #[test]
    fn test_half_range_is_rejected() {
        let var = VariableConfig {
            name: "k".into(),
            value: "0".into(),
            min: Some(0.0),
            max: None,
        };
        assert!(var.to_variable().is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[domain]\nmin = -1.0\nmax = 1.0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.domain.min, -1.0);
        assert_eq!(config.domain.max, 1.0);
        assert_eq!(config.domain.step, 0.05);
        assert!(show_config_path(Some(&path)).ends_with("(loaded)"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load_config(Some(&path)).is_err());
        assert!(show_config_path(Some(&path)).contains("not found"));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[domain\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
