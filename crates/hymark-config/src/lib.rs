//! Configuration management for hymark.
//!
//! Parses `hymark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `build.input`, `build.output`, `build.templates`
//! - `build.engine`, `build.template`
//! - every string inside `[vars]`

mod expand;

use std::path::{Path, PathBuf};

use hymark_site::{DEFAULT_CONCURRENCY, DEFAULT_PATTERNS, Options};
use serde::Deserialize;
use serde_json::{Map, Value};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override input directory.
    pub input: Option<PathBuf>,
    /// Override output directory.
    pub output: Option<PathBuf>,
    /// Override templates directory.
    pub templates: Option<PathBuf>,
    /// Override match patterns.
    pub patterns: Option<Vec<String>>,
    /// Override engine identifier.
    pub engine: Option<String>,
    /// Override default template name.
    pub template: Option<String>,
    /// Override concurrency limit.
    pub concurrency: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "hymark.toml";

/// Upper bound for `build.concurrency`.
const MAX_CONCURRENCY: usize = 4096;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Global context data, lowest precedence.
    pub vars: Map<String, Value>,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    input: Option<String>,
    output: Option<String>,
    templates: Option<String>,
    #[serde(rename = "match")]
    patterns: Option<Vec<String>>,
    engine: Option<String>,
    template: Option<String>,
    concurrency: Option<usize>,
}

/// Resolved build configuration with paths joined to the config directory.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Input directory.
    pub input: Option<PathBuf>,
    /// Output directory.
    pub output: Option<PathBuf>,
    /// Templates directory.
    pub templates: PathBuf,
    /// Ordered match patterns.
    pub patterns: Vec<String>,
    /// Engine identifier.
    pub engine: Option<String>,
    /// Default template name.
    pub template: Option<String>,
    /// Maximum number of files in flight.
    pub concurrency: usize,
}

impl BuildConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            input: None,
            output: None,
            templates: base.to_path_buf(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| (*p).to_owned()).collect(),
            engine: None,
            template: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.input`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require an optional string field to be non-empty when set.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(str::is_empty) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `hymark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated once more after they are applied.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build options for a pipeline run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the input or output directory is
    /// not set.
    pub fn build_options(&self) -> Result<Options, ConfigError> {
        let build = &self.build_resolved;
        let input = build.input.clone().ok_or_else(|| {
            ConfigError::Validation("build.input is required (config file or CLI)".to_owned())
        })?;
        let output = build.output.clone().ok_or_else(|| {
            ConfigError::Validation("build.output is required (config file or CLI)".to_owned())
        })?;

        Ok(Options {
            templates: Some(build.templates.clone()),
            patterns: build.patterns.clone(),
            engine: build.engine.clone(),
            template: build.template.clone(),
            concurrency: build.concurrency,
            vars: self.vars.clone(),
            ..Options::new(input, output)
        })
    }

    /// Options for rendering a single document outside a build.
    ///
    /// Unlike [`Config::build_options`] this never fails: unset input and
    /// output directories fall back to `.`.
    pub fn render_options(&self) -> Options {
        let build = &self.build_resolved;
        let current = || PathBuf::from(".");

        Options {
            templates: Some(build.templates.clone()),
            patterns: build.patterns.clone(),
            engine: build.engine.clone(),
            template: build.template.clone(),
            concurrency: build.concurrency,
            vars: self.vars.clone(),
            ..Options::new(
                build.input.clone().unwrap_or_else(current),
                build.output.clone().unwrap_or_else(current),
            )
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let build = &mut self.build_resolved;
        if let Some(input) = &settings.input {
            build.input = Some(input.clone());
        }
        if let Some(output) = &settings.output {
            build.output = Some(output.clone());
        }
        if let Some(templates) = &settings.templates {
            build.templates.clone_from(templates);
        }
        if let Some(patterns) = &settings.patterns {
            build.patterns.clone_from(patterns);
        }
        if let Some(engine) = &settings.engine {
            build.engine = Some(engine.clone());
        }
        if let Some(template) = &settings.template {
            build.template = Some(template.clone());
        }
        if let Some(concurrency) = settings.concurrency {
            build.concurrency = concurrency;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            vars: Map::new(),
            build_resolved: BuildConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let build = &self.build_resolved;

        if build.concurrency == 0 {
            return Err(ConfigError::Validation(
                "build.concurrency must be greater than 0".to_owned(),
            ));
        }
        if build.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Validation(format!(
                "build.concurrency cannot exceed {MAX_CONCURRENCY}"
            )));
        }

        require_non_empty(build.engine.as_deref(), "build.engine")?;
        require_non_empty(build.template.as_deref(), "build.template")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let build = &mut self.build;
        for (value, field) in [
            (&mut build.input, "build.input"),
            (&mut build.output, "build.output"),
            (&mut build.templates, "build.templates"),
            (&mut build.engine, "build.engine"),
            (&mut build.template, "build.template"),
        ] {
            if let Some(text) = value {
                *text = expand::expand_env(text, field)?;
            }
        }

        for (key, value) in &mut self.vars {
            expand::expand_value(value, &format!("vars.{key}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = BuildConfig::with_base(config_dir);
        let raw = &self.build;

        self.build_resolved = BuildConfig {
            input: raw.input.as_deref().map(|p| config_dir.join(p)),
            output: raw.output.as_deref().map(|p| config_dir.join(p)),
            templates: raw
                .templates
                .as_deref()
                .map_or(defaults.templates, |p| config_dir.join(p)),
            patterns: raw.patterns.clone().unwrap_or(defaults.patterns),
            engine: raw.engine.clone(),
            template: raw.template.clone(),
            concurrency: raw.concurrency.unwrap_or(defaults.concurrency),
        };
    }
}
