//! `hymark build` command implementation.

use std::path::PathBuf;

use clap::Args;
use hymark_config::{CliSettings, Config};
use hymark_site::Pipeline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Input directory (overrides config).
    input: Option<PathBuf>,

    /// Output directory (overrides config).
    output: Option<PathBuf>,

    /// Template engine: handlebars, minijinja (jinja) or tera.
    #[arg(short, long)]
    engine: Option<String>,

    /// Match pattern; repeat to add more, prefix with `!` to exclude
    /// (replaces the configured list).
    #[arg(short = 'm', long = "match", value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Templates directory (default: config file directory).
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Default template name, relative to the templates directory.
    #[arg(long)]
    template: Option<String>,

    /// Maximum number of files processed at once.
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Path to configuration file (default: auto-discover hymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (per-run timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any file fails to build.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            output: self.output,
            templates: self.templates,
            patterns: (!self.patterns.is_empty()).then_some(self.patterns),
            engine: self.engine,
            template: self.template,
            concurrency: self.concurrency,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");
        let pipeline = Pipeline::new(config.build_options()?);
        let options = pipeline.options();

        output.info(&format!("Input: {}", options.input.display()));
        output.info(&format!("Output: {}", options.output.display()));
        if let Some(engine) = &options.engine {
            if pipeline.engines().contains(engine) {
                output.info(&format!("Engine: {engine}"));
            } else {
                output.warning(&format!(
                    "Unknown engine '{engine}' (available: {})",
                    pipeline.engines().names().join(", ")
                ));
            }
        }

        let summary = pipeline.build().await?;

        output.success(&format!(
            "Built {} file(s) to {}",
            summary.written,
            options.output.display()
        ));
        Ok(())
    }
}
