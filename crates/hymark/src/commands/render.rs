//! `hymark render` command implementation.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;
use hymark_config::{CliSettings, Config};
use hymark_site::Pipeline;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Source file, or `-` for standard input.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Name for standard input; its extension decides Markdown handling.
    #[arg(long, default_value = "stdin.md")]
    name: String,

    /// Template engine: handlebars, minijinja (jinja) or tera.
    #[arg(short, long)]
    engine: Option<String>,

    /// Templates directory (default: config file directory).
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Template name, relative to the templates directory.
    #[arg(long)]
    template: Option<String>,

    /// Path to configuration file (default: auto-discover hymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command, writing the result to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading or rendering fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            engine: self.engine,
            templates: self.templates,
            template: self.template,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let pipeline = Pipeline::new(config.render_options());

        let (name, source) = if self.file.as_os_str() == "-" {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            (self.name, source)
        } else {
            let name = self
                .file
                .file_name()
                .map_or_else(|| self.name.clone(), |n| n.to_string_lossy().into_owned());
            let source = tokio::fs::read_to_string(&self.file)
                .await
                .map_err(|source| CliError::Read {
                    path: self.file.clone(),
                    source,
                })?;
            (name, source)
        };

        let rendered = pipeline.render_source(&name, &source).await?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
