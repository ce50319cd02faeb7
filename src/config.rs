//! Configuration file support for dockershrink.
//!
//! Provides YAML-based configuration through `dockershrink.config.yml` files,
//! and merges it with command-line flags into the settings of one run.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use dockershrink::adapters::outbound::network::{
    DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use dockershrink::application::dto::OutputFormat;
use dockershrink::shared::Result;

const CONFIG_FILENAME: &str = "dockershrink.config.yml";
const DEFAULT_OUTPUT_DIR: &str = "dockershrink.optimized";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub extra_dockerignore_entries: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Everything one run needs, after CLI flags and config file are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub dockerfile: PathBuf,
    pub dockerignore: PathBuf,
    /// Only set when given explicitly; otherwise package.json is searched for
    pub package_json: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub openai_api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub extra_dockerignore_entries: Vec<String>,
    pub dry_run: bool,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    eprintln!("📄 Auto-discovered config file: {}", config_path.display());
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: format: {}", e);
        }
    }

    if let Some(ref model) = config.model {
        if model.trim().is_empty() {
            bail!(
                "Invalid config: model must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default model ({}).",
                DEFAULT_MODEL
            );
        }
    }

    if config.request_timeout_secs == Some(0) {
        bail!(
            "Invalid config: request_timeout_secs must be greater than 0.\n\n\
             💡 Hint: The default is {} seconds.",
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    if let Some(ref entries) = config.extra_dockerignore_entries {
        for (i, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                bail!(
                    "Invalid config: extra_dockerignore_entries[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a .dockerignore pattern (e.g., \"coverage\").",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Merge CLI flags, config file and defaults. CLI flags win over the config file.
pub fn resolve_settings(
    args: &Args,
    project_dir: PathBuf,
    config: Option<ConfigFile>,
) -> Result<Settings> {
    let config = config.unwrap_or_default();

    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(format)) => format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
        (None, None) => OutputFormat::default(),
    };

    let model = args
        .model
        .clone()
        .or(config.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    if model.trim().is_empty() {
        bail!("--model must not be empty");
    }

    let openai_api_key = args
        .openai_api_key
        .clone()
        .filter(|key| !key.trim().is_empty());

    Ok(Settings {
        dockerfile: args
            .dockerfile
            .clone()
            .unwrap_or_else(|| project_dir.join("Dockerfile")),
        dockerignore: args
            .dockerignore
            .clone()
            .unwrap_or_else(|| project_dir.join(".dockerignore")),
        package_json: args.package_json.clone(),
        output_dir: args
            .output_dir
            .clone()
            .or(config.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        format,
        openai_api_key,
        model,
        api_base_url: args
            .api_base_url
            .clone()
            .or(config.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        request_timeout: Duration::from_secs(
            config
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        extra_dockerignore_entries: config.extra_dockerignore_entries.unwrap_or_default(),
        dry_run: args.dry_run,
        project_dir,
    })
}
