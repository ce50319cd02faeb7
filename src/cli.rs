use clap::Parser;
use std::path::PathBuf;

use dockershrink::application::dto::OutputFormat;

/// Reduce the size of Docker images for NodeJS projects
#[derive(Parser, Debug)]
#[command(name = "dockershrink")]
#[command(version)]
#[command(
    about = "Reduce the size of Docker images for NodeJS projects",
    long_about = "Reads the project's Dockerfile, .dockerignore and package.json, applies \
                  size optimizations and writes the modified files to an output directory. \
                  Supply an OpenAI API key to let an LLM restructure the Dockerfile as well."
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Path to the Dockerfile [default: <path>/Dockerfile]
    #[arg(long)]
    pub dockerfile: Option<PathBuf>,

    /// Path to the .dockerignore file [default: <path>/.dockerignore]
    #[arg(long)]
    pub dockerignore: Option<PathBuf>,

    /// Path to package.json [default: <path>/package.json, then <path>/src/package.json]
    #[arg(long = "package-json")]
    pub package_json: Option<PathBuf>,

    /// Directory the optimized files are written to [default: dockershrink.optimized]
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Report format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// OpenAI API key enabling AI-powered optimizations
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model used for AI-powered optimizations
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long = "api-base-url")]
    pub api_base_url: Option<String>,

    /// Path to config file (auto-discovers dockershrink.config.yml if not specified)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit diagnostics as JSON lines
    #[arg(long = "log-json")]
    pub log_json: bool,

    /// Print the report without writing any files
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unset() {
        let args = Args::try_parse_from(["dockershrink"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.dockerfile.is_none());
        assert!(args.format.is_none());
        assert!(args.model.is_none());
        assert!(!args.verbose);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "dockershrink",
            "-p",
            "app",
            "--dockerfile",
            "app/Dockerfile.prod",
            "--dockerignore",
            "app/.dockerignore",
            "--package-json",
            "app/package.json",
            "-o",
            "out",
            "-f",
            "json",
            "--model",
            "gpt-4o-mini",
            "--api-base-url",
            "http://localhost:8080/v1",
            "-c",
            "cfg.yml",
            "-v",
            "--log-json",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.path.as_deref(), Some("app"));
        assert_eq!(args.dockerfile, Some(PathBuf::from("app/Dockerfile.prod")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(args.config, Some(PathBuf::from("cfg.yml")));
        assert!(args.verbose && args.log_json && args.dry_run);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let err = Args::try_parse_from(["dockershrink", "--format", "yaml"]).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }
}
