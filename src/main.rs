mod cli;
mod config;

use cli::Args;
use config::Settings;
use dockershrink::adapters::outbound::console::StderrProgressReporter;
use dockershrink::adapters::outbound::filesystem::{
    FileSystemReader, OutputDirectoryWriter, RestrictedFilesystem, StdoutPresenter,
};
use dockershrink::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
use dockershrink::adapters::outbound::network::{OpenAiAdvisoryService, OpenAiConfig};
use dockershrink::application::dto::{OptimizeRequest, OptimizeResponse, OutputFormat};
use dockershrink::application::use_cases::OptimizeImageUseCase;
use dockershrink::optimization::domain::{Dockerfile, Dockerignore, PackageJson};
use dockershrink::ports::outbound::{
    ArtifactWriter, OutputPresenter, ProgressReporter, ProjectReader, ReportFormatter,
};
use dockershrink::shared::error::{ExitCode, ShrinkError};
use dockershrink::shared::telemetry::{init_tracing, level_for};
use dockershrink::shared::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

fn main() {
    let args = Args::parse_args();
    init_tracing(args.log_json, level_for(args.verbose));

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    // Validate project directory
    let project_dir = args.path.as_deref().unwrap_or(".");
    let project_path = PathBuf::from(project_dir);

    validate_project_path(&project_path)?;

    // Explicit --config must exist; otherwise look for dockershrink.config.yml
    let config_file = match args.config.as_deref() {
        Some(path) => {
            let config_file = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Some(config_file)
        }
        None => config::discover_config(&project_path)?,
    };
    let settings = config::resolve_settings(&args, project_path, config_file)?;
    debug!(
        dockerfile = %settings.dockerfile.display(),
        output_dir = %settings.output_dir.display(),
        format = %settings.format,
        "resolved settings"
    );

    let request = read_project(&settings)?;

    let progress_reporter = StderrProgressReporter::new();
    let advisory_service = match settings.openai_api_key.as_deref() {
        Some(api_key) => {
            let mut openai_config = OpenAiConfig::new(api_key);
            openai_config.model = settings.model.clone();
            openai_config.api_base_url = settings.api_base_url.clone();
            openai_config.request_timeout = settings.request_timeout;
            Some(OpenAiAdvisoryService::new(openai_config)?)
        }
        None => {
            progress_reporter.report(
                "ℹ️  No OpenAI API key provided, skipping AI-powered optimizations",
            );
            None
        }
    };

    let use_case = OptimizeImageUseCase::new(advisory_service, &progress_reporter);
    let response = use_case.execute(request)?;

    if settings.dry_run {
        info!("dry run, no files written");
    } else {
        write_artifacts(&settings, &response, &progress_reporter)?;
    }

    let formatter: Box<dyn ReportFormatter> = match settings.format {
        OutputFormat::Text => Box::new(TextReportFormatter::new(use_colors())),
        OutputFormat::Json => Box::new(JsonReportFormatter::new()),
    };
    let report = formatter.format(&response)?;

    StdoutPresenter::new().present(&report)?;

    Ok(())
}

/// Reads every artifact the optimization needs into the request
fn read_project(settings: &Settings) -> Result<OptimizeRequest> {
    let reader = FileSystemReader::new();

    let dockerfile = Dockerfile::new(reader.read_dockerfile(&settings.dockerfile)?)?;
    let dockerignore = Dockerignore::new(reader.read_dockerignore(&settings.dockerignore)?);

    let package_json = match settings.package_json.as_deref() {
        Some(path) => match reader.read_package_json(path)? {
            Some(contents) => Some(PackageJson::new(contents)?),
            None => {
                return Err(ShrinkError::FileReadError {
                    path: path.to_path_buf(),
                    details: "package.json does not exist".to_string(),
                }
                .into())
            }
        },
        None => match reader.find_package_json(&settings.project_dir) {
            Some(path) => {
                debug!(path = %path.display(), "found package.json");
                reader
                    .read_package_json(&path)?
                    .map(PackageJson::new)
                    .transpose()?
            }
            None => None,
        },
    };

    let project_directory = RestrictedFilesystem::new(&settings.project_dir)?;

    Ok(OptimizeRequest::new(
        dockerfile,
        dockerignore,
        package_json,
        Box::new(project_directory),
    )
    .with_extra_dockerignore_entries(settings.extra_dockerignore_entries.clone()))
}

/// Writes the modified artifacts under their original file names
fn write_artifacts(
    settings: &Settings,
    response: &OptimizeResponse,
    progress_reporter: &dyn ProgressReporter,
) -> Result<()> {
    let writer = OutputDirectoryWriter::new(settings.output_dir.clone());

    if response.dockerfile_modified {
        let name = file_name_of(&settings.dockerfile, "Dockerfile");
        let path = writer.write_artifact(&name, &response.dockerfile)?;
        progress_reporter.report(&format!("💾 Wrote {}", path.display()));
    }
    if response.dockerignore_modified {
        let name = file_name_of(&settings.dockerignore, ".dockerignore");
        let path = writer.write_artifact(&name, &response.dockerignore)?;
        progress_reporter.report(&format!("💾 Wrote {}", path.display()));
    }
    Ok(())
}

fn file_name_of(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(fallback)
        .to_string()
}

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ShrinkError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| ShrinkError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(ShrinkError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ShrinkError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_project_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_project_path(temp_dir.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_project_path_nonexistent() {
        let nonexistent_path = PathBuf::from("/nonexistent/path/that/does/not/exist");
        let err = validate_project_path(&nonexistent_path).unwrap_err();
        assert!(format!("{}", err).contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_project_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Dockerfile");
        fs::write(&file_path, "FROM node:20\n").unwrap();

        let err = validate_project_path(&file_path).unwrap_err();
        assert!(format!("{}", err).contains("Not a directory"));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(
            file_name_of(Path::new("app/Dockerfile.prod"), "Dockerfile"),
            "Dockerfile.prod"
        );
        assert_eq!(file_name_of(Path::new("/"), "Dockerfile"), "Dockerfile");
    }

    #[test]
    fn test_read_project_requires_explicit_package_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Dockerfile"), "FROM node:20\n").unwrap();

        let args = <Args as clap::Parser>::try_parse_from([
            "dockershrink",
            "--package-json",
            "missing/package.json",
        ])
        .unwrap();
        let settings =
            config::resolve_settings(&args, temp_dir.path().to_path_buf(), None).unwrap();

        match read_project(&settings) {
            Err(err) => assert!(format!("{}", err).contains("package.json does not exist")),
            Ok(_) => panic!("an explicit package.json that does not exist must be rejected"),
        }
    }

    #[test]
    fn test_read_project_finds_nested_package_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Dockerfile"), "FROM node:20\n").unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src/package.json"), "{\"name\": \"app\"}").unwrap();

        let args = <Args as clap::Parser>::try_parse_from(["dockershrink"]).unwrap();
        let settings =
            config::resolve_settings(&args, temp_dir.path().to_path_buf(), None).unwrap();

        let request = read_project(&settings).unwrap();
        assert_eq!(
            request.package_json.map(|p| p.raw().to_string()).as_deref(),
            Some("{\"name\": \"app\"}")
        );
        assert!(!request.dockerignore.exists());
    }
}
