/// End-to-end tests for the CLI
///
/// Every test runs the binary against a temporary project without an OpenAI
/// API key, so only the local rules are exercised and no network is used.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const MULTI_STAGE: &str = "FROM node:20 AS build
WORKDIR /app
COPY . .
RUN npm ci && npm run build

FROM node:20
COPY --from=build /app/dist /app
CMD [\"node\", \"/app/index.js\"]
";

/// Create a project with a Dockerfile, package.json and optionally a .dockerignore.
fn create_project(dir: &Path, dockerfile: &str, dockerignore: Option<&str>) {
    fs::write(dir.join("Dockerfile"), dockerfile).unwrap();
    fs::write(dir.join("package.json"), r#"{"name": "app", "version": "1.0.0"}"#).unwrap();
    if let Some(contents) = dockerignore {
        fs::write(dir.join(".dockerignore"), contents).unwrap();
    }
}

/// Base command: no API key from the environment, output kept inside `dir`.
fn dockershrink(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dockershrink");
    cmd.env_remove("OPENAI_API_KEY")
        .env("NO_COLOR", "1")
        .current_dir(dir)
        .args(["-p", dir.to_str().unwrap()]);
    cmd
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("dockershrink").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("dockershrink")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("dockershrink")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("dockershrink")
            .args(["-f", "markdown"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent project path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("dockershrink")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 3: Application error - missing Dockerfile
    #[test]
    fn test_exit_code_application_error_missing_dockerfile() {
        let dir = TempDir::new().unwrap();
        dockershrink(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Dockerfile does not exist"));
    }

    /// Exit code 3: Application error - Dockerfile without FROM
    #[test]
    fn test_exit_code_application_error_no_stages() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "# nothing here\nRUN echo hi\n", None);

        dockershrink(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("No stages found in Dockerfile"));
        assert!(!dir.path().join("dockershrink.optimized").exists());
    }
}

// ============================================================================
// Optimization Output Tests
// ============================================================================

mod optimization_tests {
    use super::*;

    #[test]
    fn test_multi_stage_project_is_optimized() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), MULTI_STAGE, None);

        let output = dockershrink(dir.path()).output().unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Actions Taken:"));
        assert!(stdout.contains("Created .dockerignore file (.dockerignore)"));

        let out_dir = dir.path().join("dockershrink.optimized");
        let dockerfile = fs::read_to_string(out_dir.join("Dockerfile")).unwrap();
        assert_eq!(
            dockerfile,
            MULTI_STAGE.replace("\nFROM node:20\n", "\nFROM node:20-alpine\n")
        );
        let dockerignore = fs::read_to_string(out_dir.join(".dockerignore")).unwrap();
        assert_eq!(dockerignore, "node_modules\nnpm-debug.log\n.git\n");

        // Inputs are never modified in place
        assert_eq!(
            fs::read_to_string(dir.path().join("Dockerfile")).unwrap(),
            MULTI_STAGE
        );
        assert!(!dir.path().join(".dockerignore").exists());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("No OpenAI API key provided"));
    }

    #[test]
    fn test_already_optimized_project_writes_nothing() {
        let dir = TempDir::new().unwrap();
        create_project(
            dir.path(),
            "FROM node:20-alpine\nCOPY . .\n",
            Some("node_modules\nnpm-debug.log\n.git\n"),
        );

        dockershrink(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("already optimized"));
        assert!(!dir.path().join("dockershrink.optimized").exists());
    }

    #[test]
    fn test_json_format() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20\nCOPY . .\n", None);

        let output = dockershrink(dir.path())
            .args(["-f", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["dockerfile_modified"], false);
        assert_eq!(value["dockerignore_modified"], true);
        assert_eq!(value["actions_taken"][0]["rule"], "create-dockerignore");
        assert_eq!(
            value["recommendations"][0]["rule"],
            "final-stage-slim-baseimage"
        );
        assert_eq!(value["metadata"]["tool_name"], "dockershrink");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), MULTI_STAGE, None);

        dockershrink(dir.path())
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("Actions Taken:"));
        assert!(!dir.path().join("dockershrink.optimized").exists());
    }

    #[test]
    fn test_custom_output_dir_and_dockerfile_name() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20\n", None);
        fs::write(dir.path().join("Dockerfile.prod"), MULTI_STAGE).unwrap();
        let out_dir = dir.path().join("out");

        dockershrink(dir.path())
            .args([
                "--dockerfile",
                dir.path().join("Dockerfile.prod").to_str().unwrap(),
                "-o",
                out_dir.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert!(out_dir.join("Dockerfile.prod").exists());
        assert!(out_dir.join(".dockerignore").exists());
        assert!(!out_dir.join("Dockerfile").exists());
    }
}

// ============================================================================
// Config File Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_settings() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20\n", None);
        fs::write(
            dir.path().join("dockershrink.config.yml"),
            "format: json\nextra_dockerignore_entries:\n  - coverage\n",
        )
        .unwrap();

        let output = dockershrink(dir.path()).output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["actions_taken"][1]["rule"], "update-dockerignore");

        let dockerignore =
            fs::read_to_string(dir.path().join("dockershrink.optimized/.dockerignore")).unwrap();
        assert!(dockerignore.ends_with(".git\ncoverage\n"));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20-alpine\n", None);
        let config_path = dir.path().join("custom.yml");
        fs::write(&config_path, "format: json\n").unwrap();

        dockershrink(dir.path())
            .args(["-c", config_path.to_str().unwrap(), "-f", "text"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Actions Taken:"))
            .stderr(predicate::str::contains("Loaded config from:"));
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20\n", None);

        dockershrink(dir.path())
            .args(["-c", "nonexistent-config.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_config_value_error() {
        let dir = TempDir::new().unwrap();
        create_project(dir.path(), "FROM node:20\n", None);
        fs::write(
            dir.path().join("dockershrink.config.yml"),
            "request_timeout_secs: 0\n",
        )
        .unwrap();

        dockershrink(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("request_timeout_secs"));
    }
}
