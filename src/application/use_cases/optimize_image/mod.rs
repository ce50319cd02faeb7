use crate::application::dto::{OptimizeRequest, OptimizeResponse};
use crate::optimization::domain::{Dockerfile, Dockerignore, OptimizationAction, Stage};
use crate::optimization::rules::{DockerignoreBaseline, FinalStageLightBaseImage, LightBaseImageDecision};
use crate::optimization::services::RunMetadataGenerator;
use crate::ports::outbound::{AdvisoryRequest, AdvisoryService, ProgressReporter};
use crate::shared::error::ShrinkError;
use crate::shared::Result;
use tracing::{debug, info, info_span};

/// File name recorded in actions touching the Dockerfile
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// File name recorded in actions touching the ignore file
pub const DOCKERIGNORE_NAME: &str = ".dockerignore";

/// Append-only logs of one run
#[derive(Default)]
struct RunLog {
    actions_taken: Vec<OptimizationAction>,
    recommendations: Vec<OptimizationAction>,
}

/// OptimizeImageUseCase - Core use case for shrinking a Docker image
///
/// Runs the ignore-file baseline, optionally delegates to the advisory
/// service, then applies the local light-base-image rule unless the
/// advisory service already changed the final stage's base image.
///
/// All work happens on in-memory artifacts. Any error aborts the run and
/// discards partial state, so callers write nothing unless `execute`
/// succeeds.
///
/// # Type Parameters
/// * `ADV` - AdvisoryService implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct OptimizeImageUseCase<ADV, PR> {
    advisory_service: Option<ADV>,
    progress_reporter: PR,
}

impl<ADV, PR> OptimizeImageUseCase<ADV, PR>
where
    ADV: AdvisoryService,
    PR: ProgressReporter,
{
    /// Creates a new OptimizeImageUseCase with injected dependencies
    pub fn new(advisory_service: Option<ADV>, progress_reporter: PR) -> Self {
        Self {
            advisory_service,
            progress_reporter,
        }
    }

    /// Executes the optimization use case
    ///
    /// # Arguments
    /// * `request` - Loaded artifacts and the restricted project view
    ///
    /// # Returns
    /// Final texts plus the ordered actions taken and recommendations
    ///
    /// # Errors
    /// - `ShrinkError::NoStagesFound` if the Dockerfile has no FROM
    /// - `ShrinkError::AdvisoryService` if the advisory call fails
    /// - `ShrinkError::AdvisoryResponseInvalid` if the returned Dockerfile does not parse
    /// - `ShrinkError::InternalConsistency` if a local edit corrupts the Dockerfile
    pub fn execute(&self, request: OptimizeRequest) -> Result<OptimizeResponse> {
        let metadata = RunMetadataGenerator::generate_default();
        let span = info_span!("optimize", run_id = metadata.run_id());
        let _guard = span.enter();

        let OptimizeRequest {
            dockerfile,
            mut dockerignore,
            package_json,
            project_directory,
            extra_dockerignore_entries,
        } = request;

        let original_dockerignore = dockerignore.clone();
        let mut log = RunLog::default();

        // Step 1: Ignore-file hygiene
        self.ensure_dockerignore_baseline(&mut dockerignore, &extra_dockerignore_entries, &mut log);

        // Step 2: Snapshot before any delegation
        let original = dockerfile;
        let original_final_stage = original.final_stage()?;

        // Step 3: Advisory delegation
        let mut current = match &self.advisory_service {
            Some(service) => {
                let request = AdvisoryRequest {
                    dockerfile: original.raw(),
                    dockerignore: dockerignore.raw(),
                    package_json: package_json.as_ref().map(|p| p.raw()).unwrap_or_default(),
                    project_directory: project_directory.as_ref(),
                    dockerfile_stage_count: original.stage_count(),
                };
                self.delegate_to_advisory(service, &request, &mut log)?
            }
            None => original.clone(),
        };

        // Step 4: Local rule, only if the final base image is untouched
        if Self::final_base_unchanged(&original, &original_final_stage, &current)? {
            self.lighten_final_base_image(&mut current, &mut log)?;
        } else {
            info!("final stage base image changed by advisory service, skipping local rule");
        }

        // Step 5: Build response
        let response = OptimizeResponse {
            dockerfile_modified: current.raw() != original.raw(),
            dockerignore_modified: dockerignore != original_dockerignore,
            dockerfile: current.raw().to_string(),
            dockerignore: dockerignore.raw().to_string(),
            actions_taken: log.actions_taken,
            recommendations: log.recommendations,
            metadata,
        };

        self.progress_reporter.report_completion(&format!(
            "✅ Optimization complete: {} action(s) taken, {} recommendation(s)",
            response.actions_taken.len(),
            response.recommendations.len()
        ));

        Ok(response)
    }

    /// Creates the ignore file if needed and adds the baseline entries
    fn ensure_dockerignore_baseline(
        &self,
        dockerignore: &mut Dockerignore,
        extra_entries: &[String],
        log: &mut RunLog,
    ) {
        let actions = DockerignoreBaseline::apply(dockerignore, DOCKERIGNORE_NAME, extra_entries);
        for action in actions {
            debug!(rule = %action.rule, "dockerignore updated");
            self.progress_reporter.report(&format!("📝 {}", action.title));
            log.actions_taken.push(action);
        }
    }

    /// Calls the advisory service and re-parses its Dockerfile
    ///
    /// Records from the response are appended in the order received.
    fn delegate_to_advisory(
        &self,
        service: &ADV,
        request: &AdvisoryRequest<'_>,
        log: &mut RunLog,
    ) -> Result<Dockerfile> {
        debug!(
            stage_count = request.dockerfile_stage_count,
            "delegating to advisory service"
        );
        self.progress_reporter
            .start_spinner("🤖 Asking the advisory service to optimize the Dockerfile...");
        let result = service.optimize_dockerfile(request);
        self.progress_reporter.finish_spinner();

        let response = result.map_err(ShrinkError::advisory_service)?;
        let revised =
            Dockerfile::new(response.dockerfile).map_err(ShrinkError::advisory_response_invalid)?;

        self.progress_reporter.report(&format!(
            "🤖 Advisory service returned {} action(s) and {} recommendation(s)",
            response.actions_taken.len(),
            response.recommendations.len()
        ));
        log.recommendations.extend(response.recommendations);
        log.actions_taken.extend(response.actions_taken);

        Ok(revised)
    }

    /// Compares stage count and final base image before and after delegation
    fn final_base_unchanged(
        original: &Dockerfile,
        original_final_stage: &Stage,
        current: &Dockerfile,
    ) -> Result<bool> {
        if original.stage_count() != current.stage_count() {
            return Ok(false);
        }
        let current_final_stage = current.final_stage()?;
        let same = match (original_final_stage.base_image(), current_final_stage.base_image()) {
            (Ok(before), Ok(after)) => before == after,
            _ => original_final_stage.base_image_text() == current_final_stage.base_image_text(),
        };
        Ok(same)
    }

    /// Applies the light-base-image rule to the final stage
    fn lighten_final_base_image(&self, dockerfile: &mut Dockerfile, log: &mut RunLog) -> Result<()> {
        match FinalStageLightBaseImage::evaluate(dockerfile, DOCKERFILE_NAME) {
            LightBaseImageDecision::NoChange => {
                debug!("final stage already uses a light base image");
            }
            LightBaseImageDecision::Recommend(recommendation) => {
                debug!(rule = %recommendation.rule, "recommending a lighter base image");
                log.recommendations.push(recommendation);
            }
            LightBaseImageDecision::Apply {
                stage,
                image,
                action,
            } => {
                debug!(
                    rule = %action.rule,
                    stage_index = stage.index(),
                    from = stage.base_image_text(),
                    to = %image,
                    "setting lighter base image for final stage"
                );
                dockerfile.set_stage_base_image(&stage, &image)?;
                self.progress_reporter
                    .report(&format!("🪶 Final stage now uses {}", image));
                log.actions_taken.push(action);
            }
        }
        Ok(())
    }
}
