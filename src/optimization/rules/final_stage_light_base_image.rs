use crate::optimization::domain::{Dockerfile, ImageRef, OptimizationAction, Stage};
use tracing::debug;

pub const RULE_ID: &str = "final-stage-slim-baseimage";

/// Official images known to publish alpine variants under the same repository
const ALPINE_REPOSITORIES: &[&str] = &[
    "node",
    "python",
    "golang",
    "ruby",
    "php",
    "nginx",
    "redis",
    "postgres",
    "httpd",
    "memcached",
    "rust",
];

/// Outcome of evaluating the final stage's base image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightBaseImageDecision {
    /// The base image is already light, or cannot be judged safely
    NoChange,
    /// Suggest a lighter base image without touching the Dockerfile
    Recommend(OptimizationAction),
    /// Replace the final stage's base image and record the action
    Apply {
        stage: Stage,
        image: ImageRef,
        action: OptimizationAction,
    },
}

/// FinalStageLightBaseImage policy for lightening the final image's base
///
/// A single-stage Dockerfile most likely builds and tests in that stage, so a
/// lighter base is only recommended there. In a multi-stage Dockerfile the
/// final stage only runs the app and its base image is swapped directly.
///
/// Decision order:
/// 1. Skip `scratch`, build-arg templated images, earlier stage aliases,
///    digest-pinned images and images that are already alpine/slim
/// 2. Images without a known alpine variant only get a recommendation
/// 3. Single stage: recommend; multiple stages: apply
pub struct FinalStageLightBaseImage;

impl FinalStageLightBaseImage {
    /// Evaluates the rule against the current state of `dockerfile`
    ///
    /// # Arguments
    /// * `dockerfile` - The Dockerfile to inspect (not modified)
    /// * `filename` - File name recorded in the resulting action
    ///
    /// # Returns
    /// The decision; the caller performs any mutation it describes
    pub fn evaluate(dockerfile: &Dockerfile, filename: &str) -> LightBaseImageDecision {
        let stages = dockerfile.stages();
        let Some(final_stage) = stages.last() else {
            return LightBaseImageDecision::NoChange;
        };

        if Self::refers_to_earlier_stage(&stages, final_stage) {
            debug!(
                rule = RULE_ID,
                base = final_stage.base_image_text(),
                "final stage builds on an earlier stage, skipping"
            );
            return LightBaseImageDecision::NoChange;
        }

        let current = match final_stage.base_image() {
            Ok(image) => image,
            Err(e) => {
                debug!(rule = RULE_ID, error = %e, "final base image not understood, skipping");
                return LightBaseImageDecision::NoChange;
            }
        };

        if current.is_scratch()
            || current.is_templated()
            || current.digest().is_some()
            || current.is_alpine_or_slim()
        {
            return LightBaseImageDecision::NoChange;
        }

        let Some(preferred) = Self::preferred_image(&current) else {
            return LightBaseImageDecision::Recommend(Self::slim_variant_recommendation(
                filename, &current,
            ));
        };

        if stages.len() == 1 {
            return LightBaseImageDecision::Recommend(Self::single_stage_recommendation(
                filename, &current, &preferred,
            ));
        }

        let action = OptimizationAction::new(
            RULE_ID,
            filename,
            "Used a new and smaller base image for the final stage in Multistage Dockerfile",
            format!(
                "Used {} instead of {} as the base image of the final stage.\n\
                 This becomes the base image of the final image produced, reducing the size significantly.",
                preferred.full_name(),
                current.full_name()
            ),
        );
        LightBaseImageDecision::Apply {
            stage: final_stage.clone(),
            image: preferred,
            action,
        }
    }

    /// Returns the alpine variant of `current`, if its repository is known to have one
    ///
    /// Registry and repository are kept; only the tag changes.
    pub fn preferred_image(current: &ImageRef) -> Option<ImageRef> {
        let namespace_ok = match current.repository().split_once('/') {
            None => true,
            Some((namespace, _)) => namespace == "library",
        };
        if !namespace_ok || !ALPINE_REPOSITORIES.contains(&current.name()) {
            return None;
        }
        let on_docker_hub = matches!(
            current.registry(),
            None | Some("docker.io") | Some("index.docker.io") | Some("registry-1.docker.io")
        );
        if !on_docker_hub {
            return None;
        }
        Some(current.with_tag(&current.alpine_equivalent_tag()))
    }

    fn refers_to_earlier_stage(stages: &[Stage], final_stage: &Stage) -> bool {
        let base = final_stage.base_image_text();
        stages[..final_stage.index()]
            .iter()
            .filter_map(Stage::name)
            .any(|name| name.eq_ignore_ascii_case(base))
    }

    fn single_stage_recommendation(
        filename: &str,
        current: &ImageRef,
        preferred: &ImageRef,
    ) -> OptimizationAction {
        OptimizationAction::new(
            RULE_ID,
            filename,
            "Use a smaller base image for the final image produced",
            format!(
                "Use {} instead of {} as the base image.\n\
                 This will significantly decrease the final image's size.\n\
                 This practice is best combined with Multistage builds. The final stage of your Dockerfile must use a slim base image.\n\
                 Since all testing and build processes take place in a previous stage, dev dependencies and a heavy distro isn't really needed in the final image.",
                preferred.full_name(),
                current.full_name()
            ),
        )
    }

    fn slim_variant_recommendation(filename: &str, current: &ImageRef) -> OptimizationAction {
        OptimizationAction::new(
            RULE_ID,
            filename,
            "Use a smaller base image for the final image produced",
            format!(
                "Use a slim, alpine or distroless variant of {} as the base image of the final stage.\n\
                 This will significantly decrease the final image's size.",
                current.full_name()
            ),
        )
    }
}
