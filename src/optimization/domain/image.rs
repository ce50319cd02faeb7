use crate::shared::error::ShrinkError;
use crate::shared::Result;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Registry assumed when a reference names none
const DEFAULT_REGISTRY: &str = "docker.io";

/// Namespace for single-component repositories on Docker Hub
const OFFICIAL_NAMESPACE: &str = "library";

/// Default tag when neither tag nor digest is given
const DEFAULT_TAG: &str = "latest";

/// Debian/Ubuntu codenames that official images append to their tags
const DISTRO_CODENAMES: &[&str] = &[
    "trixie", "bookworm", "bullseye", "buster", "stretch", "jessie", "noble", "jammy", "focal",
    "bionic",
];

/// ImageRef value object representing a base-image reference
///
/// Grammar: `[registry/]repository[:tag][@digest]`, split by
/// `dockerfile_parser::ImageRef`. Components are kept
/// exactly as written; equality and hashing use the *resolved* reference, so
/// `node`, `node:latest` and `docker.io/library/node:latest` are all equal.
#[derive(Debug, Clone)]
pub struct ImageRef {
    registry: Option<String>,
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageRef {
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ShrinkError::Validation {
                message: "Image reference cannot be empty".to_string(),
            }
            .into());
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(ShrinkError::Validation {
                message: format!("Image reference '{}' contains whitespace", reference),
            }
            .into());
        }

        let parsed = dockerfile_parser::ImageRef::parse(reference);
        let invalid = |problem: &str| -> anyhow::Error {
            ShrinkError::Validation {
                message: format!("Image reference '{}' {}", reference, problem),
            }
            .into()
        };

        // With a digest present the crate leaves any tag inside the image name.
        let (repository, tag) = match (&parsed.hash, parsed.tag) {
            (Some(_), None) => match parsed.image.rsplit_once(':') {
                Some((repository, tag)) => (repository.to_string(), Some(tag.to_string())),
                None => (parsed.image, None),
            },
            (_, tag) => (parsed.image, tag),
        };

        if tag.as_deref() == Some("") || reference.ends_with(':') {
            return Err(invalid("has an empty tag"));
        }
        if parsed.hash.as_deref() == Some("") || reference.ends_with('@') {
            return Err(invalid("has an empty digest"));
        }
        if repository.is_empty() {
            return Err(invalid("has no repository"));
        }

        Ok(Self {
            registry: parsed.registry,
            repository,
            tag,
            digest: parsed.hash,
        })
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Last path component of the repository, e.g. `node` for `docker.io/library/node`
    pub fn name(&self) -> &str {
        self.repository
            .rsplit('/')
            .next()
            .unwrap_or(self.repository.as_str())
    }

    /// Canonical textual form used when writing the reference into a Dockerfile.
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        if let Some(registry) = &self.registry {
            out.push_str(registry);
            out.push('/');
        }
        out.push_str(&self.repository);
        match (&self.tag, &self.digest) {
            (Some(tag), _) => {
                out.push(':');
                out.push_str(tag);
            }
            (None, None) => {
                out.push(':');
                out.push_str(DEFAULT_TAG);
            }
            (None, Some(_)) => {}
        }
        if let Some(digest) = &self.digest {
            out.push('@');
            out.push_str(digest);
        }
        out
    }

    /// Returns a copy pointing at `tag` in the same registry and repository.
    /// Any digest is dropped since it would pin the old tag's content.
    pub fn with_tag(&self, tag: &str) -> Self {
        Self {
            registry: self.registry.clone(),
            repository: self.repository.clone(),
            tag: Some(tag.to_string()),
            digest: None,
        }
    }

    fn resolved(&self) -> (String, String, Option<String>, Option<&str>) {
        let registry = match self.registry.as_deref() {
            None | Some("index.docker.io") | Some("registry-1.docker.io") => {
                DEFAULT_REGISTRY.to_string()
            }
            Some(other) => other.to_string(),
        };
        let repository = if registry == DEFAULT_REGISTRY && !self.repository.contains('/') {
            format!("{}/{}", OFFICIAL_NAMESPACE, self.repository)
        } else {
            self.repository.clone()
        };
        let tag = match (&self.tag, &self.digest) {
            (Some(tag), _) => Some(tag.clone()),
            (None, None) => Some(DEFAULT_TAG.to_string()),
            (None, Some(_)) => None,
        };
        (registry, repository, tag, self.digest.as_deref())
    }

    /// True when the reference depends on a build argument (`$VAR` / `${VAR}`)
    pub fn is_templated(&self) -> bool {
        self.full_name().contains('$')
    }

    pub fn is_scratch(&self) -> bool {
        self.registry.is_none() && self.repository == "scratch"
    }

    /// True when the image is already a lightweight variant (alpine, slim or distroless)
    pub fn is_alpine_or_slim(&self) -> bool {
        let tag_is_light = self.tag.as_deref().is_some_and(|tag| {
            let tag = tag.to_ascii_lowercase();
            tag.contains("alpine") || tag.contains("slim")
        });
        tag_is_light || self.repository.contains("distroless")
    }

    /// Returns the alpine equivalent of the current tag.
    ///
    /// `latest` becomes `alpine`, `22.9.0` becomes `22.9.0-alpine` and
    /// distro-specific tags such as `22-bookworm` become `22-alpine`. An
    /// alpine tag is returned unchanged.
    pub fn alpine_equivalent_tag(&self) -> String {
        let tag = match self.tag.as_deref() {
            None | Some(DEFAULT_TAG) => return "alpine".to_string(),
            Some(tag) => tag,
        };
        if tag.to_ascii_lowercase().contains("alpine") {
            return tag.to_string();
        }

        let kept: Vec<&str> = tag
            .split('-')
            .filter(|part| !DISTRO_CODENAMES.contains(&part.to_ascii_lowercase().as_str()))
            .collect();
        if kept.is_empty() {
            "alpine".to_string()
        } else {
            format!("{}-alpine", kept.join("-"))
        }
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.resolved() == other.resolved()
    }
}

impl Eq for ImageRef {}

impl Hash for ImageRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolved().hash(state);
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
