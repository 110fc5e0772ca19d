//! Value records copied into project descriptors
//!
//! These are plain inputs to the add/remove operations of [`super::Pom`];
//! they are never stored by reference inside a document.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};
use crate::tree::Element;

/// groupId + artifactId pair identifying a dependency, plugin or exclusion
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactKey {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for ArtifactKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => {
                Ok(Self::new(*group, *artifact))
            }
            _ => Err(Error::ConfigParse {
                message: format!("invalid artifact key '{}'", s),
                hint: Some("expected groupId:artifactId".to_string()),
            }),
        }
    }
}

/// Full project coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(self.group_id.clone(), self.artifact_id.clone())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A `<dependency>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub kind: Option<String>,
    pub optional: bool,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: None,
            kind: None,
            optional: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(self.group_id.clone(), self.artifact_id.clone())
    }

    pub(crate) fn to_element(&self) -> Element {
        let mut element = Element::new("dependency")
            .with_child(Element::leaf("groupId", self.group_id.as_str()))
            .with_child(Element::leaf("artifactId", self.artifact_id.as_str()))
            .with_leaf("version", self.version.as_deref())
            .with_leaf("type", self.kind.as_deref())
            .with_leaf("scope", self.scope.as_deref());
        if self.optional {
            element = element.with_child(Element::leaf("optional", "true"));
        }
        element
    }

    pub(crate) fn from_element(element: &Element) -> Option<Self> {
        Some(Self {
            group_id: element.child_text("groupId")?.to_string(),
            artifact_id: element.child_text("artifactId")?.to_string(),
            version: element.child_text("version").map(str::to_string),
            scope: element.child_text("scope").map(str::to_string),
            kind: element.child_text("type").map(str::to_string),
            optional: element.child_text("optional") == Some("true"),
        })
    }
}

impl FromStr for Dependency {
    type Err = Error;

    /// Parse `groupId:artifactId[:version[:scope]]`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let invalid = || Error::ConfigParse {
            message: format!("invalid dependency '{}'", s),
            hint: Some("expected groupId:artifactId[:version[:scope]]".to_string()),
        };
        if parts.len() < 2 || parts.len() > 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        let mut dependency = Dependency::new(parts[0], parts[1]);
        if let Some(version) = parts.get(2) {
            dependency = dependency.with_version(*version);
        }
        if let Some(scope) = parts.get(3) {
            dependency = dependency.with_scope(*scope);
        }
        Ok(dependency)
    }
}

/// A `<repository>` or `<pluginRepository>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub url: String,
    pub snapshots: bool,
    pub releases: bool,
}

/// Parsed and serialized URL without trailing slashes; unparsable URLs compare as written
fn normalize_url(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) => parsed.as_str().trim_end_matches('/').to_string(),
        Err(_) => url.trim().trim_end_matches('/').to_string(),
    }
}

impl Repository {
    /// Create a repository entry, validating the URL
    ///
    /// The URL is kept as written; [`Repository::same_location`] compares
    /// locations in normalised form.
    pub fn new(id: impl Into<String>, url: &str) -> Result<Self> {
        Url::parse(url)?;
        Ok(Self {
            id: id.into(),
            url: url.to_string(),
            snapshots: false,
            releases: true,
        })
    }

    /// True when `url` names the same location as this repository
    pub fn same_location(&self, url: &str) -> bool {
        normalize_url(&self.url) == normalize_url(url)
    }

    pub fn with_snapshots(mut self, snapshots: bool) -> Self {
        self.snapshots = snapshots;
        self
    }

    pub fn with_releases(mut self, releases: bool) -> Self {
        self.releases = releases;
        self
    }

    pub(crate) fn to_element(&self, name: &str) -> Element {
        let enabled = |section: &str, flag: bool| {
            Element::new(section).with_child(Element::leaf("enabled", flag.to_string()))
        };
        Element::new(name)
            .with_child(Element::leaf("id", self.id.as_str()))
            .with_child(Element::leaf("url", self.url.as_str()))
            .with_child(enabled("snapshots", self.snapshots))
            .with_child(enabled("releases", self.releases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_from_str() {
        let dependency: Dependency = "org.osgi:osgi_core:4.0:provided".parse().unwrap();
        assert_eq!(dependency.group_id, "org.osgi");
        assert_eq!(dependency.artifact_id, "osgi_core");
        assert_eq!(dependency.version.as_deref(), Some("4.0"));
        assert_eq!(dependency.scope.as_deref(), Some("provided"));

        assert!("org.osgi".parse::<Dependency>().is_err());
        assert!("a::b".parse::<Dependency>().is_err());
    }

    #[test]
    fn test_dependency_element_round_trip() {
        let dependency = Dependency::new("g", "a")
            .with_version("1.0")
            .with_scope("provided")
            .optional(true);
        let element = dependency.to_element();
        assert_eq!(element.child_text("optional"), Some("true"));
        assert_eq!(element.child("type"), None);
        assert_eq!(Dependency::from_element(&element), Some(dependency));
    }

    #[test]
    fn test_repository_rejects_bad_url() {
        assert!(Repository::new("central", "not a url").is_err());
        let repository = Repository::new("ops4j", "http://repository.ops4j.org/maven2/").unwrap();
        assert_eq!(repository.url, "http://repository.ops4j.org/maven2/");
        assert!(repository.same_location("HTTP://Repository.OPS4J.org/maven2"));
        assert!(!repository.same_location("http://repository.ops4j.org/maven3"));
        let element = repository.with_snapshots(true).to_element("repository");
        assert_eq!(
            element.descendant("snapshots/enabled").and_then(Element::text),
            Some("true")
        );
    }

    #[test]
    fn test_artifact_key_from_str() {
        let key: ArtifactKey = "org.ops4j:maven-pax-plugin".parse().unwrap();
        assert_eq!(key.to_string(), "org.ops4j:maven-pax-plugin");
        assert!("nogroup".parse::<ArtifactKey>().is_err());
    }
}
