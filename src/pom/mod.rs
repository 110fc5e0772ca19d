//! # Round-trip project descriptor editing
//!
//! [`Pom`] wraps the XML tree of a `pom.xml` file with domain operations:
//! adding and removing modules, dependencies, exclusions and repositories,
//! linking a parent, updating groups and plugin versions, and overlaying a
//! customized descriptor onto a freshly generated one.
//!
//! Every operation locates its targets with a [`PathQuery`] and inserts new
//! content through [`merge`], so entries it does not touch keep their order
//! and their comments. New entries are appended at the end of their
//! container; the container is created at the end of its parent when absent.
//!
//! Adding an entry that already exists fails with `Error::DuplicateEntry`
//! unless `overwrite` is set, in which case the existing entries are removed
//! first. Removing an entry that does not exist is not an error: the remove
//! operations return `false`.

pub mod coordinates;
pub mod xml;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults::{
    CHILD_MODEL_VERSION, DEFAULT_TOOLCHAIN_PLUGINS, MAVEN_POM_NAMESPACE, MAVEN_POM_SCHEMA,
    POM_FILE, XSI_NAMESPACE,
};
use crate::error::{Error, Result};
use crate::merge::{mark_append, merge};
use crate::query::{literal, PathQuery};
use crate::tree::{Element, Node};

pub use coordinates::{ArtifactKey, Coordinates, Dependency, Repository};
pub use xml::XmlDocument;

/// Top-level sections an overlay never replaces
pub const PROTECTED_SECTIONS: [&str; 7] = [
    "modelVersion",
    "parent",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "modules",
];

/// Packaging used by OSGi bundle projects
pub const BUNDLE_PACKAGING: &str = "bundle";

/// An XML project descriptor loaded from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pom {
    path: PathBuf,
    document: XmlDocument,
}

/// Resolve a directory or file argument to the descriptor file
pub fn pom_file(location: &Path) -> PathBuf {
    if location.is_file() || location.file_name().is_some_and(|name| name == POM_FILE) {
        location.to_path_buf()
    } else {
        location.join(POM_FILE)
    }
}

impl Pom {
    /// Read the descriptor at `location`, a `pom.xml` file or its directory
    pub fn read(location: &Path) -> Result<Self> {
        let path = pom_file(location);
        let content = fs::read_to_string(&path).map_err(|e| Error::document(&path, "read", e))?;
        debug!("Read project descriptor {}", path.display());
        Self::parse(path, &content)
    }

    /// Parse descriptor content that notionally lives at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let document = xml::parse(&path, content)?;
        if document.root.child_text("artifactId").is_none() {
            return Err(Error::MissingEntry {
                path,
                message: "artifactId is required".to_string(),
            });
        }
        Ok(Self { path, document })
    }

    /// Create a minimal descriptor in memory; nothing is written until [`Pom::write`]
    pub fn create(location: &Path, coordinates: &Coordinates, packaging: &str) -> Self {
        let root = Element::new("project")
            .with_attribute("xmlns", MAVEN_POM_NAMESPACE)
            .with_attribute("xmlns:xsi", XSI_NAMESPACE)
            .with_attribute(
                "xsi:schemaLocation",
                format!("{} {}", MAVEN_POM_NAMESPACE, MAVEN_POM_SCHEMA),
            )
            .with_child(Element::leaf("modelVersion", CHILD_MODEL_VERSION))
            .with_child(Element::leaf("groupId", coordinates.group_id.as_str()))
            .with_child(Element::leaf("artifactId", coordinates.artifact_id.as_str()))
            .with_child(Element::leaf("version", coordinates.version.as_str()))
            .with_child(Element::leaf("packaging", packaging));

        Self {
            path: pom_file(location),
            document: XmlDocument::new(root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the descriptor
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Descriptor location of the named module
    pub fn module_pom_path(&self, module: &str) -> PathBuf {
        self.base_dir().join(module).join(POM_FILE)
    }

    pub fn root(&self) -> &Element {
        &self.document.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.document.root
    }

    /// Serialize the descriptor without writing it
    pub fn to_xml_string(&self) -> String {
        xml::serialize(&self.document)
    }

    /// Write the descriptor back to its file
    pub fn write(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| Error::document(dir, "create", e))?;
            }
        }
        fs::write(&self.path, self.to_xml_string())
            .map_err(|e| Error::document(&self.path, "write", e))?;
        debug!("Wrote project descriptor {}", self.path.display());
        Ok(())
    }

    ////// COORDINATES //////

    /// groupId, falling back to the parent's groupId
    pub fn group_id(&self) -> Option<&str> {
        self.root()
            .child_text("groupId")
            .or_else(|| self.root().descendant("parent/groupId")?.text())
    }

    pub fn artifact_id(&self) -> &str {
        self.root().child_text("artifactId").unwrap_or_default()
    }

    /// version, falling back to the parent's version
    pub fn version(&self) -> Option<&str> {
        self.root()
            .child_text("version")
            .or_else(|| self.root().descendant("parent/version")?.text())
    }

    /// Declared packaging, `jar` when absent
    pub fn packaging(&self) -> &str {
        self.root().child_text("packaging").unwrap_or("jar")
    }

    pub fn name(&self) -> Option<&str> {
        self.root().child_text("name")
    }

    pub fn is_bundle_project(&self) -> bool {
        self.packaging() == BUNDLE_PACKAGING
    }

    /// `groupId:artifactId`
    pub fn id(&self) -> String {
        format!("{}:{}", self.group_id().unwrap_or_default(), self.artifact_id())
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(
            self.group_id().unwrap_or_default(),
            self.artifact_id(),
            self.version().unwrap_or_default(),
        )
    }

    /// Coordinates of the parent link, if any
    pub fn parent(&self) -> Option<Coordinates> {
        let parent = self.root().child("parent")?;
        Some(Coordinates::new(
            parent.child_text("groupId").unwrap_or_default(),
            parent.child_text("artifactId").unwrap_or_default(),
            parent.child_text("version").unwrap_or_default(),
        ))
    }

    /// Relative path of the parent link, if declared
    pub fn parent_relative_path(&self) -> Option<&str> {
        self.root().descendant("parent/relativePath")?.text()
    }

    pub fn set_group_id(&mut self, group_id: &str) {
        self.set_section("groupId", group_id);
    }

    pub fn set_artifact_id(&mut self, artifact_id: &str) {
        self.set_section("artifactId", artifact_id);
    }

    pub fn set_version(&mut self, version: &str) {
        self.set_section("version", version);
    }

    pub fn set_packaging(&mut self, packaging: &str) {
        self.set_section("packaging", packaging);
    }

    pub fn set_name(&mut self, name: &str) {
        self.set_section("name", name);
    }

    fn set_section(&mut self, name: &str, value: &str) {
        self.root_mut().set_child_text(name, value);
    }

    /// Names of the declared modules, in file order
    pub fn modules(&self) -> Vec<String> {
        self.root()
            .child("modules")
            .map(|modules| {
                modules
                    .elements_named("module")
                    .filter_map(Element::text)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Declared dependencies, in file order
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.root()
            .child("dependencies")
            .map(|deps| {
                deps.elements_named("dependency")
                    .filter_map(Dependency::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Declared repositories (or plugin repositories), in file order
    pub fn repositories(&self, plugin: bool) -> Vec<Repository> {
        let (container, entry) = repository_sections(plugin);
        let enabled = |repository: &Element, section: &str, default: bool| {
            repository
                .child(section)
                .and_then(|s| s.child_text("enabled"))
                .map_or(default, |flag| flag == "true")
        };
        self.root()
            .child(container)
            .map(|section| {
                section
                    .elements_named(entry)
                    .filter_map(|repository| {
                        Some(Repository {
                            id: repository.child_text("id")?.to_string(),
                            url: repository.child_text("url")?.to_string(),
                            snapshots: enabled(repository, "snapshots", true),
                            releases: enabled(repository, "releases", true),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    ////// ADD / REMOVE //////

    /// Add a `<module>` entry
    pub fn add_module(&mut self, module: &str, overwrite: bool) -> Result<()> {
        let query = module_query(module)?;
        self.add_entry(
            &query,
            Element::leaf("module", module),
            overwrite,
            format!("module {}", module),
        )
    }

    /// Remove a `<module>` entry, returning whether it was declared
    pub fn remove_module(&mut self, module: &str) -> Result<bool> {
        let query = module_query(module)?;
        Ok(query.remove_matches(self.root_mut()) > 0)
    }

    /// Add a `<dependency>` entry, matched on groupId and artifactId
    pub fn add_dependency(&mut self, dependency: &Dependency, overwrite: bool) -> Result<()> {
        let query = dependency_query("dependencies", &dependency.key())?;
        self.add_entry(
            &query,
            dependency.to_element(),
            overwrite,
            format!("dependency {}", dependency.key()),
        )
    }

    /// Remove a `<dependency>` entry, returning whether it was declared
    pub fn remove_dependency(&mut self, key: &ArtifactKey) -> Result<bool> {
        let query = dependency_query("dependencies", key)?;
        Ok(query.remove_matches(self.root_mut()) > 0)
    }

    /// Add an `<exclusion>` to a declared dependency
    ///
    /// # Errors
    ///
    /// `Error::MissingEntry` when the dependency is not declared,
    /// `Error::DuplicateEntry` when the exclusion exists and `overwrite` is
    /// false.
    pub fn add_exclusion(
        &mut self,
        dependency: &ArtifactKey,
        exclusion: &ArtifactKey,
        overwrite: bool,
    ) -> Result<()> {
        let path = self.path.clone();
        let dependency_element = self.dependency_element_mut(dependency)?;

        let query = exclusion_query(exclusion)?;
        if !query.select(dependency_element).is_empty() {
            if !overwrite {
                return Err(Error::DuplicateEntry {
                    path,
                    entry: format!("exclusion {} on {}", exclusion, dependency),
                });
            }
            query.remove_matches(dependency_element);
        }

        let entry = Element::new("exclusion")
            .with_child(Element::leaf("groupId", exclusion.group_id.as_str()))
            .with_child(Element::leaf("artifactId", exclusion.artifact_id.as_str()));
        let mut container = Element::new("exclusions").with_child(entry);
        mark_append(&mut container);
        let fragment = Element::new("dependency").with_child(container);
        merge(dependency_element, Some(&fragment));
        Ok(())
    }

    /// Remove an `<exclusion>` from a declared dependency
    pub fn remove_exclusion(
        &mut self,
        dependency: &ArtifactKey,
        exclusion: &ArtifactKey,
    ) -> Result<bool> {
        let query = exclusion_query(exclusion)?;
        match self.dependency_element_mut(dependency) {
            Ok(element) => Ok(query.remove_matches(element) > 0),
            Err(Error::MissingEntry { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Add a `<repository>` (or `<pluginRepository>`), matched on id or url
    pub fn add_repository(
        &mut self,
        repository: &Repository,
        plugin: bool,
        overwrite: bool,
    ) -> Result<()> {
        let (container, entry) = repository_sections(plugin);
        let mut predicate = format!(
            "id={} or url={}",
            literal(&repository.id)?,
            literal(&repository.url)?
        );
        // existing entries may spell the same location differently
        for existing in self.repositories(plugin) {
            if existing.url != repository.url && repository.same_location(&existing.url) {
                predicate.push_str(&format!(" or url={}", literal(&existing.url)?));
            }
        }
        let query = PathQuery::parse(&format!("{}/{}[{}]", container, entry, predicate))?;
        self.add_entry(
            &query,
            repository.to_element(entry),
            overwrite,
            format!("{} {}", entry, repository.id),
        )
    }

    /// Remove a repository by id, returning whether it was declared
    pub fn remove_repository(&mut self, id: &str, plugin: bool) -> Result<bool> {
        let (container, entry) = repository_sections(plugin);
        let query = PathQuery::parse(&format!("{}/{}[id={}]", container, entry, literal(id)?))?;
        Ok(query.remove_matches(self.root_mut()) > 0)
    }

    /// Link this descriptor to a parent project
    ///
    /// The new `<parent>` section lands right after `modelVersion`, ahead of
    /// every other section.
    pub fn set_parent(
        &mut self,
        parent: &Coordinates,
        relative_path: Option<&str>,
        overwrite: bool,
    ) -> Result<()> {
        if self.root().child("parent").is_some() {
            if !overwrite {
                return Err(Error::DuplicateEntry {
                    path: self.path.clone(),
                    entry: format!("parent {}", parent),
                });
            }
            self.root_mut().remove_children_named("parent");
        }

        let parent_element = Element::new("parent")
            .with_child(Element::leaf("groupId", parent.group_id.as_str()))
            .with_child(Element::leaf("artifactId", parent.artifact_id.as_str()))
            .with_child(Element::leaf("version", parent.version.as_str()))
            .with_leaf("relativePath", relative_path);

        let mut old_root = std::mem::take(self.root_mut());
        let mut skeleton = Element::new(old_root.name.clone());
        // comments heading the descriptor stay ahead of the parent link
        let leading = old_root
            .children
            .iter()
            .take_while(|c| matches!(c, Node::Comment(_)))
            .count();
        skeleton.children.extend(old_root.children.drain(..leading));
        if let Some(model_version) = old_root.child("modelVersion") {
            skeleton.children.push(model_version.clone().into());
        }
        skeleton.children.push(parent_element.into());
        merge(&mut skeleton, Some(&old_root));
        *self.root_mut() = skeleton;
        Ok(())
    }

    ////// UPDATES //////

    /// Change the groupId of a dependency in both the direct and the managed sections
    pub fn update_dependency_group(
        &mut self,
        dependency: &ArtifactKey,
        new_group_id: &str,
    ) -> Result<bool> {
        let direct = dependency_query("dependencies", dependency)?;
        let managed = dependency_query("dependencyManagement/dependencies", dependency)?;
        let mut updated = self.update_matches(&direct, |d| d.set_child_text("groupId", new_group_id));
        updated |= self.update_matches(&managed, |d| d.set_child_text("groupId", new_group_id));
        Ok(updated)
    }

    /// Change a plugin version in both `build/plugins` and `build/pluginManagement`
    pub fn update_plugin_version(&mut self, plugin: &ArtifactKey, version: &str) -> Result<bool> {
        let direct = plugin_query("build/plugins", plugin)?;
        let managed = plugin_query("build/pluginManagement/plugins", plugin)?;
        let mut updated = self.update_matches(&direct, |p| p.set_child_text("version", version));
        updated |= self.update_matches(&managed, |p| p.set_child_text("version", version));
        Ok(updated)
    }

    /// Version declared for a plugin, looking at `build/plugins` first
    pub fn plugin_version(&self, plugin: &ArtifactKey) -> Result<Option<String>> {
        for container in ["build/plugins", "build/pluginManagement/plugins"] {
            let query = plugin_query(container, plugin)?;
            if let Some(parent) = query.resolve_parent(self.root()) {
                for index in query.select_in(parent) {
                    let version = parent.children[index]
                        .as_element()
                        .and_then(|p| p.child_text("version"));
                    if let Some(version) = version {
                        return Ok(Some(version.to_string()));
                    }
                }
            }
        }
        Ok(None)
    }

    ////// OVERLAY //////

    /// Layer a customized descriptor on top of this freshly generated one
    ///
    /// Uses the default toolchain plugin list; see [`Pom::overlay_details_with`].
    pub fn overlay_details(&mut self, other: &Pom) -> Result<()> {
        let toolchain: Vec<ArtifactKey> = DEFAULT_TOOLCHAIN_PLUGINS
            .iter()
            .map(|(group, artifact)| ArtifactKey::new(*group, *artifact))
            .collect();
        self.overlay_details_with(other, &toolchain)
    }

    /// Layer a customized descriptor on top of this one
    ///
    /// Every top-level section of `other` except the protected ones replaces
    /// the section of the same name here, or is appended when missing here.
    /// Sections `other` lacks are kept. The `toolchain` plugin declarations
    /// are then reset to the ones this descriptor had before the overlay.
    pub fn overlay_details_with(&mut self, other: &Pom, toolchain: &[ArtifactKey]) -> Result<()> {
        let mut saved = Vec::new();
        for plugin in toolchain {
            let query = plugin_query("build/plugins", plugin)?;
            let original = query.resolve_parent(self.root()).and_then(|parent| {
                let index = *query.select_in(parent).first()?;
                parent.children[index].as_element().cloned()
            });
            if let Some(original) = original {
                saved.push((query, original));
            }
        }

        for section in other.root().elements() {
            if PROTECTED_SECTIONS.contains(&section.name.as_str()) {
                continue;
            }
            let root = self.root_mut();
            match root.child_index(&section.name) {
                Some(index) => root.children[index] = section.clone().into(),
                None => root.children.push(section.clone().into()),
            }
        }

        for (query, original) in saved {
            self.reset_plugin(&query, original);
        }
        debug!("Overlaid {} onto {}", other.path.display(), self.path.display());
        Ok(())
    }

    fn reset_plugin(&mut self, query: &PathQuery, original: Element) {
        let existing = query
            .resolve_parent(self.root())
            .map(|parent| query.select_in(parent))
            .unwrap_or_default();

        match existing.split_first() {
            Some((&first, rest)) => {
                if let Some(parent) = query.resolve_parent_mut(self.root_mut()) {
                    parent.children[first] = original.into();
                    parent.remove_indices(rest);
                }
            }
            None => {
                let mut plugins = Element::new("plugins").with_child(original);
                mark_append(&mut plugins);
                let fragment = Element::new(self.root().name.clone())
                    .with_child(Element::new("build").with_child(plugins));
                merge(self.root_mut(), Some(&fragment));
            }
        }
    }

    ////// HELPERS //////

    fn add_entry(
        &mut self,
        query: &PathQuery,
        entry: Element,
        overwrite: bool,
        description: String,
    ) -> Result<()> {
        if !query.select(self.root()).is_empty() {
            if !overwrite {
                return Err(Error::DuplicateEntry {
                    path: self.path.clone(),
                    entry: description,
                });
            }
            query.remove_matches(self.root_mut());
        }

        let mut fragment = entry;
        let mut segments = query.parent_path().iter().rev();
        if let Some(container) = segments.next() {
            fragment = Element::new(container.as_str()).with_child(fragment);
            mark_append(&mut fragment);
        }
        for segment in segments {
            fragment = Element::new(segment.as_str()).with_child(fragment);
        }
        let fragment = Element::new(self.root().name.clone()).with_child(fragment);

        merge(self.root_mut(), Some(&fragment));
        debug!("Added {} to {}", description, self.path.display());
        Ok(())
    }

    fn update_matches(&mut self, query: &PathQuery, update: impl Fn(&mut Element)) -> bool {
        let Some(parent) = query.resolve_parent_mut(self.root_mut()) else {
            return false;
        };
        let indices = query.select_in(parent);
        for &index in &indices {
            if let Some(element) = parent.children[index].as_element_mut() {
                update(element);
            }
        }
        !indices.is_empty()
    }

    fn dependency_element_mut(&mut self, dependency: &ArtifactKey) -> Result<&mut Element> {
        let query = dependency_query("dependencies", dependency)?;
        let path = self.path.clone();
        let missing = || Error::MissingEntry {
            path,
            message: format!("dependency {} is not declared", dependency),
        };
        let Some(parent) = query.resolve_parent_mut(self.root_mut()) else {
            return Err(missing());
        };
        let Some(&index) = query.select_in(parent).first() else {
            return Err(missing());
        };
        match &mut parent.children[index] {
            Node::Element(element) => Ok(element),
            Node::Comment(_) => Err(missing()),
        }
    }
}

fn module_query(module: &str) -> Result<PathQuery> {
    PathQuery::parse(&format!("modules/module[.={}]", literal(module)?))
}

fn dependency_query(container: &str, key: &ArtifactKey) -> Result<PathQuery> {
    PathQuery::parse(&format!(
        "{}/dependency[groupId={} and artifactId={}]",
        container,
        literal(&key.group_id)?,
        literal(&key.artifact_id)?
    ))
}

fn exclusion_query(key: &ArtifactKey) -> Result<PathQuery> {
    PathQuery::parse(&format!(
        "exclusions/exclusion[groupId={} and artifactId={}]",
        literal(&key.group_id)?,
        literal(&key.artifact_id)?
    ))
}

fn plugin_query(container: &str, key: &ArtifactKey) -> Result<PathQuery> {
    PathQuery::parse(&format!(
        "{}/plugin[groupId={} and artifactId={}]",
        container,
        literal(&key.group_id)?,
        literal(&key.artifact_id)?
    ))
}

fn repository_sections(plugin: bool) -> (&'static str, &'static str) {
    if plugin {
        ("pluginRepositories", "pluginRepository")
    } else {
        ("repositories", "repository")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.x</groupId>
  <artifactId>root</artifactId>
  <version>1.0</version>
  <packaging>pom</packaging>
</project>
"#;

    fn root_pom() -> Pom {
        Pom::parse("root/pom.xml", ROOT_POM).unwrap()
    }

    fn module_names(pom: &Pom) -> Vec<String> {
        pom.modules()
    }

    #[test]
    fn test_parse_requires_artifact_id() {
        let err = Pom::parse("pom.xml", "<project><groupId>g</groupId></project>").unwrap_err();
        assert!(matches!(err, Error::MissingEntry { .. }));
    }

    #[test]
    fn test_add_module_scenario() {
        let mut pom = root_pom();
        pom.add_module("bundles", false).unwrap();
        assert_eq!(module_names(&pom), vec!["bundles"]);
        assert!(pom
            .to_xml_string()
            .contains("<modules>\n    <module>bundles</module>\n  </modules>"));

        let err = pom.add_module("bundles", false).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntry { .. }));
        assert_eq!(module_names(&pom), vec!["bundles"]);

        pom.add_module("bundles", true).unwrap();
        assert_eq!(module_names(&pom), vec!["bundles"]);
    }

    #[test]
    fn test_add_modules_in_call_order() {
        let mut pom = root_pom();
        for name in ["c", "a", "b"] {
            pom.add_module(name, false).unwrap();
        }
        assert_eq!(module_names(&pom), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_overwrite_moves_entry_to_end() {
        let mut pom = root_pom();
        pom.add_module("a", false).unwrap();
        pom.add_module("b", false).unwrap();
        pom.add_module("a", true).unwrap();
        assert_eq!(module_names(&pom), vec!["b", "a"]);
    }

    #[test]
    fn test_remove_module() {
        let mut pom = root_pom();
        pom.add_module("a", false).unwrap();
        assert!(pom.remove_module("a").unwrap());
        assert!(!pom.remove_module("a").unwrap());
        assert!(pom.modules().is_empty());
    }

    #[test]
    fn test_add_and_remove_dependency() {
        let mut pom = root_pom();
        let osgi = Dependency::new("org.osgi", "osgi_core")
            .with_version("4.0")
            .with_scope("provided");
        pom.add_dependency(&osgi, false).unwrap();
        pom.add_dependency(&Dependency::new("org.osgi", "compendium"), false)
            .unwrap();
        assert_eq!(pom.dependencies().len(), 2);
        assert_eq!(pom.dependencies()[0], osgi);

        let err = pom
            .add_dependency(&Dependency::new("org.osgi", "osgi_core"), false)
            .unwrap_err();
        assert!(err.is_duplicate());

        assert!(pom.remove_dependency(&osgi.key()).unwrap());
        assert!(!pom.remove_dependency(&osgi.key()).unwrap());
        assert_eq!(pom.dependencies()[0].artifact_id, "compendium");
    }

    #[test]
    fn test_exclusions() {
        let mut pom = root_pom();
        let dependency = ArtifactKey::new("g", "a");
        let exclusion = ArtifactKey::new("x", "y");

        let err = pom.add_exclusion(&dependency, &exclusion, false).unwrap_err();
        assert!(matches!(err, Error::MissingEntry { .. }));
        assert!(!pom.remove_exclusion(&dependency, &exclusion).unwrap());

        pom.add_dependency(&Dependency::new("g", "a"), false).unwrap();
        pom.add_exclusion(&dependency, &exclusion, false).unwrap();
        pom.add_exclusion(&dependency, &ArtifactKey::new("x", "z"), false)
            .unwrap();
        assert!(pom
            .add_exclusion(&dependency, &exclusion, false)
            .unwrap_err()
            .is_duplicate());

        let exclusions = pom.root().descendant("dependencies/dependency/exclusions").unwrap();
        assert_eq!(exclusions.elements().count(), 2);

        assert!(pom.remove_exclusion(&dependency, &exclusion).unwrap());
        let exclusions = pom.root().descendant("dependencies/dependency/exclusions").unwrap();
        assert_eq!(exclusions.elements().count(), 1);
    }

    #[test]
    fn test_set_parent_keeps_leading_comments_first() {
        let mut pom = Pom::parse(
            "core/pom.xml",
            "<project><!-- keep first --><modelVersion>4.0.0</modelVersion>\
             <!-- coordinates --><artifactId>core</artifactId></project>",
        )
        .unwrap();
        pom.set_parent(&Coordinates::new("g", "root", "1"), None, false)
            .unwrap();

        let children = &pom.root().children;
        assert_eq!(children[0], Node::Comment(" keep first ".to_string()));
        assert!(children[1].is_named("modelVersion"));
        assert!(children[2].is_named("parent"));
        assert_eq!(children[3], Node::Comment(" coordinates ".to_string()));
        assert!(children[4].is_named("artifactId"));
        assert_eq!(children.len(), 5);
    }

    #[test]
    fn test_add_repository_matches_differently_spelled_url() {
        let mut pom = root_pom();
        let written = Repository::new("ops4j", "http://Repo.Example.com/maven2/").unwrap();
        pom.add_repository(&written, false, false).unwrap();
        assert!(pom.to_xml_string().contains("<url>http://Repo.Example.com/maven2/</url>"));

        let respelled = Repository::new("mirror", "http://repo.example.com/maven2").unwrap();
        assert!(pom
            .add_repository(&respelled, false, false)
            .unwrap_err()
            .is_duplicate());

        pom.add_repository(&respelled, false, true).unwrap();
        assert_eq!(pom.repositories(false), vec![respelled]);
    }

    #[test]
    fn test_add_repository_matches_id_or_url() {
        let mut pom = root_pom();
        let ops4j = Repository::new("ops4j", "http://repository.ops4j.org/maven2").unwrap();
        pom.add_repository(&ops4j, false, false).unwrap();

        let same_url = Repository::new("other", "http://repository.ops4j.org/maven2").unwrap();
        assert!(pom
            .add_repository(&same_url, false, false)
            .unwrap_err()
            .is_duplicate());

        pom.add_repository(&same_url, false, true).unwrap();
        assert_eq!(pom.repositories(false), vec![same_url.clone()]);
        assert!(pom.repositories(true).is_empty());
        let repositories = pom.root().child("repositories").unwrap();
        assert_eq!(repositories.elements().count(), 1);
        assert_eq!(
            repositories.elements().next().unwrap().child_text("id"),
            Some("other")
        );

        pom.add_repository(&ops4j, true, false).unwrap();
        assert!(pom.root().child("pluginRepositories").is_some());
        assert!(pom.remove_repository("ops4j", true).unwrap());
        assert!(!pom.remove_repository("ops4j", true).unwrap());
    }

    #[test]
    fn test_set_parent_lands_after_model_version() {
        let mut pom = root_pom();
        let parent = Coordinates::new("com.x", "build", "1.0");
        pom.set_parent(&parent, Some("../poms"), false).unwrap();

        assert!(pom.root().children[0].is_named("modelVersion"));
        assert!(pom.root().children[1].is_named("parent"));
        assert_eq!(pom.parent(), Some(parent.clone()));
        assert_eq!(pom.parent_relative_path(), Some("../poms"));
        assert_eq!(pom.artifact_id(), "root");

        let err = pom.set_parent(&parent, None, false).unwrap_err();
        assert!(err.is_duplicate());

        let other = Coordinates::new("com.y", "build", "2.0");
        pom.set_parent(&other, None, true).unwrap();
        assert_eq!(pom.parent(), Some(other));
        assert_eq!(pom.parent_relative_path(), None);
        assert_eq!(pom.root().elements_named("parent").count(), 1);
    }

    #[test]
    fn test_inherited_coordinates() {
        let content = r#"<project>
  <parent><groupId>com.x</groupId><artifactId>root</artifactId><version>2.0</version></parent>
  <artifactId>child</artifactId>
</project>"#;
        let pom = Pom::parse("child/pom.xml", content).unwrap();
        assert_eq!(pom.group_id(), Some("com.x"));
        assert_eq!(pom.version(), Some("2.0"));
        assert_eq!(pom.packaging(), "jar");
        assert_eq!(pom.id(), "com.x:child");
    }

    #[test]
    fn test_update_dependency_group_both_sections() {
        let content = r#"<project>
  <artifactId>a</artifactId>
  <dependencyManagement><dependencies>
    <dependency><groupId>old</groupId><artifactId>lib</artifactId></dependency>
  </dependencies></dependencyManagement>
  <dependencies>
    <dependency><groupId>old</groupId><artifactId>lib</artifactId></dependency>
    <dependency><groupId>old</groupId><artifactId>other</artifactId></dependency>
  </dependencies>
</project>"#;
        let mut pom = Pom::parse("pom.xml", content).unwrap();
        let key = ArtifactKey::new("old", "lib");
        assert!(pom.update_dependency_group(&key, "new").unwrap());
        assert!(!pom.update_dependency_group(&key, "new").unwrap());

        let groups: Vec<_> = pom.dependencies().into_iter().map(|d| d.group_id).collect();
        assert_eq!(groups, vec!["new", "old"]);
        let managed = pom
            .root()
            .descendant("dependencyManagement/dependencies/dependency")
            .unwrap();
        assert_eq!(managed.child_text("groupId"), Some("new"));
    }

    #[test]
    fn test_plugin_version_query_and_update() {
        let content = r#"<project>
  <artifactId>a</artifactId>
  <build>
    <pluginManagement><plugins>
      <plugin><groupId>org.ops4j</groupId><artifactId>maven-pax-plugin</artifactId><version>1.4</version></plugin>
    </plugins></pluginManagement>
    <plugins>
      <plugin><groupId>org.ops4j</groupId><artifactId>maven-pax-plugin</artifactId></plugin>
    </plugins>
  </build>
</project>"#;
        let mut pom = Pom::parse("pom.xml", content).unwrap();
        let pax = ArtifactKey::new("org.ops4j", "maven-pax-plugin");
        assert_eq!(pom.plugin_version(&pax).unwrap().as_deref(), Some("1.4"));

        assert!(pom.update_plugin_version(&pax, "1.5").unwrap());
        assert_eq!(pom.plugin_version(&pax).unwrap().as_deref(), Some("1.5"));
        let direct = pom.root().descendant("build/plugins/plugin").unwrap();
        assert_eq!(direct.child_text("version"), Some("1.5"));

        let missing = ArtifactKey::new("org.apache.felix", "maven-bundle-plugin");
        assert!(!pom.update_plugin_version(&missing, "2.0").unwrap());
        assert_eq!(pom.plugin_version(&missing).unwrap(), None);
    }

    #[test]
    fn test_overlay_details() {
        let template = r#"<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.x</groupId>
  <artifactId>bundle</artifactId>
  <name>template name</name>
  <properties><bundle.symbolicName>com.x.bundle</bundle.symbolicName></properties>
  <build>
    <plugins>
      <plugin><groupId>org.ops4j</groupId><artifactId>maven-pax-plugin</artifactId><version>1.5</version></plugin>
    </plugins>
  </build>
</project>"#;
        let customized = r#"<project>
  <groupId>com.customized</groupId>
  <artifactId>renamed</artifactId>
  <name>custom name</name>
  <description>kept</description>
  <build>
    <plugins>
      <plugin><groupId>org.ops4j</groupId><artifactId>maven-pax-plugin</artifactId><version>0.1</version></plugin>
      <plugin><groupId>org.example</groupId><artifactId>extra</artifactId></plugin>
    </plugins>
  </build>
</project>"#;
        let mut pom = Pom::parse("pom.xml", template).unwrap();
        let other = Pom::parse("old/pom.xml", customized).unwrap();
        pom.overlay_details(&other).unwrap();

        assert_eq!(pom.group_id(), Some("com.x"));
        assert_eq!(pom.artifact_id(), "bundle");
        assert_eq!(pom.name(), Some("custom name"));
        assert_eq!(pom.root().child_text("description"), Some("kept"));
        assert!(pom.root().child("properties").is_some());

        let pax = ArtifactKey::new("org.ops4j", "maven-pax-plugin");
        assert_eq!(pom.plugin_version(&pax).unwrap().as_deref(), Some("1.5"));
        let plugins = pom.root().descendant("build/plugins").unwrap();
        assert_eq!(plugins.elements().count(), 2);
    }

    #[test]
    fn test_set_sections() {
        let mut pom = root_pom();
        pom.set_version("2.0");
        pom.set_name("Root project");
        assert_eq!(pom.version(), Some("2.0"));
        assert_eq!(pom.name(), Some("Root project"));
        assert!(pom.root().children.last().unwrap().is_named("name"));
    }

    #[test]
    fn test_create_and_write_round_trip() {
        let temp = tempfile::TempDir::new().unwrap();
        let coordinates = Coordinates::new("com.x", "root", "1.0");
        let mut pom = Pom::create(temp.path(), &coordinates, "pom");
        pom.add_module("bundles", false).unwrap();
        pom.write().unwrap();

        let reread = Pom::read(temp.path()).unwrap();
        assert_eq!(reread.coordinates(), coordinates);
        assert_eq!(reread.modules(), vec!["bundles"]);
        assert_eq!(reread.path(), temp.path().join(POM_FILE));

        reread.write().unwrap();
        let again = Pom::read(temp.path()).unwrap();
        assert_eq!(again, reread);
    }
}
