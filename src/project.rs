//! Operations spanning several documents of a project
//!
//! These touch more than one file and are not transactional. Writes are
//! ordered so that an interrupted operation leaves extra links behind rather
//! than dangling ones: entries are added before anything is moved, and
//! removals come last.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::navigator::create_module_tree;
use crate::path::absolute;
use crate::pom::{pom_file, Pom};
use crate::reactor::collect_modules;
use crate::script::PaxScript;

const CREATE_PROJECT: &str = "pax-create-project";
const CREATE_BUNDLE: &str = "pax-create-bundle";
const ADD_REPOSITORY: &str = "pax-add-repository";
const IMPORT_BUNDLE: &str = "pax-import-bundle";

fn directory_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::OutsideProjectTree {
            target: dir.to_path_buf(),
        })
}

/// Descriptor of the directory above `dir`, if it has one
fn parent_pom(dir: &Path) -> Result<Option<Pom>> {
    match dir.parent() {
        Some(parent) if pom_file(parent).is_file() => Ok(Some(Pom::read(parent)?)),
        _ => Ok(None),
    }
}

/// Move a bundle below another directory of the project
///
/// Intermediate modules of the destination are created as needed, the bundle
/// is linked into its new parent before the directory moves, and it is
/// unlinked from its old parent last. Returns the moved descriptor.
pub fn move_bundle(project_root: &Path, bundle_dir: &Path, destination: &Path) -> Result<Pom> {
    let bundle_dir = absolute(bundle_dir)?;
    let destination = absolute(destination)?;
    let name = directory_name(&bundle_dir)?;
    let new_name = directory_name(&destination)?;

    if destination.exists() {
        return Err(Error::document(
            &destination,
            "move to",
            io::Error::new(io::ErrorKind::AlreadyExists, "destination exists"),
        ));
    }
    // reading first makes sure this is a module before anything changes
    Pom::read(&bundle_dir)?;
    let old_parent = parent_pom(&bundle_dir)?;

    let new_parent_dir = destination
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::OutsideProjectTree {
            target: destination.clone(),
        })?;
    let mut new_parent = create_module_tree(project_root, &new_parent_dir)?;
    match new_parent.add_module(&new_name, false) {
        Ok(()) => new_parent.write()?,
        Err(e) if e.is_duplicate() => {}
        Err(e) => return Err(e),
    }

    fs::rename(&bundle_dir, &destination).map_err(|e| Error::document(&bundle_dir, "move", e))?;

    let mut bundle = Pom::read(&destination)?;
    bundle.set_parent(&new_parent.coordinates(), None, true)?;
    bundle.write()?;

    // the old parent may have been rewritten above, so it is read again
    if let Some(old_parent) = old_parent {
        let mut old_parent = Pom::read(old_parent.base_dir())?;
        if old_parent.remove_module(&name)? {
            old_parent.write()?;
            debug!("Unlinked {} from {}", name, old_parent.id());
        }
    }

    info!("Moved {} to {}", bundle.id(), destination.display());
    Ok(bundle)
}

/// Delete a bundle and every reference to it
///
/// Dependencies on the bundle are dropped from the other modules, the bundle
/// is unlinked from its parent and its directory deleted. Returns the number
/// of descriptors that referenced it as a dependency.
pub fn remove_bundle(project_root: &Path, bundle_dir: &Path) -> Result<usize> {
    let bundle_dir = absolute(bundle_dir)?;
    let bundle = Pom::read(&bundle_dir)?;
    let key = bundle.coordinates().key();
    let name = directory_name(&bundle_dir)?;
    let bundle_path = absolute(bundle.path())?;

    let mut dependents = 0;
    for mut pom in collect_modules(project_root)? {
        if absolute(pom.path())? == bundle_path {
            continue;
        }
        if pom.remove_dependency(&key)? {
            pom.write()?;
            dependents += 1;
            debug!("Dropped dependency {} from {}", key, pom.id());
        }
    }

    if let Some(mut parent) = parent_pom(&bundle_dir)? {
        if parent.remove_module(&name)? {
            parent.write()?;
        }
    }

    fs::remove_dir_all(&bundle_dir).map_err(|e| Error::document(&bundle_dir, "remove", e))?;
    info!("Removed bundle {}", key);
    Ok(dependents)
}

/// Directory of `pom` relative to the project root
fn relative_dir(root: &Path, pom: &Pom) -> Result<PathBuf> {
    let dir = absolute(pom.base_dir())?;
    Ok(match dir.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
        Ok(relative) => relative.to_path_buf(),
        Err(_) => dir,
    })
}

/// Produce a script of tool invocations that recreates the project layout
///
/// The root project is created once, then its repositories, then every
/// bundle in its directory, and finally the imports between bundles.
pub fn clone_project(project_root: &Path, context: &mut RunContext) -> Result<PaxScript> {
    let root = absolute(project_root)?;
    let modules = collect_modules(&root)?;
    let mut script = PaxScript::new();

    let mut bundles = Vec::new();
    for pom in &modules {
        if context.run_once(CREATE_PROJECT) {
            let coordinates = pom.coordinates();
            script
                .call(CREATE_PROJECT)
                .option('g', coordinates.group_id)
                .option('a', coordinates.artifact_id)
                .option('v', coordinates.version);
            for repository in pom.repositories(false) {
                let command = script
                    .call(ADD_REPOSITORY)
                    .option('i', repository.id)
                    .option('u', repository.url);
                if repository.snapshots {
                    command.maven_option("snapshots", "true");
                }
            }
            continue;
        }

        if pom.is_bundle_project() {
            let dir = relative_dir(&root, pom)?;
            let parent_dir = dir.parent().map(Path::to_path_buf).unwrap_or_default();
            let coordinates = pom.coordinates();
            let command = script
                .call(CREATE_BUNDLE)
                .option('p', coordinates.artifact_id.clone())
                .option('v', coordinates.version.clone());
            if let Some(name) = pom.name() {
                command.option('n', name);
            }
            if parent_dir.as_os_str().is_empty() {
                command.target_dir(".");
            } else {
                command.target_dir(parent_dir);
            }
            context.record_bundle(coordinates);
            bundles.push((dir, pom));
        }
    }

    for (dir, pom) in bundles {
        for dependency in pom.dependencies() {
            let key = dependency.key();
            let imported = context.bundles().iter().find(|b| b.key() == key);
            if let Some(imported) = imported {
                script
                    .call(IMPORT_BUNDLE)
                    .option('g', imported.group_id.clone())
                    .option('a', imported.artifact_id.clone())
                    .option('v', imported.version.clone())
                    .target_dir(dir.clone());
            }
        }
    }

    info!("Cloned {} modules into {} commands", modules.len(), script.len());
    Ok(script)
}
