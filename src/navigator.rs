//! Materializing module hierarchies on disk
//!
//! Bundles can be created deep below the project root. Every directory on the
//! way down needs a `pom`-packaged descriptor listing the next directory as a
//! module, otherwise the reactor never reaches the bundle.

use std::path::Path;

use log::{debug, info};

use crate::defaults::DEFAULT_VERSION;
use crate::error::{Error, Result};
use crate::path::relative_path;
use crate::pom::{pom_file, Coordinates, Pom};

/// Packaging of the intermediate descriptors
pub const AGGREGATOR_PACKAGING: &str = "pom";

/// groupId given to a new module below `parent`: the parent's compound id
pub fn derived_group_id(parent: &Pom) -> String {
    match parent.group_id() {
        Some(group) if !group.is_empty() => format!("{}.{}", group, parent.artifact_id()),
        _ => parent.artifact_id().to_string(),
    }
}

/// Coordinates of a new intermediate module named after its directory
fn child_coordinates(parent: &Pom, directory_name: &str) -> Coordinates {
    Coordinates::new(
        derived_group_id(parent),
        directory_name,
        parent.version().unwrap_or(DEFAULT_VERSION),
    )
}

/// Make sure every directory from the project down to `target` has a linked descriptor
///
/// `base` is a directory inside the project. Missing descriptors between the
/// deepest directory shared by `base` and `target` and the target itself are
/// created and linked into their parent's module list. Returns the
/// descriptor of `target`.
///
/// # Errors
///
/// `Error::OutsideProjectTree` when the two directories share no ancestor,
/// or the shared ancestor has no descriptor.
pub fn create_module_tree(base: &Path, target: &Path) -> Result<Pom> {
    let outside = || Error::OutsideProjectTree {
        target: target.to_path_buf(),
    };

    let relative = relative_path(base, target)?.ok_or_else(outside)?;
    if !pom_file(&relative.common).is_file() {
        return Err(outside());
    }

    let mut parent = Pom::read(&relative.common)?;
    for (directory, name) in relative.descend_dirs().iter().zip(&relative.descend) {
        if pom_file(directory).is_file() {
            parent = Pom::read(directory)?;
            continue;
        }

        let coordinates = child_coordinates(&parent, name);
        let mut child = Pom::create(directory, &coordinates, AGGREGATOR_PACKAGING);
        child.set_parent(&parent.coordinates(), None, true)?;

        match parent.add_module(name, false) {
            Ok(()) => parent.write()?,
            Err(e) if e.is_duplicate() => {
                debug!("{} already lists module {}", parent.id(), name)
            }
            Err(e) => return Err(e),
        }
        child.write()?;
        info!("Created module {} in {}", child.id(), directory.display());

        parent = child;
    }

    Ok(parent)
}
