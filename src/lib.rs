//! # pax-construct Library
//!
//! This library scaffolds and edits multi-module OSGi bundle projects made of
//! Maven-style project descriptors (`pom.xml`) and Bnd instruction files
//! (`osgi.bnd`). It is used by the `pax-construct` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use pax_construct::pom::{Dependency, Pom};
//!
//! let mut pom = Pom::parse(
//!     "pom.xml",
//!     "<project><artifactId>root</artifactId><packaging>pom</packaging></project>",
//! )
//! .unwrap();
//!
//! pom.add_module("bundles", false).unwrap();
//! pom.add_dependency(&"org.osgi:osgi_core:4.0:provided".parse::<Dependency>().unwrap(), false)
//!     .unwrap();
//!
//! // adding the same module twice without overwrite is refused
//! assert!(pom.add_module("bundles", false).is_err());
//! assert_eq!(pom.modules(), vec!["bundles"]);
//! assert!(pom.to_xml_string().contains("<module>bundles</module>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Document trees (`tree`)**: elements and comments as read from a file,
//!   with the `combine.self` / `combine.children` merge attributes.
//! - **Path queries (`query`)**: `parent/child[key='value' and ...]`
//!   expressions selecting sibling entries, used to detect duplicates and to
//!   remove entries.
//! - **Merging (`merge`)**: override/append tree merge used to insert new
//!   entries at the right place.
//! - **Editors (`pom`, `bnd`)**: round-trip editors that change only what an
//!   operation touches.
//! - **Project layout (`path`, `navigator`, `reactor`, `project`)**: walking
//!   and reshaping the module hierarchy on disk.
//! - **Scripts (`script`)**: replayable command sequences describing a project.

pub mod bnd;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod navigator;
pub mod path;
pub mod pom;
pub mod project;
pub mod query;
pub mod reactor;
pub mod script;
pub mod tree;

#[cfg(test)]
mod path_proptest;
