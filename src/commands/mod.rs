//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `pax-construct` command-line tool. Related subcommands share a file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `pax_construct` library.
//!
//! Editing commands take a `--project` directory (default: the current
//! directory) and refuse to add an entry that already exists unless
//! `--overwrite` is given.

pub mod bundle;
pub mod clone;
pub mod dependency;
pub mod instruction;
pub mod mkdirs;
pub mod module;
pub mod overlay;
pub mod parent;
pub mod plugin;
pub mod repository;
pub mod tree;
