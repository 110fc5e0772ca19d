//! # Error Handling
//!
//! This module defines the centralized error type for `pax-construct`. It uses
//! the `thiserror` library to create an `Error` enum covering every failure
//! mode of the document editors, the module-tree navigator and the settings
//! loader.
//!
//! ## Taxonomy
//!
//! - **`MalformedQuery`**: a path-query expression does not match the
//!   supported grammar. Query strings are fixed by the calling code, so this
//!   indicates a programming error rather than bad user input.
//! - **`DuplicateEntry`** / **`ExistingInstruction`**: an add or set was
//!   attempted on an entry that already exists without asking for overwrite.
//!   Callers decide whether to surface it or skip.
//! - **`OutsideProjectTree`**: a target directory shares no project ancestor
//!   with the base directory.
//! - **`Document`** / **`Xml`**: reading, parsing or writing a document failed.
//!   Both carry the path of the file involved.
//!
//! Remove operations never produce errors for missing entries; they report a
//! boolean instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pax-construct operations
#[derive(Error, Debug)]
pub enum Error {
    /// A path-query expression could not be parsed.
    #[error("Malformed path query '{query}': {message}")]
    MalformedQuery { query: String, message: String },

    /// An entry with the same key is already declared in the document.
    #[error("Duplicate entry in {}: {entry}", path.display())]
    DuplicateEntry { path: PathBuf, entry: String },

    /// An instruction is already set in the instruction file.
    #[error("Instruction {instruction} already exists in {}", path.display())]
    ExistingInstruction { path: PathBuf, instruction: String },

    /// The requested directory is not part of the project tree.
    #[error("targetDirectory is outside of this project: {}", target.display())]
    OutsideProjectTree { target: PathBuf },

    /// An I/O failure while working on a specific document.
    #[error("Unable to {operation} {}: {source}", path.display())]
    Document {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The XML content of a document is not well formed.
    #[error("XML error in {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },

    /// An entry the operation needs is missing from the document.
    #[error("Missing entry in {}: {message}", path.display())]
    MissingEntry { path: PathBuf, message: String },

    /// An error occurred while parsing the settings file.
    #[error("Settings parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the settings issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Wrap an I/O error with the document and the action that failed.
    pub fn document(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: std::io::Error,
    ) -> Self {
        Error::Document {
            path: path.into(),
            operation,
            source,
        }
    }

    /// True for conflicts the caller may choose to skip.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Error::DuplicateEntry { .. } | Error::ExistingInstruction { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_query() {
        let error = Error::MalformedQuery {
            query: "modules/module".to_string(),
            message: "missing predicate".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed path query"));
        assert!(display.contains("modules/module"));
        assert!(display.contains("missing predicate"));
    }

    #[test]
    fn test_error_display_duplicate_entry() {
        let error = Error::DuplicateEntry {
            path: PathBuf::from("root/pom.xml"),
            entry: "module bundles".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Duplicate entry"));
        assert!(display.contains("root/pom.xml"));
        assert!(display.contains("module bundles"));
        assert!(error.is_duplicate());
    }

    #[test]
    fn test_error_display_existing_instruction() {
        let error = Error::ExistingInstruction {
            path: PathBuf::from("osgi.bnd"),
            instruction: "Export-Package".to_string(),
        };
        assert!(error.is_duplicate());
        assert!(format!("{}", error).contains("Export-Package"));
    }

    #[test]
    fn test_error_display_outside_project() {
        let error = Error::OutsideProjectTree {
            target: PathBuf::from("/elsewhere"),
        };
        let display = format!("{}", error);
        assert!(display.contains("targetDirectory is outside of this project"));
        assert!(!error.is_duplicate());
    }

    #[test]
    fn test_error_document_keeps_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error = Error::document("bundle/pom.xml", "read", io_error);
        let display = format!("{}", error);
        assert!(display.contains("Unable to read"));
        assert!(display.contains("bundle/pom.xml"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "unknown script flavor".to_string(),
            hint: Some("use 'unix' or 'windows'".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Settings parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }
}
