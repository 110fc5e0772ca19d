//! Default values for pax-construct.
//!
//! This module provides centralized file names and constants used across
//! the editors and commands, ensuring consistency and avoiding duplication.

/// Project descriptor file name
pub const POM_FILE: &str = "pom.xml";

/// Bnd instruction file name
pub const BND_FILE: &str = "osgi.bnd";

/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILENAME: &str = ".pax-construct.yaml";

/// Model version written into new descriptors
pub const CHILD_MODEL_VERSION: &str = "4.0.0";

/// Version given to new descriptors whose parent declares none
pub const DEFAULT_VERSION: &str = "1.0-SNAPSHOT";

pub const MAVEN_POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
pub const MAVEN_POM_SCHEMA: &str = "http://maven.apache.org/maven-v4_0_0.xsd";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Build plugins that drive the toolchain and survive a descriptor overlay unchanged
pub const DEFAULT_TOOLCHAIN_PLUGINS: [(&str, &str); 2] = [
    ("org.apache.felix", "maven-bundle-plugin"),
    ("org.ops4j", "maven-pax-plugin"),
];

/// Line length above which regenerated instructions are wrapped
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Instructions whose presence retires the legacy `-exportcontents` directive
pub const PACKAGING_INSTRUCTIONS: [&str; 2] = ["Export-Package", "Private-Package"];

/// Directive only meaningful with the old default instruction template
pub const LEGACY_INSTRUCTION: &str = "-exportcontents";
