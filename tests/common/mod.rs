//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = ProjectFixture::new().with_root_pom().with_bundle("bundles/core");
//! fixture.command().arg("tree").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::poms;
    pub use super::ProjectFixture;
}

/// Descriptor and instruction snippets for testing.
#[allow(dead_code)]
pub mod poms {
    /// Root aggregator with a comment and a managed plugin.
    pub const ROOT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- root of the example project -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>

  <groupId>org.example</groupId>
  <artifactId>root</artifactId>
  <version>1.0-SNAPSHOT</version>

  <name>Example project</name>

  <packaging>pom</packaging>

  <!-- shared build setup -->
  <build>
    <pluginManagement>
      <plugins>
        <plugin>
          <groupId>org.apache.felix</groupId>
          <artifactId>maven-bundle-plugin</artifactId>
          <version>1.4.0</version>
        </plugin>
      </plugins>
    </pluginManagement>
  </build>
</project>
"#;

    /// Instruction file with comments and a continued line.
    pub const BND: &str = "# exported API\n\
Export-Package: org.example.api;version=\"1.0\",\\\n org.example.spi\n\
\n\
# internals\n\
Private-Package: org.example.internal\n\
Bundle-Activator: org.example.internal.Activator\n";

    /// Invalid settings for error testing.
    pub const INVALID_SETTINGS: &str = "instruction-wrap-width: [unclosed\n";
}

/// A test fixture that provides a temporary project directory.
#[allow(dead_code)]
pub struct ProjectFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl ProjectFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add the root project descriptor.
    pub fn with_root_pom(self) -> Self {
        self.with_file("pom.xml", poms::ROOT)
    }

    /// Add a bundle below the root, creating and linking the intermediate modules.
    pub fn with_bundle(self, dir: &str) -> Self {
        let target = self.path().join(dir);
        let parent = target.parent().expect("bundle directory has a parent");
        let mut parent_pom = pax_construct::navigator::create_module_tree(self.path(), parent)
            .expect("Failed to create module tree");
        let name = target
            .file_name()
            .expect("bundle directory has a name")
            .to_string_lossy()
            .into_owned();
        parent_pom
            .add_module(&name, false)
            .expect("Failed to link bundle");
        parent_pom.write().expect("Failed to write parent");

        let mut bundle = pax_construct::pom::Pom::create(
            &target,
            &pax_construct::pom::Coordinates::new("org.example", name, "1.0-SNAPSHOT"),
            "bundle",
        );
        bundle
            .set_parent(&parent_pom.coordinates(), None, false)
            .expect("Failed to set parent");
        bundle.write().expect("Failed to write bundle");
        self.with_file(&format!("{}/osgi.bnd", dir), poms::BND)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file of the fixture as a string.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pax-construct");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
