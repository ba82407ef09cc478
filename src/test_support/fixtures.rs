//! Test fixtures for common test scenarios.

use std::path::Path;

use crate::core::Project;

/// Reactor descriptor for a small multi-module build.
pub const ACME_REACTOR: &str = r#"
[root]
group = "org.acme"
artifact = "acme-parent"
version = "1.0"
packaging = "pom"
name = "Acme Parent"
modules = ["core", "acme-maven-plugin"]

[[module]]
group = "org.acme"
artifact = "core"
version = "1.0"
dependencies = [{ group = "org.slf4j", artifact = "slf4j-api", version = "2.0.9" }]

[[module]]
group = "org.acme"
artifact = "acme-maven-plugin"
version = "1.0"
packaging = "maven-plugin"

[[external]]
group = "org.slf4j"
artifact = "slf4j-api"
version = "2.0.9"
"#;

/// A `jar` module at version `1.0`.
pub fn project(group: &str, artifact: &str) -> Project {
    Project::new(group, artifact, "1.0").located_at(&Path::new("/work").join(artifact))
}

/// The aggregating execution root of the acme build.
pub fn origin_project() -> Project {
    Project::new("org.acme", "acme-parent", "1.0")
        .with_packaging("pom")
        .with_name("Acme Parent")
        .with_modules(["core", "acme-maven-plugin"])
        .located_at(Path::new("/work"))
        .execution_root(true)
}
