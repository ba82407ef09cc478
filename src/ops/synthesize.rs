//! Building the two views of a generated BOM from the origin project.
//!
//! Both functions are pure: they read the origin snapshot and the compiled
//! config and return fresh values.

use std::path::{Path, PathBuf};

use crate::core::coordinate::POM_TYPE;
use crate::core::project::{BuildPaths, POM_FILE_NAME};
use crate::core::{
    BomSpec, BuildableView, CoordinateSet, ManagedDependency, ManagedPlugin, ManifestView, Project,
};

/// Property that keeps a clean step from wiping the generated manifest.
pub const CLEAN_SKIP: &str = "clean.skip";

/// Where the manifest for `artifact_id` is written: `<output dir>/<artifact_id>/pom.xml`.
pub fn manifest_path(origin: &Project, artifact_id: &str) -> PathBuf {
    origin
        .build
        .output_directory
        .join(artifact_id)
        .join(POM_FILE_NAME)
}

/// The render-only view.
///
/// Descriptive metadata comes from `origin`; name and description come from
/// the config. Libraries become dependency-management entries, and plugins a
/// plugin-management section when there is at least one.
pub fn manifest_view(
    origin: &Project,
    spec: &BomSpec,
    libraries: &CoordinateSet,
    plugins: &CoordinateSet,
) -> ManifestView {
    ManifestView {
        model_version: origin.model_version.clone(),
        group: origin.group.clone(),
        artifact: spec.artifact_id.clone(),
        version: origin.version.clone(),
        packaging: POM_TYPE.to_string(),
        name: spec.name.clone(),
        description: spec.description.clone(),
        url: origin.url.clone(),
        licenses: origin.licenses.clone(),
        scm: origin.scm.clone(),
        developers: origin.developers.clone(),
        dependency_management: libraries.iter().map(ManagedDependency::from).collect(),
        plugin_management: (!plugins.is_empty())
            .then(|| plugins.iter().map(ManagedPlugin::from).collect()),
    }
}

/// The executable view, located at `manifest_path`.
pub fn buildable_view(origin: &Project, spec: &BomSpec, manifest_path: &Path) -> BuildableView {
    let bom_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut properties = origin.properties.clone();
    properties.insert(CLEAN_SKIP.to_string(), "true".to_string());
    properties.extend(spec.properties.clone());

    let unit = Project {
        group: origin.group.clone(),
        artifact: spec.artifact_id.clone(),
        version: origin.version.clone(),
        packaging: POM_TYPE.to_string(),
        model_version: origin.model_version.clone(),
        name: spec.name.clone(),
        description: spec.description.clone(),
        url: origin.url.clone(),
        licenses: origin.licenses.clone(),
        scm: origin.scm.clone(),
        developers: origin.developers.clone(),
        parent: origin.parent.clone(),
        profiles: origin.profiles.clone(),
        distribution_management: origin.distribution_management.clone(),
        properties,
        modules: Vec::new(),
        dependencies: Vec::new(),
        file: manifest_path.to_path_buf(),
        build: BuildPaths {
            output_directory: bom_dir.join("target"),
            directory: bom_dir,
        },
        execution_root: false,
    };

    BuildableView::new(unit)
}
