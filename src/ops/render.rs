//! Manifest rendering.
//!
//! The pipeline hands a [`ManifestView`] and a [`TemplateRef`] to a
//! [`ManifestRenderer`] together with an open sink. [`PomRenderer`] is the
//! built-in renderer; it writes a Maven 4.0.0 POM with `quick-xml`.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::core::project::{Developer, License, Scm};
use crate::core::{ManagedDependency, ManagedPlugin, ManifestView};

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Which template to render with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateRef {
    /// The renderer's own template
    #[default]
    Builtin,
    /// A template file
    Resource(PathBuf),
    /// A template fetched from a URL
    Url(Url),
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateRef::Builtin => f.write_str("built-in"),
            TemplateRef::Resource(path) => write!(f, "{}", path.display()),
            TemplateRef::Url(url) => write!(f, "{}", url),
        }
    }
}

/// The templating collaborator.
pub trait ManifestRenderer {
    /// Render `model` into `out`. On success the whole manifest has been written.
    fn render(&self, model: &ManifestView, template: &TemplateRef, out: &mut dyn Write)
        -> Result<()>;
}

/// Errors from the built-in renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported template `{0}`: only the built-in POM template is available")]
    UnsupportedTemplate(String),

    #[error("failed to serialize manifest `{id}`")]
    Serialize {
        id: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("failed to write manifest")]
    Io(#[from] std::io::Error),
}

/// Built-in POM renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomRenderer;

impl PomRenderer {
    /// Render to a string.
    pub fn to_xml(&self, model: &ManifestView) -> Result<String, RenderError> {
        let doc = PomDocument::from(model);
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let serialize_error = |source| RenderError::Serialize {
            id: model.id(),
            source,
        };
        let mut ser = quick_xml::se::Serializer::with_root(&mut xml, Some("project"))
            .map_err(serialize_error)?;
        ser.indent(' ', 2);
        doc.serialize(ser).map_err(serialize_error)?;

        xml.push('\n');
        Ok(xml)
    }
}

impl ManifestRenderer for PomRenderer {
    fn render(
        &self,
        model: &ManifestView,
        template: &TemplateRef,
        out: &mut dyn Write,
    ) -> Result<()> {
        if *template != TemplateRef::Builtin {
            return Err(RenderError::UnsupportedTemplate(template.to_string()).into());
        }

        let xml = self.to_xml(model)?;
        out.write_all(xml.as_bytes()).map_err(RenderError::from)?;
        out.flush().map_err(RenderError::from)?;
        Ok(())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PomDocument<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'static str,
    #[serde(rename = "@xsi:schemaLocation")]
    schema_location: &'static str,

    model_version: &'a str,
    group_id: &'a str,
    artifact_id: &'a str,
    version: &'a str,
    packaging: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<PomLicenses<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scm: Option<PomScm<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    developers: Option<PomDevelopers<'a>>,

    dependency_management: PomDependencyManagement<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<PomBuild<'a>>,
}

#[derive(Serialize)]
struct PomLicenses<'a> {
    license: Vec<PomLicense<'a>>,
}

#[derive(Serialize)]
struct PomLicense<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PomScm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    connection: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    developer_connection: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Serialize)]
struct PomDevelopers<'a> {
    developer: Vec<PomDeveloper<'a>>,
}

#[derive(Serialize)]
struct PomDeveloper<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<PomRoles<'a>>,
}

#[derive(Serialize)]
struct PomRoles<'a> {
    role: &'a [String],
}

#[derive(Serialize)]
struct PomDependencyManagement<'a> {
    dependencies: PomDependencies<'a>,
}

#[derive(Serialize)]
struct PomDependencies<'a> {
    dependency: Vec<PomDependency<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PomDependency<'a> {
    group_id: &'a str,
    artifact_id: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    optional: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PomBuild<'a> {
    plugin_management: PomPluginManagement<'a>,
}

#[derive(Serialize)]
struct PomPluginManagement<'a> {
    plugins: PomPlugins<'a>,
}

#[derive(Serialize)]
struct PomPlugins<'a> {
    plugin: Vec<PomPlugin<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PomPlugin<'a> {
    group_id: &'a str,
    artifact_id: &'a str,
    version: &'a str,
}

impl<'a> From<&'a License> for PomLicense<'a> {
    fn from(l: &'a License) -> Self {
        PomLicense {
            name: l.name.as_deref(),
            url: l.url.as_deref(),
            distribution: l.distribution.as_deref(),
            comments: l.comments.as_deref(),
        }
    }
}

impl<'a> From<&'a Scm> for PomScm<'a> {
    fn from(s: &'a Scm) -> Self {
        PomScm {
            connection: s.connection.as_deref(),
            developer_connection: s.developer_connection.as_deref(),
            url: s.url.as_deref(),
            tag: s.tag.as_deref(),
        }
    }
}

impl<'a> From<&'a Developer> for PomDeveloper<'a> {
    fn from(d: &'a Developer) -> Self {
        PomDeveloper {
            id: d.id.as_deref(),
            name: d.name.as_deref(),
            email: d.email.as_deref(),
            organization: d.organization.as_deref(),
            url: d.url.as_deref(),
            roles: (!d.roles.is_empty()).then_some(PomRoles { role: &d.roles }),
        }
    }
}

impl<'a> From<&'a ManagedDependency> for PomDependency<'a> {
    fn from(d: &'a ManagedDependency) -> Self {
        PomDependency {
            group_id: &d.group,
            artifact_id: &d.artifact,
            version: &d.version,
            scope: d.scope.as_deref(),
            optional: d.optional,
        }
    }
}

impl<'a> From<&'a ManagedPlugin> for PomPlugin<'a> {
    fn from(p: &'a ManagedPlugin) -> Self {
        PomPlugin {
            group_id: &p.group,
            artifact_id: &p.artifact,
            version: &p.version,
        }
    }
}

impl<'a> From<&'a ManifestView> for PomDocument<'a> {
    fn from(m: &'a ManifestView) -> Self {
        PomDocument {
            xmlns: POM_NAMESPACE,
            xmlns_xsi: XSI_NAMESPACE,
            schema_location: POM_SCHEMA_LOCATION,
            model_version: &m.model_version,
            group_id: &m.group,
            artifact_id: &m.artifact,
            version: &m.version,
            packaging: &m.packaging,
            name: m.name.as_deref(),
            description: m.description.as_deref(),
            url: m.url.as_deref(),
            licenses: (!m.licenses.is_empty()).then(|| PomLicenses {
                license: m.licenses.iter().map(PomLicense::from).collect(),
            }),
            scm: m.scm.as_ref().map(PomScm::from),
            developers: (!m.developers.is_empty()).then(|| PomDevelopers {
                developer: m.developers.iter().map(PomDeveloper::from).collect(),
            }),
            dependency_management: PomDependencyManagement {
                dependencies: PomDependencies {
                    dependency: m
                        .dependency_management
                        .iter()
                        .map(PomDependency::from)
                        .collect(),
                },
            },
            build: m.plugin_management.as_ref().map(|plugins| PomBuild {
                plugin_management: PomPluginManagement {
                    plugins: PomPlugins {
                        plugin: plugins.iter().map(PomPlugin::from).collect(),
                    },
                },
            }),
        }
    }
}
