//! Artifact coordinates - WHICH artifact (group, artifact, version, type, classifier).
//!
//! A Coordinate identifies a built or resolved artifact. Scope and the optional
//! flag travel with it but do not take part in identity: two coordinates are the
//! same selection member iff their 5-tuple matches.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize, Serializer};

/// Packaging of a Maven plugin module.
pub const PLUGIN_TYPE: &str = "maven-plugin";

/// Packaging of a parent/aggregator module.
pub const POM_TYPE: &str = "pom";

/// Default artifact type when none is declared.
pub const DEFAULT_TYPE: &str = "jar";

/// An artifact coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    /// Group identifier (e.g. `org.slf4j`)
    pub group: String,

    /// Artifact identifier (e.g. `slf4j-api`)
    pub artifact: String,

    /// Resolved version
    pub version: String,

    /// Artifact type (`jar`, `pom`, `maven-plugin`, ...)
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,

    /// Classifier, empty when absent
    #[serde(default)]
    pub classifier: String,

    /// Dependency scope, if any
    #[serde(default)]
    pub scope: Option<String>,

    /// Whether the dependency is optional
    #[serde(default)]
    pub optional: bool,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl Coordinate {
    /// Create a coordinate with the default `jar` type and no classifier.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Coordinate {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            kind: default_type(),
            classifier: String::new(),
            scope: None,
            optional: false,
        }
    }

    /// Set the artifact type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the optional flag.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// The literal 5-field form matched against patterns:
    /// `group:artifact:version:type:classifier`.
    pub fn to_match_string(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.group, self.artifact, self.version, self.kind, self.classifier
        )
    }

    /// The `group:artifact:version` key used to index projects in a run.
    pub fn gav(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Is this a plugin artifact?
    pub fn is_plugin(&self) -> bool {
        self.kind == PLUGIN_TYPE
    }

    /// Is this a parent/aggregator POM?
    pub fn is_pom(&self) -> bool {
        self.kind == POM_TYPE
    }

    fn key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.group,
            &self.artifact,
            &self.version,
            &self.kind,
            &self.classifier,
        )
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if self.kind != DEFAULT_TYPE || !self.classifier.is_empty() {
            write!(f, ":{}", self.kind)?;
        }
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}

/// An insertion-ordered set of coordinates.
///
/// Membership is keyed on the coordinate 5-tuple; iteration order is the order
/// of first insertion, which keeps rendered manifests stable across runs.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSet {
    items: Vec<Coordinate>,
    seen: HashSet<Coordinate>,
}

impl CoordinateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        CoordinateSet::default()
    }

    /// Insert a coordinate. Returns false if an equal coordinate is already present.
    pub fn insert(&mut self, coordinate: Coordinate) -> bool {
        if !self.seen.insert(coordinate.clone()) {
            return false;
        }
        self.items.push(coordinate);
        true
    }

    /// Check membership.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.seen.contains(coordinate)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.items.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the members as a slice.
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.items
    }
}

impl PartialEq for CoordinateSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for CoordinateSet {}

impl Serialize for CoordinateSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.items)
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Coordinate> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut set = CoordinateSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}
