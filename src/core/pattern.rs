//! Coordinate patterns - glob-style include/exclude filters over coordinates.
//!
//! A raw pattern has the shape `group:artifact[:version][:type][:classifier]`.
//! Missing optional fields expand to `*`, so `g:a` and `g:a:*:*:*` select the
//! same artifacts. Matching runs against [`Coordinate::to_match_string`].

use std::fmt;
use std::str::FromStr;

use glob::{MatchOptions, Pattern};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::core::Coordinate;

/// The wildcard token used for omitted fields.
pub const WILDCARD: &str = "*";

/// Pattern that selects every module.
pub const MATCH_ALL: &str = "*:*";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A raw pattern did not fit `group:artifact[:version][:type][:classifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pattern `{pattern}` doesn't match the required format: {reason}")]
pub struct PatternError {
    /// The offending pattern, as written
    pub pattern: String,
    /// What was wrong with it
    pub reason: String,
}

impl PatternError {
    fn new(pattern: &str, reason: impl Into<String>) -> Self {
        PatternError {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// A normalized, compiled coordinate pattern.
#[derive(Debug, Clone)]
pub struct CoordinatePattern {
    raw: String,
    expanded: String,
    glob: Pattern,
}

impl CoordinatePattern {
    /// Parse and expand a raw pattern.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let expanded = expand(raw)?;
        let glob = Pattern::new(&literal_brackets(&expanded))
            .map_err(|e| PatternError::new(raw, format!("invalid wildcard syntax ({})", e.msg)))?;

        Ok(CoordinatePattern {
            raw: raw.to_string(),
            expanded,
            glob,
        })
    }

    /// The pattern as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized 5-field pattern.
    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    /// Check a coordinate against this pattern.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.glob
            .matches_with(&coordinate.to_match_string(), MATCH_OPTIONS)
    }
}

impl PartialEq for CoordinatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.expanded == other.expanded
    }
}

impl Eq for CoordinatePattern {}

impl fmt::Display for CoordinatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for CoordinatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoordinatePattern::parse(s)
    }
}

/// Expand a raw pattern to its 5-field form.
///
/// Fails if the mandatory `group:artifact` prefix is missing, if any field is
/// empty, or if more than five fields are given.
pub fn expand(raw: &str) -> Result<String, PatternError> {
    let fields: Vec<&str> = raw.split(':').collect();

    if fields.len() < 2 {
        return Err(PatternError::new(raw, "expected at least `group:artifact`"));
    }
    if fields.len() > 5 {
        return Err(PatternError::new(
            raw,
            "expected at most `group:artifact:version:type:classifier`",
        ));
    }
    if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
        return Err(PatternError::new(raw, format!("field {} is empty", pos + 1)));
    }

    let mut expanded: Vec<&str> = fields;
    expanded.resize(5, WILDCARD);
    Ok(expanded.join(":"))
}

/// Only `*` and `?` are wildcards, so brackets in version ranges stay literal.
fn literal_brackets(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '[' => escaped.push_str("[[]"),
            ']' => escaped.push_str("[]]"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// An ordered set of compiled patterns.
///
/// An empty set never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<CoordinatePattern>,
}

impl PatternSet {
    /// Create an empty pattern set.
    pub fn new() -> Self {
        PatternSet::default()
    }

    /// Compile a set from raw patterns. Duplicates (after expansion) are dropped.
    pub fn parse<I, S>(raw: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PatternSet::new();
        for r in raw {
            set.push(CoordinatePattern::parse(r.as_ref())?);
        }
        Ok(set)
    }

    /// The set containing only [`MATCH_ALL`].
    pub fn match_all() -> Self {
        PatternSet::parse([MATCH_ALL]).unwrap_or_default()
    }

    /// Add a pattern unless an equivalent one is already present.
    pub fn push(&mut self, pattern: CoordinatePattern) {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// True iff any pattern in the set matches.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.patterns.iter().any(|p| p.matches(coordinate))
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterate over the patterns.
    pub fn iter(&self) -> std::slice::Iter<'_, CoordinatePattern> {
        self.patterns.iter()
    }
}

impl Serialize for PatternSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.patterns.iter().map(|p| p.raw()))
    }
}

/// An include/exclude pair.
///
/// A coordinate passes when it matches `includes` and does not match `excludes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternFilter {
    /// Patterns a coordinate must match
    pub includes: PatternSet,
    /// Patterns a coordinate must not match
    pub excludes: PatternSet,
}

impl PatternFilter {
    /// Build a filter from raw include and exclude patterns.
    pub fn parse<I, E, S>(includes: I, excludes: E) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(PatternFilter {
            includes: PatternSet::parse(includes)?,
            excludes: PatternSet::parse(excludes)?,
        })
    }

    /// Replace empty includes with [`MATCH_ALL`].
    pub fn or_match_all(mut self) -> Self {
        if self.includes.is_empty() {
            self.includes = PatternSet::match_all();
        }
        self
    }

    /// Does the coordinate pass this filter?
    pub fn accepts(&self, coordinate: &Coordinate) -> bool {
        self.includes.matches(coordinate) && !self.excludes.matches(coordinate)
    }
}
