//! Offline resolver over an in-memory dependency graph.
//!
//! Nodes are artifact coordinates, edges are declared dependencies carrying the
//! declared scope and optional flag. Transitive closure follows the usual Maven
//! rules:
//!
//! - every direct dependency is included with its declared scope
//! - a dependency's own `compile`/`runtime` dependencies are inherited; `test`,
//!   `provided` and `system` dependencies are not
//! - optional dependencies are not inherited
//! - nearest declaration wins when the same artifact appears in two versions

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use petgraph::Direction;
use serde::Deserialize;

use crate::core::{Coordinate, Project};
use crate::resolver::{DependencyResolver, ResolutionRequest, ResolveError};

const COMPILE: &str = "compile";
const RUNTIME: &str = "runtime";

/// Edge payload: how the dependency was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeclaredEdge {
    scope: Option<String>,
    optional: bool,
}

/// An artifact outside the run together with its declared dependencies.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalArtifact {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub dependencies: Vec<Coordinate>,
}

/// Transitive resolution over a fixed graph.
#[derive(Debug, Default)]
pub struct GraphResolver {
    graph: DiGraph<Coordinate, DeclaredEdge>,
    nodes: HashMap<Coordinate, NodeIndex>,
}

impl GraphResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        GraphResolver::default()
    }

    /// Build a resolver from run modules and external artifacts.
    pub fn from_parts(projects: &[Project], externals: &[ExternalArtifact]) -> Self {
        let mut resolver = GraphResolver::new();
        for project in projects {
            resolver.add_artifact(project.artifact(), &project.dependencies);
        }
        for external in externals {
            resolver.add_artifact(external.coordinate.clone(), &external.dependencies);
        }
        resolver
    }

    /// Add an artifact and its declared dependencies.
    ///
    /// Declaring the same artifact twice appends to its dependency list.
    pub fn add_artifact(&mut self, artifact: Coordinate, dependencies: &[Coordinate]) {
        let from = self.node(artifact);
        for dep in dependencies {
            let edge = DeclaredEdge {
                scope: dep.scope.clone(),
                optional: dep.optional,
            };
            let to = self.node(Coordinate {
                scope: None,
                optional: false,
                ..dep.clone()
            });
            self.graph.add_edge(from, to, edge);
        }
    }

    /// Number of known artifacts.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Is the graph empty?
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn node(&mut self, artifact: Coordinate) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(&artifact) {
            return idx;
        }
        let idx = self.graph.add_node(artifact.clone());
        self.nodes.insert(artifact, idx);
        idx
    }

    /// Outgoing edges in declaration order.
    fn declared_edges(&self, node: NodeIndex) -> Vec<EdgeReference<'_, DeclaredEdge>> {
        let mut edges: Vec<_> = self.graph.edges_directed(node, Direction::Outgoing).collect();
        edges.sort_by_key(|e| e.id());
        edges
    }

    fn suggestions(&self, missing: &Coordinate) -> Vec<String> {
        let mut found: Vec<String> = self
            .graph
            .node_weights()
            .filter(|c| c.group == missing.group && c.artifact == missing.artifact)
            .map(|c| c.to_string())
            .collect();
        found.sort();
        found
    }

    /// Fail if a cycle is reachable from `from`. Cycles elsewhere in the graph are ignored.
    fn check_acyclic(&self, from: NodeIndex) -> Result<(), ResolveError> {
        let mut reachable = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(node) = dfs.next(&self.graph) {
            reachable.insert(node);
        }

        let cyclic = tarjan_scc(&self.graph).into_iter().find(|scc| {
            reachable.contains(&scc[0])
                && (scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
        });
        let Some(scc) = cyclic else {
            return Ok(());
        };

        let start = scc[0];
        let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if next == start {
                    let mut chain = vec![node];
                    let mut cur = node;
                    while cur != start {
                        match parents.get(&cur) {
                            Some(&parent) => cur = parent,
                            None => break,
                        }
                        chain.push(cur);
                    }
                    chain.reverse();
                    chain.push(start);

                    let path = chain.iter().map(|&n| self.graph[n].to_string()).collect();
                    return Err(ResolveError::CycleDetected { path });
                }
                if next != start && !parents.contains_key(&next) {
                    parents.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        Err(ResolveError::CycleDetected {
            path: vec![self.graph[start].to_string()],
        })
    }
}

type ConflictKey = (String, String, String, String);

/// Version-less identity used for nearest-wins mediation.
fn conflict_key(c: &Coordinate) -> ConflictKey {
    (
        c.group.clone(),
        c.artifact.clone(),
        c.kind.clone(),
        c.classifier.clone(),
    )
}

/// Scope a transitive dependency ends up with, or None if it is not inherited.
fn inherited_scope(parent: &str, child: &str) -> Option<&'static str> {
    match (parent, child) {
        (COMPILE, COMPILE) => Some(COMPILE),
        (COMPILE, RUNTIME) | (RUNTIME, COMPILE) | (RUNTIME, RUNTIME) => Some(RUNTIME),
        ("test", COMPILE) | ("test", RUNTIME) => Some("test"),
        ("provided", COMPILE) | ("provided", RUNTIME) => Some("provided"),
        _ => None,
    }
}

impl DependencyResolver for GraphResolver {
    fn resolve_transitive(
        &mut self,
        request: &ResolutionRequest<'_>,
    ) -> Result<Vec<Coordinate>, ResolveError> {
        let root = Coordinate {
            scope: None,
            optional: false,
            ..request.artifact.clone()
        };
        let Some(&start) = self.nodes.get(&root) else {
            return Err(ResolveError::NotFound {
                artifact: root.to_string(),
                suggestions: self.suggestions(&root),
            });
        };

        self.check_acyclic(start)?;

        // (group, artifact, type, classifier) already chosen: nearest wins
        let mut chosen: HashSet<ConflictKey> = HashSet::new();
        let mut resolved = Vec::new();
        let mut queue: VecDeque<(NodeIndex, Option<String>)> = VecDeque::new();

        chosen.insert(conflict_key(&self.graph[start]));

        for edge in self.declared_edges(start) {
            let scope = edge
                .weight()
                .scope
                .clone()
                .unwrap_or_else(|| COMPILE.to_string());
            let target = &self.graph[edge.target()];
            let key = conflict_key(target);
            if chosen.insert(key) {
                resolved.push(
                    target
                        .clone()
                        .with_scope(scope.clone())
                        .optional(edge.weight().optional),
                );
                queue.push_back((edge.target(), Some(scope)));
            }
        }

        while let Some((node, scope)) = queue.pop_front() {
            let parent_scope = scope.as_deref().unwrap_or(COMPILE);
            for edge in self.declared_edges(node) {
                if edge.weight().optional {
                    continue;
                }
                let child_scope = edge.weight().scope.as_deref().unwrap_or(COMPILE);
                let Some(scope) = inherited_scope(parent_scope, child_scope) else {
                    continue;
                };
                let target = &self.graph[edge.target()];
                let key = conflict_key(target);
                if chosen.insert(key) {
                    resolved.push(target.clone().with_scope(scope));
                    queue.push_back((edge.target(), Some(scope.to_string())));
                }
            }
        }

        tracing::debug!(
            "resolved {} dependencies for {} ({} remote repositories)",
            resolved.len(),
            request.artifact,
            request.remote_repositories.len()
        );

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn request(artifact: &Coordinate) -> ResolutionRequest<'_> {
        ResolutionRequest {
            artifact,
            local_repository: Path::new("/tmp/repo"),
            remote_repositories: &[],
        }
    }

    fn ids(coords: &[Coordinate]) -> Vec<String> {
        coords.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_direct_and_transitive() {
        let app = Coordinate::new("g", "app", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(app.clone(), &[Coordinate::new("g", "lib", "1")]);
        resolver.add_artifact(
            Coordinate::new("g", "lib", "1"),
            &[Coordinate::new("g", "util", "2")],
        );

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(ids(&deps), vec!["g:lib:1", "g:util:2"]);
        assert_eq!(deps[1].scope.as_deref(), Some("compile"));
    }

    #[test]
    fn test_declaration_order_kept() {
        let app = Coordinate::new("g", "app", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(
            app.clone(),
            &[
                Coordinate::new("g", "zeta", "1"),
                Coordinate::new("g", "alpha", "1"),
            ],
        );

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(ids(&deps), vec!["g:zeta:1", "g:alpha:1"]);
    }

    #[test]
    fn test_test_scope_not_inherited() {
        let app = Coordinate::new("g", "app", "1");
        let lib = Coordinate::new("g", "lib", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(app.clone(), &[lib.clone()]);
        resolver.add_artifact(
            lib,
            &[
                Coordinate::new("junit", "junit", "4.13").with_scope("test"),
                Coordinate::new("g", "opt", "1").optional(true),
                Coordinate::new("g", "rt", "1").with_scope("runtime"),
            ],
        );

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(ids(&deps), vec!["g:lib:1", "g:rt:1"]);
        assert_eq!(deps[1].scope.as_deref(), Some("runtime"));
    }

    #[test]
    fn test_direct_optional_and_test_kept() {
        let app = Coordinate::new("g", "app", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(
            app.clone(),
            &[
                Coordinate::new("junit", "junit", "4.13").with_scope("test"),
                Coordinate::new("g", "opt", "1").optional(true),
            ],
        );

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].scope.as_deref(), Some("test"));
        assert!(deps[1].optional);
    }

    #[test]
    fn test_nearest_wins() {
        let app = Coordinate::new("g", "app", "1");
        let lib = Coordinate::new("g", "lib", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(
            app.clone(),
            &[lib.clone(), Coordinate::new("g", "util", "2")],
        );
        resolver.add_artifact(lib, &[Coordinate::new("g", "util", "1")]);

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(ids(&deps), vec!["g:lib:1", "g:util:2"]);
    }

    #[test]
    fn test_unknown_artifact() {
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(Coordinate::new("g", "core", "1"), &[]);

        let missing = Coordinate::new("g", "core", "2");
        let err = resolver.resolve_transitive(&request(&missing)).unwrap_err();
        match err {
            ResolveError::NotFound { suggestions, .. } => {
                assert_eq!(suggestions, vec!["g:core:1"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_detected() {
        let a = Coordinate::new("g", "a", "1");
        let b = Coordinate::new("g", "b", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(a.clone(), &[b.clone()]);
        resolver.add_artifact(b, &[a.clone()]);

        let err = resolver.resolve_transitive(&request(&a)).unwrap_err();
        assert!(matches!(err, ResolveError::CycleDetected { .. }));
    }

    #[test]
    fn test_unreachable_cycle_is_ignored() {
        let app = Coordinate::new("g", "app", "1");
        let a = Coordinate::new("x", "a", "1");
        let b = Coordinate::new("x", "b", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(app.clone(), &[Coordinate::new("g", "lib", "1")]);
        resolver.add_artifact(a.clone(), &[b.clone()]);
        resolver.add_artifact(b, &[a.clone()]);

        let deps = resolver.resolve_transitive(&request(&app)).unwrap();
        assert_eq!(ids(&deps), vec!["g:lib:1"]);

        // Still reported for an artifact that reaches it
        let err = resolver.resolve_transitive(&request(&a)).unwrap_err();
        assert!(matches!(err, ResolveError::CycleDetected { ref path } if path.len() == 3));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let a = Coordinate::new("g", "a", "1");
        let mut resolver = GraphResolver::new();
        resolver.add_artifact(a.clone(), &[a.clone()]);

        let err = resolver.resolve_transitive(&request(&a)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cycle detected in dependency graph: g:a:1 -> g:a:1"
        );
    }

    #[test]
    fn test_from_parts_uses_packaging_type() {
        let parent = Project::new("g", "parent", "1").with_packaging("pom");
        let core = Project::new("g", "core", "1").with_dependency(Coordinate::new("ext", "x", "3"));
        let resolver = GraphResolver::from_parts(
            &[parent, core.clone()],
            &[ExternalArtifact {
                coordinate: Coordinate::new("ext", "x", "3"),
                dependencies: vec![Coordinate::new("ext", "y", "1")],
            }],
        );
        assert_eq!(resolver.len(), 4);

        let mut resolver = resolver;
        let deps = resolver.resolve_transitive(&request(&core.artifact())).unwrap();
        assert_eq!(ids(&deps), vec!["ext:x:3", "ext:y:1"]);
    }
}
