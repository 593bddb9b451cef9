//! Route tree definitions.
//!
//! # Responsibilities
//! - Describe the static route tree (literal, index and wildcard nodes)
//! - Validate structural invariants when a tree is built
//! - Share the live tree between the controller and hot reload
//!
//! # Design Decisions
//! - Node kind is a tagged enum, so "index with a path" cannot be expressed
//! - Validation runs once at construction; matching never fails
//! - Trees are immutable; reload swaps a whole new tree atomically

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use thiserror::Error;

use crate::routing::matcher::{match_routes, MatchResult};
use crate::routing::path::{is_within, join, normalize};

/// Path that marks a catch-all route.
pub const WILDCARD: &str = "*";

/// Errors detected while building a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A node is marked as index and also carries a path.
    #[error("route at {at} declares both `index` and path `{path}`")]
    IndexWithPath { at: String, path: String },

    /// A non-index node has no path.
    #[error("route at {at} has an empty path and is not an index route")]
    EmptyPath { at: String },

    /// A wildcard node declares nested routes.
    #[error("wildcard route at {at} cannot have children")]
    WildcardWithChildren { at: String },

    /// More than one wildcard in the same sibling list.
    #[error("more than one wildcard route in {at}")]
    DuplicateWildcard { at: String },
}

/// How a node relates to its parent's resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum RouteKind {
    /// Absolute if it starts with `/`, otherwise relative to the parent.
    Literal(String),
    /// Matches exactly the parent's resolved path.
    Index,
    /// Matches anything its siblings did not.
    Wildcard,
}

impl RouteKind {
    /// Resolves the absolute path of a node under `base`.
    pub fn route_path(&self, base: &str) -> String {
        match self {
            RouteKind::Index => normalize(base),
            RouteKind::Literal(path) if path.starts_with('/') => normalize(path),
            RouteKind::Literal(path) => join(base, path),
            RouteKind::Wildcard => join(base, WILDCARD),
        }
    }

    /// Returns true if a node of this kind at `route_path` accepts `pathname`.
    ///
    /// Both arguments must already be normalized.
    pub fn matches(&self, pathname: &str, route_path: &str) -> bool {
        match self {
            RouteKind::Wildcard => true,
            RouteKind::Index => pathname == route_path,
            RouteKind::Literal(_) => pathname == route_path || is_within(pathname, route_path),
        }
    }
}

/// One entry of a declared route tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteNode<C> {
    #[serde(flatten)]
    kind: RouteKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<C>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<RouteNode<C>>,
}

impl<C> RouteNode<C> {
    /// A path route. `"*"` yields a wildcard.
    pub fn path(path: impl Into<String>) -> Self {
        let path = path.into();
        let kind = if path == WILDCARD {
            RouteKind::Wildcard
        } else {
            RouteKind::Literal(path)
        };
        Self::with_kind(kind)
    }

    /// An index route.
    pub fn index() -> Self {
        Self::with_kind(RouteKind::Index)
    }

    /// A catch-all route.
    pub fn wildcard() -> Self {
        Self::with_kind(RouteKind::Wildcard)
    }

    fn with_kind(kind: RouteKind) -> Self {
        Self {
            kind,
            content: None,
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: C) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RouteNode<C>>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn children(&self) -> &[RouteNode<C>] {
        &self.children
    }

    pub fn is_index(&self) -> bool {
        self.kind == RouteKind::Index
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == RouteKind::Wildcard
    }
}

/// Collects every structural problem in a sibling list and its descendants.
///
/// `at` labels the list in error messages, e.g. `routes` or
/// `routes[0].children`.
pub fn audit<C>(nodes: &[RouteNode<C>], at: &str) -> Vec<RouteError> {
    let mut issues = Vec::new();
    audit_into(nodes, at, &mut issues);
    issues
}

fn audit_into<C>(nodes: &[RouteNode<C>], at: &str, issues: &mut Vec<RouteError>) {
    if nodes.iter().filter(|node| node.is_wildcard()).count() > 1 {
        issues.push(RouteError::DuplicateWildcard { at: at.to_string() });
    }

    for (i, node) in nodes.iter().enumerate() {
        let node_at = format!("{}[{}]", at, i);
        match &node.kind {
            RouteKind::Literal(path) if path.is_empty() => {
                issues.push(RouteError::EmptyPath { at: node_at.clone() });
            }
            RouteKind::Wildcard if !node.children.is_empty() => {
                issues.push(RouteError::WildcardWithChildren { at: node_at.clone() });
            }
            _ => {}
        }
        audit_into(&node.children, &format!("{}.children", node_at), issues);
    }
}

/// A validated, immutable route tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteTree<C> {
    routes: Vec<RouteNode<C>>,
}

impl<C> RouteTree<C> {
    /// Validate `routes` and freeze them into a tree.
    ///
    /// Fails with the first structural problem found.
    pub fn new(routes: Vec<RouteNode<C>>) -> Result<Self, RouteError> {
        if let Some(err) = audit(&routes, "routes").into_iter().next() {
            return Err(err);
        }
        Ok(Self { routes })
    }

    /// A tree that matches nothing.
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn routes(&self) -> &[RouteNode<C>] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count<C>(nodes: &[RouteNode<C>]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.children)).sum()
        }
        count(&self.routes)
    }
}

impl<C: Clone> RouteTree<C> {
    /// Match `pathname` from the root.
    pub fn resolve(&self, pathname: &str) -> Option<MatchResult<C>> {
        match_routes(&self.routes, pathname, "/")
    }
}

/// Shared handle to the live route tree.
///
/// Readers load a snapshot; a reload replaces the whole tree.
#[derive(Debug)]
pub struct RouteTable<C> {
    current: Arc<ArcSwap<RouteTree<C>>>,
}

impl<C> Clone for RouteTable<C> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<C> RouteTable<C> {
    pub fn new(tree: RouteTree<C>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(tree)),
        }
    }

    /// Current tree snapshot.
    pub fn load(&self) -> Arc<RouteTree<C>> {
        self.current.load_full()
    }

    /// Atomically replace the tree.
    pub fn swap(&self, tree: RouteTree<C>) {
        self.current.store(Arc::new(tree));
        tracing::info!("Route table replaced");
    }
}

impl<C: Clone> RouteTable<C> {
    pub fn resolve(&self, pathname: &str) -> Option<MatchResult<C>> {
        self.current.load().resolve(pathname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_star_is_wildcard() {
        let node: RouteNode<()> = RouteNode::path("*");
        assert!(node.is_wildcard());
        assert_eq!(RouteNode::<()>::path("a").kind(), &RouteKind::Literal("a".into()));
    }

    #[test]
    fn test_route_path_resolution() {
        assert_eq!(RouteKind::Index.route_path("/admin/"), "/admin");
        assert_eq!(RouteKind::Literal("/shop/".into()).route_path("/admin"), "/shop");
        assert_eq!(RouteKind::Literal("orders".into()).route_path("/admin"), "/admin/orders");
        assert_eq!(RouteKind::Literal("a".into()).route_path("/"), "/a");
        assert_eq!(RouteKind::Wildcard.route_path("/admin"), "/admin/*");
    }

    #[test]
    fn test_kind_matching() {
        let literal = RouteKind::Literal("admin".into());
        assert!(literal.matches("/admin", "/admin"));
        assert!(literal.matches("/admin/orders", "/admin"));
        assert!(!literal.matches("/admin2", "/admin"));

        assert!(RouteKind::Index.matches("/admin", "/admin"));
        assert!(!RouteKind::Index.matches("/admin/orders", "/admin"));

        assert!(RouteKind::Wildcard.matches("/anything/at/all", "/*"));
    }

    #[test]
    fn test_empty_literal_rejected() {
        let err = RouteTree::new(vec![RouteNode::<()>::path("")]).unwrap_err();
        assert_eq!(err, RouteError::EmptyPath { at: "routes[0]".into() });
    }

    #[test]
    fn test_nested_errors_are_labelled() {
        let tree = RouteTree::new(vec![RouteNode::<()>::path("admin").with_children(vec![
            RouteNode::index(),
            RouteNode::wildcard().with_children(vec![RouteNode::path("x")]),
        ])]);
        assert_eq!(
            tree.unwrap_err(),
            RouteError::WildcardWithChildren { at: "routes[0].children[1]".into() }
        );
    }

    #[test]
    fn test_audit_collects_everything() {
        let nodes = vec![
            RouteNode::<()>::wildcard(),
            RouteNode::path(""),
            RouteNode::path("*"),
        ];
        let issues = audit(&nodes, "routes");
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&RouteError::DuplicateWildcard { at: "routes".into() }));
        assert!(issues.contains(&RouteError::EmptyPath { at: "routes[1]".into() }));
    }

    #[test]
    fn test_node_count() {
        let tree = RouteTree::new(vec![
            RouteNode::<()>::path("a").with_children(vec![RouteNode::index(), RouteNode::path("b")]),
            RouteNode::wildcard(),
        ])
        .unwrap();
        assert_eq!(tree.node_count(), 4);
        assert!(!tree.is_empty());
        assert!(RouteTree::<()>::empty().is_empty());
    }

    #[test]
    fn test_table_swap() {
        let table = RouteTable::new(
            RouteTree::new(vec![RouteNode::path("old").with_content("Old")]).unwrap(),
        );
        let reader = table.clone();
        assert!(reader.resolve("/old").is_some());

        table.swap(RouteTree::new(vec![RouteNode::path("new").with_content("New")]).unwrap());
        assert!(reader.resolve("/old").is_none());
        assert_eq!(reader.resolve("/new").unwrap().content, Some("New"));
    }

    #[test]
    fn test_tree_json_shape() {
        let tree = RouteTree::new(vec![
            RouteNode::path("a").with_content("A").with_children(vec![
                RouteNode::index().with_content("X"),
                RouteNode::wildcard(),
            ]),
        ])
        .unwrap();

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            serde_json::json!([{
                "kind": "literal",
                "path": "a",
                "content": "A",
                "children": [
                    { "kind": "index", "content": "X" },
                    { "kind": "wildcard" }
                ]
            }])
        );
    }

    #[test]
    fn test_error_display() {
        let err = RouteError::IndexWithPath {
            at: "routes[2]".into(),
            path: "shop".into(),
        };
        assert_eq!(err.to_string(), "route at routes[2] declares both `index` and path `shop`");
    }
}
