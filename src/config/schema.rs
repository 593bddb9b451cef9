//! Configuration schema definitions.
//!
//! This module defines the route file structure. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::navigation::history::DEFAULT_EVENT_CAPACITY;
use crate::routing::tree::{audit, RouteError, RouteNode, RouteTree};

/// Root configuration of a route file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Navigation settings.
    pub navigation: NavigationConfig,

    /// Route tree, outermost level.
    pub routes: Vec<RouteConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Path the in-memory history starts at.
    pub initial_path: String,

    /// Undelivered back/forward notifications kept before resyncing.
    pub event_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// One route as written in a route file.
///
/// Exactly one of `path` and `index` must be meaningful.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct RouteConfig {
    /// Literal path, or `"*"` for a catch-all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Matches the parent's path exactly.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,

    /// Identifier of the content rendered for this route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Nested routes, in match order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    fn to_node(&self, at: &str, issues: &mut Vec<RouteError>) -> RouteNode<String> {
        let path = self.path.as_deref().filter(|path| !path.is_empty());
        let node = match (self.index, path) {
            (true, Some(path)) => {
                issues.push(RouteError::IndexWithPath {
                    at: at.to_string(),
                    path: path.to_string(),
                });
                RouteNode::index()
            }
            (true, None) => RouteNode::index(),
            (false, Some(path)) => RouteNode::path(path),
            // Left to the tree audit, which reports it as an empty path
            (false, None) => RouteNode::path(""),
        };

        let children = build_routes(&self.children, &format!("{}.children", at), issues);
        let node = node.with_children(children);
        match &self.content {
            Some(content) => node.with_content(content.clone()),
            None => node,
        }
    }
}

/// Convert route configs into nodes, recording declaration conflicts.
///
/// Every config yields a node so positions in later audit messages line up.
pub fn build_routes(configs: &[RouteConfig], at: &str, issues: &mut Vec<RouteError>) -> Vec<RouteNode<String>> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| config.to_node(&format!("{}[{}]", at, i), issues))
        .collect()
}

impl RouterConfig {
    /// Every problem in the declared routes.
    pub fn route_issues(&self) -> Vec<RouteError> {
        let mut issues = Vec::new();
        let nodes = build_routes(&self.routes, "routes", &mut issues);
        issues.extend(audit(&nodes, "routes"));
        issues
    }

    /// Build the validated route tree.
    pub fn route_tree(&self) -> Result<RouteTree<String>, RouteError> {
        let mut issues = Vec::new();
        let nodes = build_routes(&self.routes, "routes", &mut issues);
        if let Some(err) = issues.into_iter().next() {
            return Err(err);
        }
        RouteTree::new(nodes)
    }
}
