//! Route matching logic.
//!
//! # Responsibilities
//! - Resolve each node's absolute path against its parent
//! - Walk the tree depth-first and build the match chain
//! - Return an explicit no-match instead of a silent default
//!
//! # Design Decisions
//! - First match wins in declaration order; no specificity scoring
//! - A wildcard is only tried after every literal and index sibling failed
//! - Literal routes match exactly or as a prefix ending on a `/` boundary
//! - Index routes match exactly only
//! - No regex, no allocation beyond the resolved paths

use serde::Serialize;

use crate::routing::path::normalize;
use crate::routing::tree::RouteNode;

/// One level of a match chain, linked to the level nested inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<C> {
    /// Absolute path this level resolved to.
    pub route_path: String,
    /// Content declared on the matched node.
    pub content: Option<C>,
    /// Deeper match, if the node has children and one of them matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<Box<MatchResult<C>>>,
}

impl<C> MatchResult<C> {
    /// Number of levels from here to the innermost match.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Iterate the levels from outermost to innermost.
    pub fn chain(&self) -> Chain<'_, C> {
        Chain { next: Some(self) }
    }

    /// Innermost level.
    pub fn leaf(&self) -> &MatchResult<C> {
        let mut link = self;
        while let Some(child) = link.child.as_deref() {
            link = child;
        }
        link
    }

    /// Content of the deepest level that declares any.
    pub fn leaf_content(&self) -> Option<&C> {
        self.chain().filter_map(|level| level.content.as_ref()).last()
    }
}

/// Iterator over the levels of a match chain.
pub struct Chain<'m, C> {
    next: Option<&'m MatchResult<C>>,
}

impl<'m, C> Iterator for Chain<'m, C> {
    type Item = &'m MatchResult<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.child.as_deref();
        Some(current)
    }
}

/// Match `pathname` against `nodes` resolved under `base_path`.
///
/// Both paths are normalized first. Returns `None` if no node matches.
pub fn match_routes<C: Clone>(
    nodes: &[RouteNode<C>],
    pathname: &str,
    base_path: &str,
) -> Option<MatchResult<C>> {
    let pathname = normalize(pathname);
    let base_path = normalize(base_path);
    find(nodes, &pathname, &base_path)
}

fn find<C: Clone>(nodes: &[RouteNode<C>], pathname: &str, base_path: &str) -> Option<MatchResult<C>> {
    let ordered = nodes
        .iter()
        .filter(|node| !node.is_wildcard())
        .chain(nodes.iter().filter(|node| node.is_wildcard()));

    for node in ordered {
        let route_path = node.kind().route_path(base_path);
        if !node.kind().matches(pathname, &route_path) {
            continue;
        }

        let child = if node.children().is_empty() {
            None
        } else {
            find(node.children(), pathname, &route_path).map(Box::new)
        };

        return Some(MatchResult {
            route_path,
            content: node.content().cloned(),
            child,
        });
    }

    None
}
