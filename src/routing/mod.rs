//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Current path (from the navigation controller)
//!     → path.rs (normalize)
//!     → matcher.rs (walk tree.rs, build the match chain)
//!     → outlet.rs (compose levels through the host renderer)
//!     → context.rs (payload flows down the chain, overridable per level)
//!     → Return: composed output, or nothing when no route matched
//!
//! Tree construction (at startup or reload):
//!     RouteNode[] (code) or RouteConfig[] (route file)
//!     → tree.rs (validate invariants, fail fast)
//!     → Freeze as immutable RouteTree
//!     → Publish through RouteTable (atomic swap)
//!
//! Links:
//!     link.rs compares a target with the current path (styling only)
//! ```
//!
//! # Design Decisions
//! - Trees are validated once and immutable afterwards
//! - No regex: exact and `/`-boundary prefix comparisons only
//! - Deterministic: same tree and path always yield the same chain
//! - First match wins in declaration order; wildcards go last

pub mod context;
pub mod link;
pub mod matcher;
pub mod outlet;
pub mod path;
pub mod tree;

pub use context::ContextScope;
pub use link::{is_active, NavLink};
pub use matcher::{match_routes, MatchResult};
pub use outlet::{render, Outlet, Renderer};
pub use path::normalize;
pub use tree::{RouteError, RouteKind, RouteNode, RouteTable, RouteTree};
