//! Storefront client-side routing engine.
//!
//! Nested route matching (index and wildcard routes), outlet composition,
//! context propagation down the match chain and history-integrated
//! navigation.

pub mod config;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use navigation::{MemoryHistory, NavigateOptions, NavigationController, Redirect};
pub use routing::{ContextScope, MatchResult, NavLink, RouteNode, RouteTable, RouteTree};
