//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(target, replace) / Link follow / Redirect evaluate
//!     → controller.rs (normalize, skip if already there)
//!     → history.rs (push or replace, exactly once)
//!     → location.rs (store new location)
//!     → routing (re-match route table)
//!     → RouteChange broadcast
//!
//! Back/forward (host):
//!     history.rs emits PopEvent
//!     → controller.rs sync() (resync location, no push)
//!     → routing (re-match)
//! ```
//!
//! # Design Decisions
//! - One writer (the controller), lock-free readers (LocationReader)
//! - Navigation is synchronous; each call completes before the next
//! - No cancellation: rapid calls produce a linear history

pub mod controller;
pub mod history;
pub mod location;
pub mod redirect;
pub mod script;

pub use controller::{NavigateOptions, NavigationController, NavigationKind, RouteChange};
pub use history::{History, HistoryEntry, MemoryHistory, PopEvent};
pub use location::{Location, LocationReader};
pub use redirect::Redirect;
