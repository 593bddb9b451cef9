//! Navigation controller.
//!
//! # Responsibilities
//! - Own the current location (single writer)
//! - Apply push/replace navigations to the history exactly once
//! - Resynchronize from the history on back/forward
//! - Re-match the route table after every applied change
//! - Broadcast applied changes to interested readers
//!
//! # Design Decisions
//! - Explicitly owned: no global state, any number of controllers coexist
//! - Navigating to the current path is a silent no-op
//! - History mutation and location update happen in one `&mut self` call,
//!   so no reader observes one without the other
//! - The pop subscription lives exactly as long as the controller

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::navigation::history::{History, PopEvent};
use crate::navigation::location::{Location, LocationReader};
use crate::observability::metrics;
use crate::routing::context::ContextScope;
use crate::routing::matcher::MatchResult;
use crate::routing::outlet::{self, Renderer};
use crate::routing::path::normalize;
use crate::routing::tree::RouteTable;

/// Capacity of the route change broadcast.
const CHANGE_CAPACITY: usize = 64;

/// Options for [`NavigationController::navigate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Overwrite the current history entry instead of pushing.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// How a location change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    Push,
    Replace,
    Pop,
}

impl NavigationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationKind::Push => "push",
            NavigationKind::Replace => "replace",
            NavigationKind::Pop => "pop",
        }
    }
}

/// An applied location change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteChange {
    pub from: String,
    pub to: String,
    pub kind: NavigationKind,
}

/// Back/forward registration, released on drop.
#[derive(Debug)]
struct Subscription {
    events: broadcast::Receiver<PopEvent>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!("History subscription released");
    }
}

/// Owns the current location and keeps the match chain in step with it.
pub struct NavigationController<C, H: History> {
    history: H,
    routes: RouteTable<C>,
    location: Arc<ArcSwap<Location>>,
    subscription: Subscription,
    changes: broadcast::Sender<RouteChange>,
    matched: Option<Arc<MatchResult<C>>>,
    revision: u64,
}

impl<C: Clone, H: History> NavigationController<C, H> {
    /// Start at the history's current path and subscribe to its traversals.
    pub fn new(history: H, routes: RouteTable<C>) -> Self {
        let location = Location::new(&history.current_path());
        let subscription = Subscription {
            events: history.subscribe(),
        };
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);

        tracing::debug!(path = %location.pathname(), "Navigation controller starting");

        let mut controller = Self {
            history,
            routes,
            location: Arc::new(ArcSwap::from_pointee(location)),
            subscription,
            changes,
            matched: None,
            revision: 0,
        };
        controller.rematch();
        controller
    }

    /// Normalized current path.
    pub fn current_path(&self) -> String {
        self.location.load().pathname().to_string()
    }

    /// Handle for readers such as links.
    pub fn location(&self) -> LocationReader {
        LocationReader::new(Arc::clone(&self.location))
    }

    /// Navigate to `target`.
    ///
    /// Returns false, touching nothing, when `target` normalizes to the
    /// current path. Otherwise mutates the history exactly once, updates
    /// the location and re-matches.
    pub fn navigate(&mut self, target: &str, options: NavigateOptions) -> bool {
        // Pending traversals must land first so the no-op check is accurate
        self.sync();

        let target = normalize(target);
        if target == self.location.load().pathname() {
            tracing::debug!(path = %target, "Already at target, navigation skipped");
            return false;
        }

        let kind = if options.replace {
            self.history.replace(&target);
            NavigationKind::Replace
        } else {
            self.history.push(&target);
            NavigationKind::Push
        };
        self.apply(target, kind);
        true
    }

    pub fn push(&mut self, target: &str) -> bool {
        self.navigate(target, NavigateOptions::default())
    }

    pub fn replace(&mut self, target: &str) -> bool {
        self.navigate(target, NavigateOptions::replace())
    }

    /// Deliver pending back/forward notifications.
    ///
    /// Each one resynchronizes the location from the history without
    /// pushing. Returns how many changed the location.
    ///
    /// If notifications were dropped, the backlog is discarded and the
    /// location resyncs once to the history's current path.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.subscription.events.try_recv() {
                Ok(event) => applied += usize::from(self.resync(&event.path)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "History notifications dropped, resyncing from history");
                    self.discard_backlog();
                    let current = self.history.current_path();
                    return applied + usize::from(self.resync(&current));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return applied,
            }
        }
    }

    fn discard_backlog(&mut self) {
        while let Ok(_) | Err(TryRecvError::Lagged(_)) = self.subscription.events.try_recv() {}
    }

    /// Move to `path` as a traversal. Returns false if already there.
    fn resync(&mut self, path: &str) -> bool {
        let path = normalize(path);
        if path == self.location.load().pathname() {
            return false;
        }
        self.apply(path, NavigationKind::Pop);
        true
    }

    /// Re-match after the route table was replaced.
    pub fn refresh(&mut self) {
        self.revision += 1;
        self.rematch();
    }

    /// Current match chain.
    pub fn matched(&self) -> Option<&MatchResult<C>> {
        self.matched.as_deref()
    }

    /// Shared snapshot of the current match chain.
    pub fn matched_arc(&self) -> Option<Arc<MatchResult<C>>> {
        self.matched.clone()
    }

    /// Compose the current match chain.
    pub fn render<T, R>(&self, context: &ContextScope<'_, T>, renderer: &mut R) -> Option<R::Output>
    where
        R: Renderer<C, T>,
    {
        outlet::render(self.matched(), context, renderer)
    }

    /// Incremented once per applied change or refresh.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn routes(&self) -> &RouteTable<C> {
        &self.routes
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Register for applied changes.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteChange> {
        self.changes.subscribe()
    }

    fn apply(&mut self, to: String, kind: NavigationKind) {
        let from = self.current_path();
        self.location.store(Arc::new(Location::new(&to)));
        self.revision += 1;
        self.rematch();

        metrics::record_navigation(kind);
        tracing::info!(from = %from, to = %to, kind = kind.as_str(), "Navigated");

        // Nobody listening is fine
        let _ = self.changes.send(RouteChange { from, to, kind });
    }

    fn rematch(&mut self) {
        let path = self.current_path();
        self.matched = self.routes.resolve(&path).map(Arc::new);

        match &self.matched {
            Some(chain) => {
                metrics::record_match_depth(chain.depth());
                tracing::debug!(path = %path, depth = chain.depth(), "Route matched");
            }
            None => {
                metrics::record_unmatched();
                tracing::warn!(path = %path, "No route matched");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::history::MemoryHistory;
    use crate::routing::tree::{RouteNode, RouteTree};

    fn controller(start: &str) -> (MemoryHistory, NavigationController<&'static str, MemoryHistory>) {
        let tree = RouteTree::new(vec![
            RouteNode::path("/").with_content("Storefront"),
            RouteNode::path("shop").with_content("Shop"),
            RouteNode::path("admin").with_content("Admin").with_children(vec![
                RouteNode::index().with_content("Products"),
                RouteNode::path("orders").with_content("Orders"),
            ]),
        ])
        .unwrap();
        let history = MemoryHistory::new(start);
        let controller = NavigationController::new(history.clone(), RouteTable::new(tree));
        (history, controller)
    }

    #[test]
    fn test_initial_location_from_history() {
        let (_, c) = controller("//admin/");
        assert_eq!(c.current_path(), "/admin");
        assert_eq!(c.matched().unwrap().leaf_content(), Some(&"Products"));
        assert_eq!(c.revision(), 0);
    }

    #[test]
    fn test_push_mutates_history_once() {
        let (history, mut c) = controller("/");
        assert!(c.push("/shop/"));
        assert_eq!(history.mutations(), 1);
        assert_eq!(history.current_path(), "/shop");
        assert_eq!(c.current_path(), "/shop");
        assert_eq!(c.matched().unwrap().content, Some("Shop"));
    }

    #[test]
    fn test_duplicate_navigation_is_noop() {
        let (history, mut c) = controller("/");
        let mut changes = c.subscribe();

        assert!(c.navigate("/shop", NavigateOptions::default()));
        assert!(!c.navigate("/shop", NavigateOptions::default()));
        assert!(!c.navigate("//shop/", NavigateOptions::replace()));

        assert_eq!(history.mutations(), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(c.revision(), 1);
        assert_eq!(changes.try_recv().unwrap().to, "/shop");
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let (history, mut c) = controller("/admin");
        assert!(c.replace("/admin/orders"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_path(), "/admin/orders");
        assert_eq!(c.matched().unwrap().leaf_content(), Some(&"Orders"));
    }

    #[test]
    fn test_back_resyncs_without_pushing() {
        let (history, mut c) = controller("/");
        c.push("/shop");
        c.push("/admin");
        let mut changes = c.subscribe();

        assert!(history.back());
        assert_eq!(c.sync(), 1);
        assert_eq!(c.current_path(), "/shop");
        assert_eq!(history.mutations(), 2);
        assert_eq!(history.len(), 3);

        let change = changes.try_recv().unwrap();
        assert_eq!(change.kind, NavigationKind::Pop);
        assert_eq!(change.from, "/admin");
    }

    #[test]
    fn test_navigate_delivers_pending_pop_first() {
        let (history, mut c) = controller("/");
        c.push("/shop");
        history.back();
        // Without syncing first this would be a no-op against a stale "/shop"
        assert!(c.push("/shop"));
        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.index(), 1);
    }

    fn lagging_controller() -> (MemoryHistory, NavigationController<&'static str, MemoryHistory>) {
        let tree = RouteTree::new(vec![RouteNode::wildcard().with_content("Any")]).unwrap();
        let history = MemoryHistory::with_capacity("/", 2);
        let mut controller = NavigationController::new(history.clone(), RouteTable::new(tree));
        controller.push("/a");
        controller.push("/b");
        controller.push("/c");
        (history, controller)
    }

    #[test]
    fn test_lagged_pops_resync_once() {
        let (history, mut c) = lagging_controller();
        let mut changes = c.subscribe();
        let before = c.revision();

        for _ in 0..3 {
            assert!(history.back());
        }
        assert_eq!(c.sync(), 1);

        assert_eq!(c.current_path(), history.current_path());
        assert_eq!(c.current_path(), "/");
        assert_eq!(c.revision(), before + 1);

        let change = changes.try_recv().unwrap();
        assert_eq!(change.from, "/c");
        assert_eq!(change.to, "/");
        assert_eq!(change.kind, NavigationKind::Pop);
        assert!(changes.try_recv().is_err());

        // The backlog is gone; nothing replays later
        assert_eq!(c.sync(), 0);
    }

    #[test]
    fn test_lagged_round_trip_is_silent() {
        let (history, mut c) = lagging_controller();
        let mut changes = c.subscribe();

        for _ in 0..3 {
            assert!(history.back());
        }
        for _ in 0..3 {
            assert!(history.forward());
        }

        assert_eq!(c.sync(), 0);
        assert_eq!(c.current_path(), "/c");
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_unmatched_path() {
        let (_, mut c) = controller("/");
        assert!(c.push("/nowhere"));
        assert!(c.matched().is_none());
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let (history, c) = controller("/");
        assert_eq!(history.listener_count(), 1);
        drop(c);
        assert_eq!(history.listener_count(), 0);
    }

    #[test]
    fn test_refresh_after_swap() {
        let (_, mut c) = controller("/shop");
        c.routes()
            .swap(RouteTree::new(vec![RouteNode::path("shop").with_content("NewShop")]).unwrap());
        assert_eq!(c.matched().unwrap().content, Some("Shop"));

        c.refresh();
        assert_eq!(c.matched().unwrap().content, Some("NewShop"));
        assert_eq!(c.revision(), 1);
    }

    #[test]
    fn test_independent_controllers() {
        let (_, mut a) = controller("/");
        let (_, b) = controller("/");
        a.push("/shop");
        assert_eq!(a.current_path(), "/shop");
        assert_eq!(b.current_path(), "/");
    }
}
