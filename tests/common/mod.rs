//! Shared fixtures for integration tests.

use std::path::PathBuf;

use storefront_router::config::{load_config, RouterConfig};
use storefront_router::navigation::{MemoryHistory, NavigationController};
use storefront_router::routing::{ContextScope, Outlet, RouteTable, Renderer};

/// Path of the bundled storefront route file.
pub fn storefront_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/storefront.toml")
}

pub fn storefront_config() -> RouterConfig {
    load_config(&storefront_file()).unwrap()
}

/// A controller over the storefront routes, starting at `start`.
#[allow(dead_code)]
pub fn storefront(start: &str) -> (MemoryHistory, NavigationController<String, MemoryHistory>) {
    let tree = storefront_config().route_tree().unwrap();
    let history = MemoryHistory::new(start);
    let controller = NavigationController::new(history.clone(), RouteTable::new(tree));
    (history, controller)
}

/// Logged-in admin, handed from the layout to its pages.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
}

/// Renders `Name[outlet]` for layouts and `Name(token)` for pages.
#[allow(dead_code)]
pub struct Markup {
    pub session: Option<Session>,
}

impl Renderer<String, Session> for Markup {
    type Output = String;

    fn render(&mut self, content: &String, outlet: Outlet<'_, String>, context: &ContextScope<'_, Session>) -> String {
        match content.as_str() {
            "AdminLayout" => {
                let session = self.session.clone();
                let inner = outlet.render_with(self, context, session).unwrap_or_default();
                format!("AdminLayout[{}]", inner)
            }
            name if name.ends_with("Layout") => {
                format!("{}[{}]", name, outlet.render(self, context).unwrap_or_default())
            }
            page => {
                let token = context.read().map(|s| s.token.as_str()).unwrap_or("-");
                format!("{}({})", page, token)
            }
        }
    }
}
