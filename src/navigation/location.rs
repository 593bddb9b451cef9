//! Current location state.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::routing::link::is_active;
use crate::routing::path::normalize;

/// Where the application currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pathname: String,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            pathname: normalize(path),
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }
}

/// Read-only handle to the controller's location.
///
/// Loads are lock-free snapshots; only the controller stores.
#[derive(Debug, Clone)]
pub struct LocationReader {
    inner: Arc<ArcSwap<Location>>,
}

impl LocationReader {
    pub(crate) fn new(inner: Arc<ArcSwap<Location>>) -> Self {
        Self { inner }
    }

    pub fn load(&self) -> Arc<Location> {
        self.inner.load_full()
    }

    pub fn pathname(&self) -> String {
        self.inner.load().pathname().to_string()
    }

    /// Whether a link to `target` is active right now.
    pub fn is_active(&self, target: &str) -> bool {
        is_active(target, self.inner.load().pathname())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_normalized() {
        assert_eq!(Location::new("//shop/").pathname(), "/shop");
        assert_eq!(Location::new("").pathname(), "/");
    }

    #[test]
    fn test_reader_sees_stores() {
        let cell = Arc::new(ArcSwap::from_pointee(Location::new("/")));
        let reader = LocationReader::new(Arc::clone(&cell));
        assert!(!reader.is_active("/admin"));

        cell.store(Arc::new(Location::new("/admin/orders")));
        assert_eq!(reader.pathname(), "/admin/orders");
        assert!(reader.is_active("/admin"));
    }
}
