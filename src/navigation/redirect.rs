//! Declarative redirects.

use crate::navigation::controller::{NavigateOptions, NavigationController};
use crate::navigation::history::History;

/// Navigates once to a target when first evaluated at its mount point.
///
/// Re-evaluation does nothing until the target or the replace flag changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    to: String,
    replace: bool,
    fired: Option<(String, bool)>,
}

impl Redirect {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: false,
            fired: None,
        }
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Point the redirect somewhere else. The next evaluation fires again
    /// if this differs from what already fired.
    pub fn retarget(&mut self, to: impl Into<String>, replace: bool) {
        self.to = to.into();
        self.replace = replace;
    }

    /// Returns true if this evaluation issued a `navigate` call.
    pub fn evaluate<C: Clone, H: History>(&mut self, controller: &mut NavigationController<C, H>) -> bool {
        let key = (self.to.clone(), self.replace);
        if self.fired.as_ref() == Some(&key) {
            return false;
        }

        tracing::debug!(to = %self.to, replace = self.replace, "Redirecting");
        controller.navigate(&self.to, NavigateOptions { replace: self.replace });
        self.fired = Some(key);
        true
    }
}
