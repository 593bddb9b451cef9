//! Navigation link activation.
//!
//! Purely presentational: the active state only selects a style class and
//! never influences matching or navigation.

use crate::navigation::controller::{NavigateOptions, NavigationController};
use crate::navigation::history::History;
use crate::routing::path::{is_within, normalize};

/// Class appended to active links.
pub const ACTIVE_CLASS: &str = "active";

/// True when `current` is `target` or lies below it on a `/` boundary.
pub fn is_active(target: &str, current: &str) -> bool {
    let target = normalize(target);
    let current = normalize(current);
    current == target || is_within(&current, &target)
}

/// A navigation link with an active style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    to: String,
    class: String,
    replace: bool,
}

impl NavLink {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            class: String::new(),
            replace: false,
        }
    }

    /// Base class, always present.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Follow by replacing the current history entry.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn href(&self) -> &str {
        &self.to
    }

    pub fn is_active(&self, current: &str) -> bool {
        is_active(&self.to, current)
    }

    /// Base class plus [`ACTIVE_CLASS`] when active.
    pub fn class_name(&self, current: &str) -> String {
        let active = if self.is_active(current) { ACTIVE_CLASS } else { "" };
        format!("{} {}", self.class, active).trim().to_string()
    }

    /// Navigate to the link target. Returns false if already there.
    pub fn follow<C: Clone, H: History>(&self, controller: &mut NavigationController<C, H>) -> bool {
        controller.navigate(&self.to, NavigateOptions { replace: self.replace })
    }
}
