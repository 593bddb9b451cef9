//! Context propagation down the match chain.
//!
//! A scope is the view one nesting level has of the context payload. A
//! level that does not provide a value reads the nearest ancestor's; a
//! level that provides one, even an explicit `None`, shadows it for itself
//! and everything nested below. Scopes borrow their parent, so a sibling's
//! override can never leak sideways.

#[derive(Debug)]
enum Slot<T> {
    Inherit,
    Provided(Option<T>),
}

/// One nesting level's context.
#[derive(Debug)]
pub struct ContextScope<'p, T> {
    parent: Option<&'p ContextScope<'p, T>>,
    slot: Slot<T>,
    depth: usize,
}

impl<T> ContextScope<'static, T> {
    /// Outermost scope, holding no value.
    pub fn root() -> Self {
        Self {
            parent: None,
            slot: Slot::Provided(None),
            depth: 0,
        }
    }

    /// Outermost scope holding `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            parent: None,
            slot: Slot::Provided(Some(value)),
            depth: 0,
        }
    }
}

impl<'p, T> ContextScope<'p, T> {
    /// Nested scope that reads through to this one.
    pub fn inherit(&self) -> ContextScope<'_, T> {
        ContextScope {
            parent: Some(self),
            slot: Slot::Inherit,
            depth: self.depth + 1,
        }
    }

    /// Nested scope that replaces the inherited value.
    pub fn provide(&self, value: Option<T>) -> ContextScope<'_, T> {
        ContextScope {
            parent: Some(self),
            slot: Slot::Provided(value),
            depth: self.depth + 1,
        }
    }

    /// Value visible at this level.
    pub fn read(&self) -> Option<&T> {
        match &self.slot {
            Slot::Provided(value) => value.as_ref(),
            Slot::Inherit => self.parent.and_then(|parent| parent.read()),
        }
    }

    /// True if this level provided its own value.
    pub fn is_provided(&self) -> bool {
        matches!(self.slot, Slot::Provided(_))
    }

    /// Nesting level; the root is 0.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<T> Default for ContextScope<'static, T> {
    fn default() -> Self {
        Self::root()
    }
}
