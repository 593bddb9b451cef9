//! Outlet resolution and top-down composition.
//!
//! # Responsibilities
//! - Expose to each matched level the subtree nested inside it
//! - Compose the match chain through a host-supplied [`Renderer`]
//! - Carry the context scope from each level into its outlet
//!
//! # Design Decisions
//! - The outlet is data, not placement: the parent's content decides where
//!   its outlet goes by calling [`Outlet::render`]
//! - A level without content renders its outlet in its own place
//! - Rendering is lazy; an outlet that is never rendered costs nothing

use crate::routing::context::ContextScope;
use crate::routing::matcher::MatchResult;

/// Host rendering hook.
///
/// `content` is the payload of the current level. `outlet` is what nests
/// inside it; the implementation renders it wherever its insertion point is.
pub trait Renderer<C, T> {
    type Output;

    fn render(&mut self, content: &C, outlet: Outlet<'_, C>, context: &ContextScope<'_, T>) -> Self::Output;
}

/// The subtree nested inside one matched level.
#[derive(Debug)]
pub struct Outlet<'m, C> {
    child: Option<&'m MatchResult<C>>,
}

impl<C> Clone for Outlet<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Outlet<'_, C> {}

impl<'m, C> Outlet<'m, C> {
    pub fn new(child: Option<&'m MatchResult<C>>) -> Self {
        Self { child }
    }

    /// Nested match link, if any.
    pub fn child(&self) -> Option<&'m MatchResult<C>> {
        self.child
    }

    pub fn is_empty(&self) -> bool {
        self.child.is_none()
    }

    /// Content that will appear in this outlet.
    ///
    /// Content-less levels pass through to the first content below them.
    pub fn content(&self) -> Option<&'m C> {
        self.child
            .and_then(|child| child.chain().find_map(|level| level.content.as_ref()))
    }

    /// Render the nested subtree with the surrounding context.
    pub fn render<T, R>(&self, renderer: &mut R, context: &ContextScope<'_, T>) -> Option<R::Output>
    where
        R: Renderer<C, T>,
    {
        render(self.child, &context.inherit(), renderer)
    }

    /// Render the nested subtree with `value` replacing the surrounding
    /// context. `None` clears it.
    pub fn render_with<T, R>(
        &self,
        renderer: &mut R,
        context: &ContextScope<'_, T>,
        value: Option<T>,
    ) -> Option<R::Output>
    where
        R: Renderer<C, T>,
    {
        render(self.child, &context.provide(value), renderer)
    }
}

impl<C> MatchResult<C> {
    /// Outlet of this level.
    pub fn outlet(&self) -> Outlet<'_, C> {
        Outlet::new(self.child.as_deref())
    }
}

/// Compose a match chain from the outermost level down.
///
/// Returns `None` when nothing matched or no level on the chain has content.
pub fn render<C, T, R>(chain: Option<&MatchResult<C>>, context: &ContextScope<'_, T>, renderer: &mut R) -> Option<R::Output>
where
    R: Renderer<C, T>,
{
    let level = chain?;
    let outlet = level.outlet();
    match &level.content {
        Some(content) => Some(renderer.render(content, outlet, context)),
        None => outlet.render(renderer, context),
    }
}
