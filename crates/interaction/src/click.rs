//! Click resolution and per-target handler dispatch.

use crate::raycaster::{nearest, Intersection};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Maps a hit part to the logical object that should receive the click.
///
/// A loaded model is a hierarchy of parts; a click on any part reports the
/// model itself.
pub trait OwnerResolver<T> {
    /// Logical owner of `hit_part`.
    fn resolve_logical_owner(&self, hit_part: &T) -> T;
}

/// Identity resolver for scenes made of flat primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatOwners;

impl<T: Clone> OwnerResolver<T> for FlatOwners {
    fn resolve_logical_owner(&self, hit_part: &T) -> T {
        hit_part.clone()
    }
}

impl<T, F> OwnerResolver<T> for F
where
    F: Fn(&T) -> T,
{
    fn resolve_logical_owner(&self, hit_part: &T) -> T {
        self(hit_part)
    }
}

/// Target of the nearest intersection, in any input order.
///
/// The caller must have re-run the ray test at click time; nothing from the
/// hover state is reused.
pub fn resolve_click<T: Clone>(intersections: &[Intersection<T>]) -> Option<T> {
    nearest(intersections).map(|hit| hit.target.clone())
}

/// Callback invoked with the logical owner that was clicked.
pub type ClickHandler<T> = Box<dyn FnMut(&T)>;

/// Which handler received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDispatch {
    /// A handler registered for the owner ran.
    Handler,
    /// No owner handler; the fallback ran.
    Fallback,
    /// Nothing was registered for the owner.
    Unhandled,
}

/// Result of [`ClickRouter::handle_click`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome<T> {
    /// The part the ray actually hit.
    pub part: T,
    /// Logical owner reported to handlers.
    pub owner: T,
    /// Distance of the hit.
    pub distance: f32,
    /// How the click was routed.
    pub dispatch: ClickDispatch,
}

/// Routes clicks to handlers keyed by target identity.
pub struct ClickRouter<T> {
    handlers: HashMap<T, ClickHandler<T>>,
    fallback: Option<ClickHandler<T>>,
}

impl<T> Default for ClickRouter<T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ClickRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickRouter")
            .field("targets", &self.handlers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl<T: Eq + Hash + Clone> ClickRouter<T> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `target`. Returns true if one was replaced.
    pub fn register(&mut self, target: T, handler: impl FnMut(&T) + 'static) -> bool {
        self.handlers.insert(target, Box::new(handler)).is_some()
    }

    /// Remove the handler for `target`. Returns true if one existed.
    pub fn unregister(&mut self, target: &T) -> bool {
        self.handlers.remove(target).is_some()
    }

    /// Handler for owners without a registered handler.
    pub fn set_fallback(&mut self, handler: impl FnMut(&T) + 'static) {
        self.fallback = Some(Box::new(handler));
    }

    /// Whether `target` has a handler.
    pub fn is_registered(&self, target: &T) -> bool {
        self.handlers.contains_key(target)
    }

    /// Number of registered handlers, excluding the fallback.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no per-target handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke the handler for `owner`.
    pub fn dispatch(&mut self, owner: &T) -> ClickDispatch {
        if let Some(handler) = self.handlers.get_mut(owner) {
            handler(owner);
            ClickDispatch::Handler
        } else if let Some(fallback) = self.fallback.as_mut() {
            fallback(owner);
            ClickDispatch::Fallback
        } else {
            ClickDispatch::Unhandled
        }
    }

    /// Resolve the nearest hit, map it to its logical owner, and dispatch.
    ///
    /// Returns `None` when the click hit nothing.
    pub fn handle_click<R>(
        &mut self,
        intersections: &[Intersection<T>],
        resolver: &R,
    ) -> Option<ClickOutcome<T>>
    where
        R: OwnerResolver<T> + ?Sized,
    {
        let hit = nearest(intersections)?;
        let part = hit.target.clone();
        let owner = resolver.resolve_logical_owner(&part);
        let dispatch = self.dispatch(&owner);
        if dispatch == ClickDispatch::Unhandled {
            tracing::debug!("click on target without handler");
        }
        Some(ClickOutcome {
            part,
            owner,
            distance: hit.distance,
            dispatch,
        })
    }
}
