//! Pointer interaction for ray-picked scenes.
//!
//! The scene (or any other hit-testing facility) produces a list of
//! [`Intersection`]s once per frame for the pointer ray. This crate turns
//! those lists into edge-triggered hover transitions and click dispatch.
//!
//! # Example
//!
//! ```rust
//! use raypick_interaction::{ClickRouter, FlatOwners, HoverDetector, HoverTransition, Intersection};
//! use glam::Vec3;
//!
//! let mut hover = HoverDetector::new();
//!
//! // Frame 1: the pointer ray hits target 7.
//! let hits = vec![Intersection::new(7u32, 2.5, Vec3::ZERO)];
//! assert_eq!(hover.update_hover(&hits), HoverTransition::Entered(7));
//!
//! // Frame 2: nothing under the pointer.
//! assert_eq!(hover.update_hover(&[]), HoverTransition::Left(7));
//!
//! // Clicks re-run the ray test and dispatch on the nearest hit.
//! let mut router = ClickRouter::new();
//! router.register(7u32, |_target: &u32| println!("clicked 7"));
//! let outcome = router.handle_click(&hits, &FlatOwners);
//! assert_eq!(outcome.map(|o| o.owner), Some(7));
//! ```

pub mod click;
pub mod hover;
pub mod raycaster;

pub use click::{
    resolve_click, ClickDispatch, ClickHandler, ClickOutcome, ClickRouter, FlatOwners,
    OwnerResolver,
};
pub use hover::{HoverDetector, HoverEvent, HoverPhase, HoverTransition};
pub use raycaster::{
    intersect_triangle, nearest, screen_to_ray, sort_nearest_first, Aabb, Intersection, Ray,
};
