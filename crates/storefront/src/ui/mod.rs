//! Small pure UI state machines rendered into pages.
//!
//! These mirror the behavior applied client-side: the server computes the
//! same states for initial render and exposes the configuration as data
//! attributes for the static script to continue from.

pub mod carousel;
pub mod sticky;

pub use carousel::Carousel;
pub use sticky::{Placement, StickyLayout, initial_placement, resolve_placement};
