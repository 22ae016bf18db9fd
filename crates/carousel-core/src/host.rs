//! Contracts the engine consumes from its embedding host.
//!
//! The engine never produces item content. It asks the host for slots that
//! are already bound to a position, tells the host where to place them, and
//! hands them back once they scroll out of the window.

use crate::emphasis::Emphasis;
use crate::geometry::{Rect, Size, Viewport};
use crate::mapper::Position;

/// Item count of the backing data set
pub trait DataSource {
    /// Number of positions (N). Re-read on every fill pass.
    fn count(&self) -> usize;
}

/// Source and sink of reusable slots
pub trait SlotProvider<S> {
    /// Return a slot already bound to `position`'s content.
    fn acquire(&mut self, position: Position) -> S;

    /// Take back a slot the engine no longer references.
    fn release(&mut self, slot: S);
}

/// Surface the slots are drawn on
pub trait RenderSurface<S> {
    /// Current viewport dimensions and padding
    fn viewport(&self) -> Viewport;

    /// Natural size of a slot once its content is known
    fn measure(&mut self, slot: &S) -> Size;

    /// Position a slot's content rectangle (insets already applied)
    fn place(&mut self, slot: &mut S, rect: Rect);

    /// Apply scale/alpha/depth to a slot. Hosts without visual emphasis can
    /// keep the default no-op.
    fn apply_emphasis(&mut self, _slot: &mut S, _emphasis: Emphasis) {}
}

/// Everything a carousel needs from its host, bundled for convenience
pub trait CarouselHost<S>: DataSource + SlotProvider<S> + RenderSurface<S> {}

impl<S, T> CarouselHost<S> for T where T: DataSource + SlotProvider<S> + RenderSurface<S> {}
