//! Smooth scrolling for centering moves
//!
//! A centering request is a pixel distance. Instead of applying it in one
//! step, [`SmoothScroller`] hands it out frame by frame following an easing
//! curve, and the engine feeds each increment through its regular scroll path
//! so edge clamping and slot recycling stay in charge.
//!
//! - `easing` - Pure easing functions (cubic, quintic, exponential)
//! - `timing` - Progress and interpolation helpers
//! - `animator` - The frame-by-frame distance dispenser

pub mod animator;
pub mod easing;
pub mod timing;

pub use animator::SmoothScroller;
