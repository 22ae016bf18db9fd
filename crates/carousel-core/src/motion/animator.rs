//! Frame-by-frame dispenser for a smooth scroll distance

use std::time::{Duration, Instant};

use super::timing::{lerp_i32, progress_at};
use crate::config::{EasingType, ScrollConfig};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    /// Total signed distance to travel
    distance: i32,
    /// Portion already handed out
    consumed: i32,
    duration: Duration,
    easing: EasingType,
}

/// Smooth scroll controller
///
/// Call [`SmoothScroller::start`] with a pixel distance, then
/// [`SmoothScroller::update_at`] once per frame to get the increment to
/// scroll by. A new `start` replaces the running animation; the caller
/// always acts on the latest target.
#[derive(Debug, Clone, Default)]
pub struct SmoothScroller {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
}

impl SmoothScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Begin travelling `distance` pixels from `now`.
    ///
    /// With smooth scrolling disabled the whole distance is released by the
    /// next update.
    pub fn start(&mut self, distance: i32, now: Instant) {
        if distance == 0 {
            self.animation = None;
            return;
        }
        let duration = if self.config.is_smooth() {
            self.config.animation_duration()
        } else {
            Duration::ZERO
        };
        self.animation = Some(ActiveAnimation {
            start: now,
            distance,
            consumed: 0,
            duration,
            easing: self.config.easing,
        });
    }

    /// Advance to `now` and return the increment to apply this frame.
    pub fn update_at(&mut self, now: Instant) -> i32 {
        let Some(anim) = self.animation.as_mut() else {
            return 0;
        };
        let t = progress_at(anim.start, anim.duration, now);
        let target = if t >= 1.0 {
            anim.distance
        } else {
            lerp_i32(0, anim.distance, anim.easing.apply(t))
        };
        let step = target - anim.consumed;
        anim.consumed = target;
        if t >= 1.0 {
            self.animation = None;
        }
        step
    }

    /// Drop the running animation, leaving the remainder unapplied
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}
