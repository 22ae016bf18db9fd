//! Horizontal scrolling and animation stepping

use std::time::Instant;

use super::{Carousel, FillDirection};
use crate::geometry::saturate;
use crate::host::CarouselHost;
use crate::mapper::Position;

impl<S> Carousel<S> {
    /// Scroll by `delta` host units. Positive moves content toward later
    /// positions. Returns the distance actually applied, which is smaller
    /// than `delta` when a bounded carousel hits an edge.
    ///
    /// Any running smooth scroll is cancelled.
    pub fn scroll_by<H>(&mut self, host: &mut H, delta: i32) -> i32
    where
        H: CarouselHost<S>,
    {
        self.scroller.cancel();
        self.apply_scroll(host, delta)
    }

    /// Start a smooth scroll of `distance` from `now`.
    pub fn smooth_scroll_by(&mut self, distance: i32, now: Instant) {
        self.scroller.start(distance, now);
    }

    /// Advance the running smooth scroll to `now`. Returns whether more
    /// frames are pending.
    pub fn tick<H>(&mut self, host: &mut H, now: Instant) -> bool
    where
        H: CarouselHost<S>,
    {
        if !self.scroller.is_animating() {
            return false;
        }
        let step = self.scroller.update_at(now);
        if step != 0 {
            let applied = self.apply_scroll(host, step);
            if applied != step {
                tracing::debug!("Smooth scroll stopped at edge ({} of {})", applied, step);
                self.scroller.cancel();
            }
        }
        self.scroller.is_animating()
    }

    pub(super) fn apply_scroll<H>(&mut self, host: &mut H, delta: i32) -> i32
    where
        H: CarouselHost<S>,
    {
        if self.slots.is_empty() || delta == 0 {
            return 0;
        }
        let applied = if self.is_loop_mode() {
            delta
        } else {
            self.clamp_bounded(delta)
        };
        if applied != 0 {
            let span = self.window.visible_count as i64 * i64::from(self.window.slot_width);
            match applied.checked_neg() {
                Some(dx) if i64::from(applied).abs() <= span => {
                    self.offset_slots(host, dx);
                    self.settle_window(host);
                }
                // Longer than the window: every slot is replaced anyway
                _ => self.reposition(host, i64::from(applied)),
            }
        }
        self.refresh_centered();
        self.apply_emphasis_to_all(host);
        applied
    }

    /// Limit `delta` so the first position never moves right of the center
    /// target and the last never moves left of it.
    fn clamp_bounded(&self, delta: i32) -> i32 {
        let Some(first) = self.slots.first() else {
            return 0;
        };
        if self.content_fits() {
            return 0;
        }
        let slot_width = i64::from(self.window.slot_width);
        let left = i64::from(first.rect.left);
        let first_position_left = left - first.position as i64 * slot_width;
        let last_position_right = left + (self.item_count - first.position) as i64 * slot_width;
        let delta = i64::from(delta);
        let limited = if delta > 0 {
            let room = (last_position_right - i64::from(self.window.right_target())).max(0);
            delta.min(room)
        } else {
            let room = (i64::from(self.window.left_target()) - first_position_left).max(0);
            delta.max(-room)
        };
        saturate(limited)
    }

    /// Move the content by `distance` in one fill pass: whole slots shift
    /// the anchor, the remainder shifts the first slot's left edge.
    fn reposition<H>(&mut self, host: &mut H, distance: i64)
    where
        H: CarouselHost<S>,
    {
        let Some(first) = self.slots.first() else {
            return;
        };
        let slot_width = i64::from(self.window.slot_width);
        let count = self.item_count as i64;
        let columns = distance.div_euclid(slot_width);
        let remainder = distance.rem_euclid(slot_width);
        let raw = first.position as i64 + columns;
        let (anchor, correction) = if self.is_loop_mode() {
            (raw.rem_euclid(count), 0)
        } else {
            let last_anchor = self.item_count.saturating_sub(self.window.visible_count) as i64;
            let anchor = raw.clamp(0, last_anchor);
            (anchor, anchor - raw)
        };
        let left = i64::from(first.rect.left) - remainder + correction * slot_width;
        tracing::trace!("Repositioning by {}: anchor {} left {}", distance, anchor, left);

        self.window.anchor = anchor as Position;
        self.fill(host, FillDirection::None, Some(saturate(left)));
        self.settle_window(host);
    }

    fn offset_slots<H>(&mut self, host: &mut H, dx: i32)
    where
        H: CarouselHost<S>,
    {
        let (horizontal, vertical) = (self.horizontal_inset, self.vertical_inset);
        for attached in &mut self.slots {
            attached.rect = attached.rect.offset_x(dx);
            host.place(&mut attached.slot, attached.rect.inset(horizontal, vertical));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{CarouselConfig, EasingType, ScrollConfig};
    use crate::engine::Carousel;
    use crate::testing::{assert_consistent, FakeHost, FakeSlot};

    fn laid_out(count: usize, width: i32, slot: i32, loop_mode: bool) -> (Carousel<FakeSlot>, FakeHost) {
        let mut host = FakeHost::new(count, width, slot);
        let mut carousel = Carousel::new(
            &CarouselConfig {
                loop_mode,
                ..Default::default()
            },
            ScrollConfig {
                smooth_enabled: true,
                animation_duration_ms: 100,
                easing: EasingType::Linear,
                ..Default::default()
            },
        );
        carousel.layout(&mut host).unwrap();
        (carousel, host)
    }

    #[test]
    fn test_loop_full_cycle_returns_to_start() {
        let (mut carousel, mut host) = laid_out(12, 800, 200, true);
        assert_eq!(carousel.scroll_by(&mut host, 2400), 2400);
        assert_eq!(carousel.centered_position(), 0);
        assert_eq!(carousel.offset_to_center(0).unwrap(), 0);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_loop_wraps_in_both_directions() {
        let (mut carousel, mut host) = laid_out(12, 800, 200, true);
        assert_eq!(carousel.scroll_by(&mut host, 2000), 2000);
        assert_eq!(carousel.centered_position(), 10);
        assert_consistent(&carousel, &host);

        carousel.scroll_by(&mut host, -2000);
        assert_eq!(carousel.centered_position(), 0);
        carousel.scroll_by(&mut host, -2000);
        assert_eq!(carousel.centered_position(), 2);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_loop_scroll_in_small_steps_matches_one_jump() {
        let (mut stepped, mut host_a) = laid_out(12, 800, 200, true);
        let (mut jumped, mut host_b) = laid_out(12, 800, 200, true);
        for _ in 0..37 {
            stepped.scroll_by(&mut host_a, 53);
        }
        jumped.scroll_by(&mut host_b, 37 * 53);

        let a: Vec<_> = stepped.attached().iter().map(|s| (s.position(), s.rect())).collect();
        let b: Vec<_> = jumped.attached().iter().map(|s| (s.position(), s.rect())).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounded_content_that_fits_never_scrolls() {
        let (mut carousel, mut host) = laid_out(3, 900, 300, false);
        assert_eq!(carousel.visible_count(), 3);
        let before: Vec<_> = carousel.attached().iter().map(|s| s.rect()).collect();
        assert_eq!(before[0].left, 0);

        assert_eq!(carousel.scroll_by(&mut host, 250), 0);
        assert_eq!(carousel.scroll_by(&mut host, -250), 0);
        let after: Vec<_> = carousel.attached().iter().map(|s| s.rect()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bounded_clamps_at_leading_edge() {
        let (mut carousel, mut host) = laid_out(5, 800, 200, false);
        assert_eq!(carousel.scroll_by(&mut host, 150), 150);
        assert_eq!(carousel.centered_position(), 1);

        let applied = carousel.scroll_by(&mut host, -400);
        assert_eq!(applied, -150);
        assert!(applied.abs() < 400);
        assert_eq!(carousel.scroll_by(&mut host, -400), 0);
        assert_eq!(carousel.slot_for(0).unwrap().rect().left, 300);
    }

    #[test]
    fn test_bounded_clamps_at_trailing_edge() {
        let (mut carousel, mut host) = laid_out(5, 800, 200, false);
        assert_eq!(carousel.scroll_by(&mut host, 10_000), 800);
        assert_eq!(carousel.centered_position(), 4);
        assert_eq!(carousel.offset_to_center(4).unwrap(), 0);
        assert_eq!(carousel.scroll_by(&mut host, 1), 0);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_bounded_scroll_rolls_window_forward() {
        let (mut carousel, mut host) = laid_out(20, 800, 200, false);
        assert_eq!(carousel.scroll_by(&mut host, 1000), 1000);

        let positions: Vec<_> = carousel.attached().iter().map(|s| s.position()).collect();
        assert_eq!(positions, vec![3, 4, 5, 6, 7]);
        assert_eq!(carousel.attached()[0].rect().left, -100);
        assert_eq!(carousel.centered_position(), 5);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_centered_change_is_reported_once() {
        let (mut carousel, mut host) = laid_out(20, 800, 200, false);
        carousel.take_centered_change();
        carousel.scroll_by(&mut host, 50);
        assert_eq!(carousel.take_centered_change(), None);
        carousel.scroll_by(&mut host, 200);
        assert_eq!(carousel.take_centered_change(), Some(1));
        assert_eq!(carousel.take_centered_change(), None);
    }

    #[test]
    fn test_tick_drives_smooth_scroll_to_completion() {
        let (mut carousel, mut host) = laid_out(20, 800, 200, false);
        let start = std::time::Instant::now();
        carousel.smooth_scroll_to(6, start).unwrap();
        assert!(carousel.is_animating());

        assert!(carousel.tick(&mut host, start + Duration::from_millis(50)));
        assert_eq!(carousel.attached()[0].rect().left, -100);
        assert_eq!(carousel.anchor(), 1);

        assert!(!carousel.tick(&mut host, start + Duration::from_millis(100)));
        assert_eq!(carousel.centered_position(), 6);
        assert_eq!(carousel.offset_to_center(6).unwrap(), 0);
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let (mut carousel, mut host) = laid_out(20, 800, 200, true);
        let start = std::time::Instant::now();
        carousel.smooth_scroll_by(900, start);
        carousel.scroll_by(&mut host, 10);
        assert!(!carousel.is_animating());
        assert!(!carousel.tick(&mut host, start + Duration::from_millis(200)));
    }

    #[test]
    fn test_smooth_scroll_stops_at_bounded_edge() {
        let (mut carousel, mut host) = laid_out(5, 800, 200, false);
        let start = std::time::Instant::now();
        carousel.smooth_scroll_by(-500, start);
        assert!(!carousel.tick(&mut host, start + Duration::from_millis(30)));
        assert_eq!(carousel.centered_position(), 0);
    }

    #[test]
    fn test_large_bounded_set_scrolls_near_the_end() {
        let (mut carousel, mut host) = laid_out(20_000_000, 800, 200, false);
        carousel.jump_to(&mut host, 19_999_999).unwrap();
        assert_eq!(carousel.scroll_by(&mut host, -200), -200);
        assert_eq!(carousel.centered_position(), 19_999_998);
        assert_eq!(carousel.offset_to_center(19_999_998).unwrap(), 0);
        // Four billion units away, pinned to the i32 range
        assert_eq!(carousel.offset_to_center(0).unwrap(), i32::MIN);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_long_bounded_scroll_repositions_in_one_pass() {
        let (mut carousel, mut host) = laid_out(20_000_000, 800, 200, false);
        assert_eq!(carousel.scroll_by(&mut host, i32::MAX), i32::MAX);
        assert_eq!(carousel.centered_position(), 10_737_418);
        assert!(host.acquired < 20, "rolled slot by slot: {}", host.acquired);
        assert_consistent(&carousel, &host);

        // Back past the start clamps at position 0
        assert_eq!(carousel.scroll_by(&mut host, i32::MIN), -i32::MAX);
        assert_eq!(carousel.centered_position(), 0);
        assert_eq!(carousel.offset_to_center(0).unwrap(), 0);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_loop_extreme_deltas_wrap_around_the_ring() {
        let (mut carousel, mut host) = laid_out(12, 800, 200, true);
        assert_eq!(carousel.scroll_by(&mut host, i32::MIN), i32::MIN);
        // 2^31 mod 2400 is 2048, so position 0 moves from 300 to -52
        assert_eq!(carousel.slot_for(0).unwrap().rect().left, -52);
        assert_eq!(carousel.centered_position(), 2);
        assert_consistent(&carousel, &host);

        let acquired = host.acquired;
        assert_eq!(carousel.scroll_by(&mut host, i32::MAX), i32::MAX);
        assert!(host.acquired - acquired <= 10);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_bounded_jump_sized_scroll_matches_small_steps() {
        let (mut stepped, mut host_a) = laid_out(40, 800, 200, false);
        let (mut jumped, mut host_b) = laid_out(40, 800, 200, false);
        for _ in 0..30 {
            stepped.scroll_by(&mut host_a, 111);
        }
        assert_eq!(jumped.scroll_by(&mut host_b, 30 * 111), 30 * 111);

        let a: Vec<_> = stepped.attached().iter().map(|s| (s.position(), s.rect())).collect();
        let b: Vec<_> = jumped.attached().iter().map(|s| (s.position(), s.rect())).collect();
        assert_eq!(a, b);
        assert_consistent(&jumped, &host_b);
    }
}
