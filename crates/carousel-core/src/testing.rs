//! In-memory host used by the engine tests

use crate::emphasis::Emphasis;
use crate::engine::Carousel;
use crate::geometry::{Rect, Size, Viewport};
use crate::host::{DataSource, RenderSurface, SlotProvider};
use crate::mapper::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeSlot {
    /// Instance identity, stable across reuse
    pub id: usize,
    pub position: Position,
    pub rect: Rect,
    pub emphasis: Emphasis,
}

#[derive(Debug)]
pub struct FakeHost {
    pub count: usize,
    pub viewport: Viewport,
    pub slot_size: Size,
    pub pool: Vec<FakeSlot>,
    pub created: usize,
    pub acquired: usize,
    pub released: usize,
}

impl FakeHost {
    /// `count` items of `slot_width` x 100 in a `width` x 400 viewport
    pub fn new(count: usize, width: i32, slot_width: i32) -> Self {
        Self {
            count,
            viewport: Viewport::new(width, 400),
            slot_size: Size::new(slot_width, 100),
            pool: Vec::new(),
            created: 0,
            acquired: 0,
            released: 0,
        }
    }

    /// Slots handed out and not yet returned
    pub fn outstanding(&self) -> usize {
        self.acquired - self.released
    }
}

impl DataSource for FakeHost {
    fn count(&self) -> usize {
        self.count
    }
}

impl SlotProvider<FakeSlot> for FakeHost {
    fn acquire(&mut self, position: Position) -> FakeSlot {
        self.acquired += 1;
        let mut slot = self.pool.pop().unwrap_or_else(|| {
            self.created += 1;
            FakeSlot {
                id: self.created,
                position,
                rect: Rect::default(),
                emphasis: Emphasis::default(),
            }
        });
        slot.position = position;
        slot
    }

    fn release(&mut self, slot: FakeSlot) {
        self.released += 1;
        assert!(
            self.pool.iter().all(|pooled| pooled.id != slot.id),
            "slot {} released twice",
            slot.id
        );
        self.pool.push(slot);
    }
}

impl RenderSurface<FakeSlot> for FakeHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn measure(&mut self, _slot: &FakeSlot) -> Size {
        self.slot_size
    }

    fn place(&mut self, slot: &mut FakeSlot, rect: Rect) {
        slot.rect = rect;
    }

    fn apply_emphasis(&mut self, slot: &mut FakeSlot, emphasis: Emphasis) {
        slot.emphasis = emphasis;
    }
}

/// Check the structural invariants of an engine driven by `host`.
pub fn assert_consistent(carousel: &Carousel<FakeSlot>, host: &FakeHost) {
    let attached = carousel.attached();
    let count = carousel.item_count();
    let slot_width = carousel.slot_size().width;

    assert!(attached.len() <= carousel.visible_count());
    assert!(carousel.visible_count() <= count);
    assert_eq!(host.outstanding(), attached.len(), "leaked or lost slots");

    let mut positions: Vec<_> = attached.iter().map(|a| a.position()).collect();
    for pair in attached.windows(2) {
        let next = carousel
            .mapper()
            .normalize(pair[0].position() as isize + 1, count);
        assert_eq!(pair[1].position(), next, "window is not contiguous");
        assert_eq!(pair[1].rect().left - pair[0].rect().left, slot_width);
    }
    positions.sort_unstable();
    positions.dedup();
    assert_eq!(positions.len(), attached.len(), "duplicate positions attached");

    for a in attached {
        assert!(a.position() < count);
        assert_eq!(a.slot().position, a.position(), "slot bound to wrong position");
        assert!(host.pool.iter().all(|pooled| pooled.id != a.slot().id));
        let (h, v) = carousel.insets();
        assert_eq!(a.slot().rect, a.rect().inset(h, v));
    }
}
