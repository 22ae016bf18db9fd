//! Raw window index to data position mapping.
//!
//! The two variants are the only behavioral difference between a bounded
//! carousel and an endless one; everything else in the engine is shared.

/// Index into the data source, always in `[0, N)` when N > 0
pub type Position = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMapper {
    /// Linear indexing, clamped at the first and last position
    #[default]
    Clamped,
    /// Circular indexing, wrapping in both directions
    Modular,
}

impl PositionMapper {
    pub fn for_loop_mode(loop_mode: bool) -> Self {
        if loop_mode {
            Self::Modular
        } else {
            Self::Clamped
        }
    }

    #[inline]
    pub fn is_loop(&self) -> bool {
        matches!(self, Self::Modular)
    }

    /// Map a raw index onto a valid position.
    ///
    /// Clamped pins out-of-range indices to the nearest edge, Modular wraps
    /// them around the ring. An empty data set always maps to 0.
    pub fn normalize(&self, raw: isize, count: usize) -> Position {
        if count == 0 {
            return 0;
        }
        let n = count as isize;
        match self {
            Self::Clamped => raw.clamp(0, n - 1) as Position,
            Self::Modular => raw.rem_euclid(n) as Position,
        }
    }

    /// Position shown at a raw window index, or `None` when the index lies
    /// past either edge of a clamped data set (rendered as an empty gap).
    pub fn position_at(&self, raw: isize, count: usize) -> Option<Position> {
        if count == 0 {
            return None;
        }
        match self {
            Self::Clamped if raw < 0 || raw >= count as isize => None,
            _ => Some(self.normalize(raw, count)),
        }
    }

    /// Signed number of positions from `from` to `to`.
    ///
    /// In loop mode a distance longer than half the ring is replaced by the
    /// shorter path the other way around.
    pub fn shortest_wrap_delta(&self, from: Position, to: Position, count: usize) -> isize {
        if count == 0 {
            return 0;
        }
        let delta = to as isize - from as isize;
        if !self.is_loop() {
            return delta;
        }
        let n = count as isize;
        let half = n / 2;
        if delta > half {
            delta - n
        } else if delta < -half {
            delta + n
        } else {
            delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modular_wraps_both_directions() {
        let mapper = PositionMapper::Modular;
        assert_eq!(mapper.normalize(-1, 5), 4);
        assert_eq!(mapper.normalize(5, 5), 0);
        assert_eq!(mapper.normalize(-11, 5), 4);
        assert_eq!(mapper.normalize(17, 5), 2);
    }

    #[test]
    fn test_clamped_pins_to_edges() {
        let mapper = PositionMapper::Clamped;
        assert_eq!(mapper.normalize(-3, 5), 0);
        assert_eq!(mapper.normalize(9, 5), 4);
        assert_eq!(mapper.position_at(5, 5), None);
        assert_eq!(mapper.position_at(-1, 5), None);
        assert_eq!(mapper.position_at(3, 5), Some(3));
    }

    #[test]
    fn test_empty_data_source() {
        for mapper in [PositionMapper::Clamped, PositionMapper::Modular] {
            assert_eq!(mapper.normalize(7, 0), 0);
            assert_eq!(mapper.position_at(0, 0), None);
            assert_eq!(mapper.shortest_wrap_delta(0, 3, 0), 0);
        }
    }

    #[test]
    fn test_shortest_wrap_delta() {
        let looped = PositionMapper::Modular;
        assert_eq!(looped.shortest_wrap_delta(10, 0, 12), 2);
        assert_eq!(looped.shortest_wrap_delta(0, 10, 12), -2);
        assert_eq!(looped.shortest_wrap_delta(2, 5, 12), 3);
        assert_eq!(looped.shortest_wrap_delta(0, 6, 12), 6);

        let bounded = PositionMapper::Clamped;
        assert_eq!(bounded.shortest_wrap_delta(10, 0, 12), -10);
        assert_eq!(bounded.shortest_wrap_delta(0, 10, 12), 10);
    }
}
