//! Distance-from-center visual emphasis (scale, alpha, depth).

use serde::Serialize;

/// Visual treatment of one slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emphasis {
    pub scale: f32,
    pub alpha: f32,
    pub depth: f32,
}

impl Default for Emphasis {
    fn default() -> Self {
        Self {
            scale: 1.0,
            alpha: 1.0,
            depth: 0.0,
        }
    }
}

/// Emphasis tuning. Every setter clamps its input to the valid range, so
/// the values read back are always usable as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmphasisSettings {
    min_scale: f32,
    min_alpha: f32,
    max_depth: f32,
    scale_divider: u32,
}

impl Default for EmphasisSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            min_alpha: 1.0,
            max_depth: 0.0,
            scale_divider: 4,
        }
    }
}

impl EmphasisSettings {
    #[inline]
    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    #[inline]
    pub fn min_alpha(&self) -> f32 {
        self.min_alpha
    }

    #[inline]
    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    #[inline]
    pub fn scale_divider(&self) -> u32 {
        self.scale_divider
    }

    pub fn set_min_scale(&mut self, value: f32) {
        self.min_scale = clamp_unit("min_scale", value);
    }

    pub fn set_min_alpha(&mut self, value: f32) {
        self.min_alpha = clamp_unit("min_alpha", value);
    }

    pub fn set_max_depth(&mut self, value: f32) {
        let clamped = if value.is_nan() { 0.0 } else { value.max(0.0) };
        if clamped != value {
            tracing::warn!("max_depth {} out of range, using {}", value, clamped);
        }
        self.max_depth = clamped;
    }

    pub fn set_scale_divider(&mut self, value: i64) {
        let clamped = value.clamp(1, u32::MAX as i64) as u32;
        if clamped as i64 != value {
            tracing::warn!("scale_divider {} out of range, using {}", value, clamped);
        }
        self.scale_divider = clamped;
    }

    /// Emphasis for a slot whose horizontal midpoint is `slot_center`, in a
    /// viewport whose content midpoint is `viewport_center` and whose content
    /// half-width is `half_width`.
    pub fn emphasis_at(&self, slot_center: f32, viewport_center: f32, half_width: f32) -> Emphasis {
        let factor = self.raw_factor(slot_center, viewport_center, half_width);
        Emphasis {
            scale: factor.max(self.min_scale),
            alpha: factor.max(self.min_alpha),
            depth: self.max_depth * factor,
        }
    }

    /// Unclamped-by-minimum emphasis factor in `[0, 1]`
    fn raw_factor(&self, slot_center: f32, viewport_center: f32, half_width: f32) -> f32 {
        if half_width <= 0.0 {
            return 1.0;
        }
        let distance = (viewport_center - slot_center).abs() / self.scale_divider as f32;
        (1.0 - distance / half_width).clamp(0.0, 1.0)
    }
}

fn clamp_unit(name: &str, value: f32) -> f32 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    if clamped != value {
        tracing::warn!("{} {} out of range, using {}", name, value, clamped);
    }
    clamped
}
