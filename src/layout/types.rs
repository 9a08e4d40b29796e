//! Layout Types
//!
//! Solver options and the per-run shadow state.

use crate::types::{Axis, Sides};

/// Knobs for a layout run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Round rect edges to whole units on write-back.
    ///
    /// Sizing and placement still run in full precision; only the rects
    /// handed back to the tree are snapped.
    pub snap_to_pixels: bool,
}

impl LayoutOptions {
    pub fn snapped() -> Self {
        Self {
            snap_to_pixels: true,
        }
    }
}

/// Shadow node: resolution state for one space during one run.
///
/// Indexed by arena slot. Thrown away (or recycled) after the run; nothing
/// here survives into the next `compute_layout`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct SState {
    pub x: f32,
    pub y: f32,
    pub sx: f32,
    pub sy: f32,
    /// Resolved padding (pass 2).
    pub padding: Sides<f32>,
    /// Resolved gap between flow children (pass 2).
    pub gap: f32,
}

impl SState {
    #[inline]
    pub fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.sx,
            Axis::Y => self.sy,
        }
    }

    #[inline]
    pub fn set_size(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.sx = value,
            Axis::Y => self.sy = value,
        }
    }

    #[inline]
    pub fn pos(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn set_pos(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Size minus padding along `axis`, never negative.
    #[inline]
    pub fn inner(&self, axis: Axis) -> f32 {
        (self.size(axis) - self.padding.along(axis)).max(0.0)
    }

    /// Position of the inner rect's near edge along `axis`.
    #[inline]
    pub fn inner_origin(&self, axis: Axis) -> f32 {
        self.pos(axis) + *self.padding.start(axis)
    }
}
