//! Space - the declaration record of one layout node.
//!
//! A Space holds everything the solver reads (direction, positioning, the
//! geometry scalars, padding, gap, alignment) and the one thing it writes:
//! the absolute [`Rect`]. Tree relationships live in
//! [`SpaceTree`](super::SpaceTree), not here.
//!
//! # Example
//!
//! ```
//! use spark_spaces::{Direction, Scalar, Space};
//!
//! let sidebar = Space::new()
//!     .with_direction(Direction::Vertical)
//!     .with_size(Scalar::fraction(1.0), Scalar::relative(1.0))
//!     .with_padding(8.0)
//!     .with_gap(4.0);
//! assert!(sidebar.fit_children().is_empty());
//! ```

use crate::scalar::Scalar;
use crate::types::{Axis, Direction, FitAxes, Positioning, Rect, Sides};

/// One node's layout declaration plus its computed rect.
///
/// # Property Categories
///
/// - **Container**: direction, padding, gap, align_children_x/y
/// - **Item**: positioning, align_self_x/y, enabled
/// - **Geometry**: offset_x/y, size_x/y, extra_size_x/y
/// - **Output**: rect (written by the solver only)
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    /// Optional label for lookups and debugging.
    pub name: Option<String>,

    // =========================================================================
    // CONTAINER PROPERTIES
    // =========================================================================

    /// Main axis for flow children.
    pub direction: Direction,

    /// Padding, resolved against this space's own size.
    pub padding: Sides<Scalar>,

    /// Space between consecutive flow children.
    pub gap: Scalar,

    /// Horizontal placement factor for children (0 = left, 1 = right).
    pub align_children_x: f32,

    /// Vertical placement factor for children (0 = top, 1 = bottom).
    pub align_children_y: f32,

    // =========================================================================
    // ITEM PROPERTIES
    // =========================================================================

    /// Flow (sequential) or Detached (offset-placed).
    pub positioning: Positioning,

    /// Overrides the parent's `align_children_x` for this child.
    pub align_self_x: Option<f32>,

    /// Overrides the parent's `align_children_y` for this child.
    pub align_self_y: Option<f32>,

    /// Disabled spaces and their descendants collapse to `Rect::ZERO`.
    pub enabled: bool,

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    pub offset_x: Scalar,
    pub offset_y: Scalar,

    pub size_x: Scalar,
    pub size_y: Scalar,

    /// Added after base sizing; never part of fraction accounting.
    pub extra_size_x: Scalar,
    pub extra_size_y: Scalar,

    // =========================================================================
    // OUTPUT
    // =========================================================================

    pub(crate) rect: Rect,
}

impl Default for Space {
    fn default() -> Self {
        Self {
            name: None,
            direction: Direction::Horizontal,
            padding: Sides::all(Scalar::ZERO),
            gap: Scalar::ZERO,
            align_children_x: 0.0,
            align_children_y: 0.0,
            positioning: Positioning::Flow,
            align_self_x: None,
            align_self_y: None,
            enabled: true,
            offset_x: Scalar::ZERO,
            offset_y: Scalar::ZERO,
            size_x: Scalar::FILL,
            size_y: Scalar::FILL,
            extra_size_x: Scalar::ZERO,
            extra_size_y: Scalar::ZERO,
            rect: Rect::ZERO,
        }
    }
}

impl Space {
    /// A space that fills its parent on both axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A space with an absolute rectangle, the usual shape of a layout root.
    pub fn fixed(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new()
            .with_offset(x, y)
            .with_size(width, height)
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    /// Shorthand for `with_positioning(Positioning::Detached)`.
    pub fn detached(self) -> Self {
        self.with_positioning(Positioning::Detached)
    }

    pub fn with_offset(mut self, x: impl Into<Scalar>, y: impl Into<Scalar>) -> Self {
        self.offset_x = x.into();
        self.offset_y = y.into();
        self
    }

    pub fn with_size(mut self, x: impl Into<Scalar>, y: impl Into<Scalar>) -> Self {
        self.size_x = x.into();
        self.size_y = y.into();
        self
    }

    pub fn with_size_x(mut self, x: impl Into<Scalar>) -> Self {
        self.size_x = x.into();
        self
    }

    pub fn with_size_y(mut self, y: impl Into<Scalar>) -> Self {
        self.size_y = y.into();
        self
    }

    pub fn with_extra_size(mut self, x: impl Into<Scalar>, y: impl Into<Scalar>) -> Self {
        self.extra_size_x = x.into();
        self.extra_size_y = y.into();
        self
    }

    pub fn with_padding(mut self, padding: impl Into<Sides<Scalar>>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn with_gap(mut self, gap: impl Into<Scalar>) -> Self {
        self.gap = gap.into();
        self
    }

    pub fn with_align_children(mut self, x: f32, y: f32) -> Self {
        self.align_children_x = x;
        self.align_children_y = y;
        self
    }

    pub fn with_align_self(mut self, x: Option<f32>, y: Option<f32>) -> Self {
        self.align_self_x = x;
        self.align_self_y = y;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    // =========================================================================
    // Per-axis access
    // =========================================================================

    #[inline]
    pub fn size(&self, axis: Axis) -> Scalar {
        match axis {
            Axis::X => self.size_x,
            Axis::Y => self.size_y,
        }
    }

    pub fn set_size(&mut self, axis: Axis, size: Scalar) {
        match axis {
            Axis::X => self.size_x = size,
            Axis::Y => self.size_y = size,
        }
    }

    #[inline]
    pub fn extra_size(&self, axis: Axis) -> Scalar {
        match axis {
            Axis::X => self.extra_size_x,
            Axis::Y => self.extra_size_y,
        }
    }

    pub fn set_extra_size(&mut self, axis: Axis, extra: Scalar) {
        match axis {
            Axis::X => self.extra_size_x = extra,
            Axis::Y => self.extra_size_y = extra,
        }
    }

    #[inline]
    pub fn offset(&self, axis: Axis) -> Scalar {
        match axis {
            Axis::X => self.offset_x,
            Axis::Y => self.offset_y,
        }
    }

    pub fn set_offset(&mut self, axis: Axis, offset: Scalar) {
        match axis {
            Axis::X => self.offset_x = offset,
            Axis::Y => self.offset_y = offset,
        }
    }

    #[inline]
    pub fn align_children(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.align_children_x,
            Axis::Y => self.align_children_y,
        }
    }

    #[inline]
    pub fn align_self(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::X => self.align_self_x,
            Axis::Y => self.align_self_y,
        }
    }

    // =========================================================================
    // Derived flags
    // =========================================================================

    /// Axes sized from children (declared `Auto`).
    pub fn fit_children(&self) -> FitAxes {
        let mut fit = FitAxes::empty();
        fit.set(FitAxes::X, self.size_x.is_auto());
        fit.set(FitAxes::Y, self.size_y.is_auto());
        fit
    }

    pub fn size_x_fit_children(&self) -> bool {
        self.size_x.is_auto()
    }

    pub fn size_y_fit_children(&self) -> bool {
        self.size_y.is_auto()
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.positioning == Positioning::Detached
    }

    /// Rect from the last layout run.
    ///
    /// Only meaningful right after `compute_layout` and before the next
    /// mutation of the tree or of any scalar.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

// =============================================================================
// Tests
// =============================================================================
