//! Core types for spark-spaces.
//!
//! Geometry primitives and the small enums every layer shares. Declarations
//! are expressed with [`Direction`], [`Positioning`] and [`Sides`]; the solver
//! answers with a [`Rect`] per space.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

// =============================================================================
// Axis
// =============================================================================

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (widths, x positions).
    X,
    /// Vertical axis (heights, y positions).
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Axis along which flow children are placed one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Children run left to right.
    #[default]
    Horizontal,
    /// Children run top to bottom.
    Vertical,
}

impl Direction {
    /// The main axis for this direction.
    #[inline]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::X,
            Self::Vertical => Axis::Y,
        }
    }

    /// The cross axis for this direction.
    #[inline]
    pub const fn cross_axis(self) -> Axis {
        self.main_axis().other()
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "row" | "x" => Ok(Self::Horizontal),
            "vertical" | "v" | "column" | "y" => Ok(Self::Vertical),
            _ => Err(ParseError::UnknownDirection(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

// =============================================================================
// Positioning
// =============================================================================

/// How a space takes part in its parent's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Positioning {
    /// Placed in sequence along the parent's main axis.
    #[default]
    Flow,
    /// Placed from its own offsets inside the parent's inner rect, ignoring siblings.
    Detached,
}

impl FromStr for Positioning {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "flow" => Ok(Self::Flow),
            "detached" | "absolute" => Ok(Self::Detached),
            _ => Err(ParseError::UnknownPositioning(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Positioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flow => "flow",
            Self::Detached => "detached",
        })
    }
}

// =============================================================================
// Fit-children flags
// =============================================================================

bitflags::bitflags! {
    /// Axes whose size is computed from children instead of declared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FitAxes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
    }
}

impl FitAxes {
    /// Flag for a single axis.
    #[inline]
    pub const fn of(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
        }
    }

    /// Whether `axis` is sized from children.
    #[inline]
    pub fn has(self, axis: Axis) -> bool {
        self.contains(Self::of(axis))
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Absolute rectangle in the root's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The empty rect at the origin. Disabled spaces end up here.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rect.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Near edge along `axis`.
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Check if a point is inside this rect (far edges exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `sides`. Width and height never go below zero.
    pub fn inset(&self, sides: &Sides<f32>) -> Self {
        Self {
            x: self.x + sides.left,
            y: self.y + sides.top,
            width: (self.width - sides.horizontal()).max(0.0),
            height: (self.height - sides.vertical()).max(0.0),
        }
    }

    /// Round every edge to the nearest integer.
    ///
    /// Edges are rounded rather than sizes, so two rects sharing an edge
    /// still share it afterwards.
    pub fn snapped(&self) -> Self {
        let left = self.x.round();
        let top = self.y.round();
        let right = self.right().round();
        let bottom = self.bottom().round();
        Self::new(left, top, right - left, bottom - top)
    }
}

// =============================================================================
// Sides
// =============================================================================

/// Four per-side values, in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Sides<T> {
    /// Create sides with explicit values.
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self { top, right, bottom, left }
    }

    /// Near side along `axis` (left for X, top for Y).
    #[inline]
    pub fn start(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.left,
            Axis::Y => &self.top,
        }
    }

    /// Far side along `axis` (right for X, bottom for Y).
    #[inline]
    pub fn end(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.right,
            Axis::Y => &self.bottom,
        }
    }

    /// Apply `f` to every side.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl<T: Copy> Sides<T> {
    /// Same value on every side.
    pub const fn all(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// Symmetric sides (horizontal = left/right, vertical = top/bottom).
    pub const fn symmetric(horizontal: T, vertical: T) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl Sides<f32> {
    /// Left + right.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.horizontal(),
            Axis::Y => self.vertical(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
