//! Error types for spark-spaces.
//!
//! Three families, one per boundary:
//! - [`ParseError`] - authoring-time declaration errors (scalars, enums, sides)
//! - [`TreeError`] - structural mutations of a [`SpaceTree`](crate::engine::SpaceTree)
//! - [`LayoutError`] - preconditions of [`compute_layout`](crate::layout::compute_layout)
//!
//! Degenerate-but-valid layouts (zero fraction weight, overflow, empty
//! containers) are never errors; the solver clamps them.

use thiserror::Error;

use crate::engine::SpaceId;
use crate::scalar::ScalarKind;

/// A declaration string could not be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty declaration")]
    Empty,

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("non-finite value: {0:?}")]
    NonFinite(String),

    #[error("unknown unit {unit:?} in {input:?}")]
    UnknownUnit { input: String, unit: String },

    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),

    #[error("unknown positioning: {0:?}")]
    UnknownPositioning(String),

    #[error("expected 1 to 4 values, found {count} in {input:?}")]
    InvalidSides { input: String, count: usize },
}

/// A structural mutation was rejected. The tree is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown space {0}")]
    UnknownSpace(SpaceId),

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: SpaceId, child: SpaceId },

    #[error("space {0} already has a parent")]
    AlreadyAttached(SpaceId),

    #[error("index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Layout could not start. No rect has been written when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown space {0}")]
    UnknownSpace(SpaceId),

    #[error("root {field} must be absolute, found {kind}")]
    RootNotAbsolute {
        field: &'static str,
        kind: ScalarKind,
    },
}
