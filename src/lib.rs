//! # spark-spaces
//!
//! Constraint-based 2D box layout.
//!
//! Every node of a tree (a [`Space`]) declares its offset, size and padding as
//! typed [`Scalar`]s: absolute units, fractions of the parent, shares of the
//! leftover space, or "fit my children". [`compute_layout`] resolves the whole
//! subtree into absolute [`Rect`]s in three passes.
//!
//! ## Modules
//!
//! - [`types`] - Geometry primitives (Axis, Direction, Rect, Sides, ...)
//! - [`scalar`] - The Scalar value model and its string grammar
//! - [`engine`] - Space declarations and the SpaceTree arena
//! - [`layout`] - The three-pass solver
//! - [`error`] - Error types
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and spans (`compute_layout` at debug,
//! per-pass and tree-mutation events at trace). Install a subscriber to see
//! them; without one they cost nothing.

pub mod engine;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{Ancestors, Descendants, Space, SpaceId, SpaceTree};
pub use error::{LayoutError, ParseError, TreeError};
pub use layout::{LayoutOptions, LayoutSolver, compute_layout, compute_layout_with};
pub use scalar::{Scalar, ScalarKind};
