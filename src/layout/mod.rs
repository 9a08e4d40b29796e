//! Layout Module
//!
//! Turns a [`SpaceTree`](crate::engine::SpaceTree) subtree into absolute rects.
//!
//! # Architecture
//!
//! The solver never holds references into the tree between calls. Each run:
//!
//! 1. Validates the root (it must be fully `Absolute`)
//! 2. Builds shadow state per arena slot in BFS order
//! 3. Runs the three passes over the shadow state (auto sizes, sizes, positions)
//! 4. Writes rects back onto the spaces
//!
//! Layout is a pure function of the declarations: two runs over an unchanged
//! tree produce bit-identical rects.
//!
//! # Example
//!
//! ```
//! use spark_spaces::{compute_layout, Rect, Scalar, Space, SpaceTree};
//!
//! let mut tree = SpaceTree::new();
//! let root = tree.insert(Space::fixed(0.0, 0.0, 600.0, 400.0).with_padding(10.0).with_gap(10.0));
//! let a = tree.insert(Space::new().with_size(Scalar::fraction(1.0), Scalar::relative(1.0)));
//! let b = tree.insert(Space::new().with_size(Scalar::fraction(2.0), Scalar::relative(1.0)));
//! tree.attach(root, a)?;
//! tree.attach(root, b)?;
//!
//! compute_layout(&mut tree, root)?;
//! assert_eq!(tree.rect(a), Some(Rect::new(10.0, 10.0, 190.0, 380.0)));
//! assert_eq!(tree.rect(b), Some(Rect::new(210.0, 10.0, 380.0, 380.0)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod solver;
mod types;

pub use solver::{LayoutSolver, compute_layout, compute_layout_with};
pub use types::LayoutOptions;
