//! Space Engine - declarations and the tree that holds them.
//!
//! - Space: one node's declaration (direction, scalars, alignment) plus its rect
//! - SpaceTree: arena of spaces with parent/child index lists and the
//!   tree-authoring API (attach, detach, release, paths, traversals)
//!
//! # Architecture
//!
//! Spaces are NOT objects pointing at each other. They are slots in an arena,
//! addressed by generational [`SpaceId`]s:
//!
//! ```text
//! SpaceTree
//!   slot 0  Space { size: 600 x 400 }   parent=None  children=[1, 2]
//!   slot 1  Space { size: 1fr x 1rel }  parent=0     children=[]
//!   slot 2  Space { size: 2fr x 1rel }  parent=0     children=[]
//! ```
//!
//! The layout solver only reads declarations and writes rects back, so the
//! tree never has to hand out shared mutable references.

mod space;
mod tree;

pub use space::*;
pub use tree::*;
