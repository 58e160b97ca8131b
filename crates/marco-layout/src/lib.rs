//! Node arena and layout engine for the Marco layout solver.
//!
//! Marco resolves pixel rectangles for a tree of nodes in a single top-down
//! pass, driven entirely by host-supplied inputs: a root rectangle, per-node
//! minimum sizes, anchor/offset constraints, and per-kind arrangement rules.
//!
//! Nodes live in a [`LayoutTree`] arena and are addressed by generational
//! [`NodeId`] handles, so deleting a subtree invalidates every outstanding
//! handle into it even after slots are reused.
//!
//! # Host protocol
//!
//! Per frame the host (1) applies structural edits, (2) updates
//! `minimum_size` where intrinsic content changed, (3) sets each root's
//! bounds to the current viewport, (4) calls
//! [`LayoutTree::compute_layout`] once per root, and (5) reads `bounds`
//! back for rendering and hit-testing.
//!
//! ```
//! use marco_core::{Rect, Size};
//! use marco_layout::{Align, BoxData, Direction, LayoutTree, NodeId};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.insert_box(
//!     NodeId::NULL,
//!     BoxData::new(Direction::Horizontal, Align::SpaceBetween),
//! );
//! let left = tree.insert_generic(root);
//! let right = tree.insert_generic(root);
//!
//! tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 20.0));
//! tree.set_minimum_size(left, Size::new(30.0, 20.0));
//! tree.set_minimum_size(right, Size::new(30.0, 20.0));
//! tree.compute_layout(root);
//!
//! assert_eq!(tree.get(right).map(|n| n.bounds.x), Some(70.0));
//! ```

mod components;
mod engine;
mod node;
mod tree;

pub use components::{Align, BoxData, Direction, FlowData, MarginData};
pub use node::{Expand, Node, NodeId, NodeKind, Stretch};
pub use tree::LayoutTree;
