//! Core types for the Marco layout solver.
//!
//! This crate provides the foundational value types used throughout Marco:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Four-sided edge values: [`Edges`] (anchors, offsets, margins)

mod edges;
mod geometry;

pub use edges::Edges;
pub use geometry::{Point, Rect, Size};
