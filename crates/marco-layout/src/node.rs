//! Node storage types: generational handles, per-node layout inputs.

use marco_core::{Edges, Rect, Size};
use serde::{Deserialize, Serialize};

/// Slot index reserved for the null handle.
const NULL_INDEX: u32 = u32::MAX;

/// A generational handle to a node in a [`LayoutTree`](crate::LayoutTree).
///
/// Handles stay cheap to copy and compare; the owning tree checks both the
/// slot index and the generation, so a handle to a deleted node can never
/// resolve to a later occupant of the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// The null handle. Used as the parent of root nodes and returned by
    /// node insertion when the requested parent is stale.
    pub const NULL: Self = Self {
        index: NULL_INDEX,
        generation: 0,
    };

    /// Create a handle from raw parts.
    ///
    /// Validity is established by the owning tree, not by construction; an
    /// arbitrary handle is simply stale.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index addressed by this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation this handle was issued with.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Check whether this is the null handle.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == NULL_INDEX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Arrangement kind of a node.
///
/// Typed kinds carry the index of their configuration slot in the matching
/// component pool, so a pool index exists exactly when the kind needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Anchor/offset resolution only; children keep their own positions.
    Generic,
    /// Each child is centered independently within the parent.
    Center,
    /// Children are packed along one axis ([`BoxData`](crate::BoxData)).
    Box(usize),
    /// Children flow along one axis and wrap ([`FlowData`](crate::FlowData)).
    Flow(usize),
    /// Children are laid out inside an inset inner rectangle
    /// ([`MarginData`](crate::MarginData)).
    Margin(usize),
}

/// Per-axis request to fill the available parent extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expand {
    /// Fill horizontally
    pub x: bool,
    /// Fill vertically
    pub y: bool,
}

impl Expand {
    /// No expansion on either axis.
    pub const NONE: Self = Self { x: false, y: false };

    /// Expansion on both axes.
    pub const BOTH: Self = Self { x: true, y: true };

    /// Create per-axis expansion flags.
    #[must_use]
    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }
}

/// Per-axis relative weight used when distributing leftover space among
/// expanding siblings. Only consulted on an axis where [`Expand`] is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stretch {
    /// Horizontal weight
    pub x: f32,
    /// Vertical weight
    pub y: f32,
}

impl Stretch {
    /// Create per-axis stretch weights.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Uniform weight on both axes.
    #[must_use]
    pub const fn uniform(weight: f32) -> Self {
        Self::new(weight, weight)
    }
}

impl Default for Stretch {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// One node of the layout tree.
///
/// The layout input fields are public and host-writable through
/// [`LayoutTree::get_mut`](crate::LayoutTree::get_mut); tree structure
/// (parent, children, kind) is maintained by the tree itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Resolved rectangle. Written by the layout engine, except for roots,
    /// whose bounds the host sets before computing layout.
    pub bounds: Rect,
    /// Host-supplied floor for the node's arranged size.
    pub minimum_size: Size,
    /// Per-axis request to fill the available parent extent.
    pub expand: Expand,
    /// Relative weights for leftover distribution among expanding siblings.
    pub stretch: Stretch,
    /// Edge fractions in `[0, 1]` of the parent rectangle.
    pub anchors: Edges,
    /// Pixel adjustments applied after anchor fractions.
    pub offsets: Edges,
    pub(crate) parent: NodeId,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, parent: NodeId) -> Self {
        Self {
            bounds: Rect::default(),
            minimum_size: Size::ZERO,
            expand: Expand::NONE,
            stretch: Stretch::default(),
            anchors: Edges::ZERO,
            offsets: Edges::ZERO,
            parent,
            children: Vec::new(),
            kind,
        }
    }

    /// Parent handle; [`NodeId::NULL`] for roots.
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Ordered child handles. Order is arrangement order for Box and Flow.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Arrangement kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Check whether this node is a root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_null()
    }
}
