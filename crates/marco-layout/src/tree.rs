//! The node arena: slot storage, handle validation, tree structure.

use marco_core::{Edges, Rect, Size};

use crate::components::{BoxData, Components, FlowData, MarginData};
use crate::node::{Expand, Node, NodeId, NodeKind, Stretch};

/// Arena of layout nodes plus their component pools.
///
/// Nodes live in indexed slots addressed by [`NodeId`]; a side array of
/// generations persists across frees, so stale handles are rejected even
/// after their slot has been reused. Several independent root trees may
/// coexist in one arena.
///
/// All operations run to completion on the calling thread; a host that needs
/// concurrent trees should use independent `LayoutTree` instances.
#[derive(Clone, Default)]
pub struct LayoutTree {
    slots: Vec<Option<Node>>,
    /// Last generation issued per slot (persists across frees).
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    pub(crate) components: Components,
}

impl std::fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutTree")
            .field("slots_total", &self.slots.len())
            .field("slots_live", &self.live_count())
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl LayoutTree {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Node insertion
    // =========================================================================

    /// Insert a generic node under `parent` (or as a root when `parent` is
    /// [`NodeId::NULL`]). Returns [`NodeId::NULL`] when `parent` is stale.
    pub fn insert_generic(&mut self, parent: NodeId) -> NodeId {
        if !self.parent_ok(parent) {
            return NodeId::NULL;
        }
        self.attach(parent, NodeKind::Generic)
    }

    /// Insert a centering node. See [`LayoutTree::insert_generic`] for the
    /// parent contract.
    pub fn insert_center(&mut self, parent: NodeId) -> NodeId {
        if !self.parent_ok(parent) {
            return NodeId::NULL;
        }
        self.attach(parent, NodeKind::Center)
    }

    /// Insert a box node packing its children along `data.direction`.
    pub fn insert_box(&mut self, parent: NodeId, data: BoxData) -> NodeId {
        if !self.parent_ok(parent) {
            return NodeId::NULL;
        }
        let component = self.components.boxes.insert(data);
        self.attach(parent, NodeKind::Box(component))
    }

    /// Insert a flow node wrapping its children along `data.direction`.
    pub fn insert_flow(&mut self, parent: NodeId, data: FlowData) -> NodeId {
        if !self.parent_ok(parent) {
            return NodeId::NULL;
        }
        let component = self.components.flows.insert(data);
        self.attach(parent, NodeKind::Flow(component))
    }

    /// Insert a margin node arranging its children inside the inset inner
    /// rectangle.
    pub fn insert_margin(&mut self, parent: NodeId, data: MarginData) -> NodeId {
        if !self.parent_ok(parent) {
            return NodeId::NULL;
        }
        let component = self.components.margins.insert(data);
        self.attach(parent, NodeKind::Margin(component))
    }

    fn parent_ok(&self, parent: NodeId) -> bool {
        parent.is_null() || self.is_valid(parent)
    }

    /// Allocate a slot for a new node and link it into the tree. The parent
    /// has already been validated.
    fn attach(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let node = Node::new(kind, parent);
        let id = if let Some(index) = self.free_list.pop() {
            // The generation was already bumped when the slot was vacated.
            self.slots[index] = Some(node);
            NodeId::new(index as u32, self.generations[index])
        } else {
            self.slots.push(Some(node));
            self.generations.push(0);
            NodeId::new((self.slots.len() - 1) as u32, 0)
        };
        if parent.is_null() {
            self.roots.push(id);
        } else {
            self.node_mut(parent).children.push(id);
        }
        id
    }

    // =========================================================================
    // Handle validation and access
    // =========================================================================

    /// Check whether `id` addresses a live node with a matching generation.
    #[must_use]
    pub fn is_valid(&self, id: NodeId) -> bool {
        if id.is_null() {
            return false;
        }
        let index = id.index() as usize;
        index < self.slots.len()
            && self.slots[index].is_some()
            && self.generations[index] == id.generation()
    }

    /// Get a node by handle. `None` for stale handles.
    ///
    /// References are only guaranteed valid until the next mutating call;
    /// retain [`NodeId`] across frames, not references.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if self.is_valid(id) {
            self.slots[id.index() as usize].as_ref()
        } else {
            None
        }
    }

    /// Get a node mutably by handle. `None` for stale handles.
    #[must_use]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.is_valid(id) {
            self.slots[id.index() as usize].as_mut()
        } else {
            None
        }
    }

    /// Access a node whose validity is guaranteed by tree invariants.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.slots[id.index() as usize]
            .as_ref()
            .expect("stale NodeId")
    }

    /// Access a node mutably whose validity is guaranteed by tree invariants.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index() as usize]
            .as_mut()
            .expect("stale NodeId")
    }

    // =========================================================================
    // Structure queries
    // =========================================================================

    /// Top-level roots, in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ordered children of `id`; empty for stale handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], Node::children)
    }

    /// Parent of `id`. `None` for stale handles, `Some(NodeId::NULL)` for
    /// roots.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(Node::parent)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total number of slots, live or vacant.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of vacant slots awaiting reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    // =========================================================================
    // Component data access
    // =========================================================================

    /// Box configuration of `id`, when `id` is a live box node.
    #[must_use]
    pub fn box_data(&self, id: NodeId) -> Option<&BoxData> {
        match self.get(id)?.kind {
            NodeKind::Box(component) => self.components.boxes.get(component),
            _ => None,
        }
    }

    /// Box configuration of `id`, mutable.
    #[must_use]
    pub fn box_data_mut(&mut self, id: NodeId) -> Option<&mut BoxData> {
        match self.get(id)?.kind {
            NodeKind::Box(component) => self.components.boxes.get_mut(component),
            _ => None,
        }
    }

    /// Flow configuration of `id`, when `id` is a live flow node.
    #[must_use]
    pub fn flow_data(&self, id: NodeId) -> Option<&FlowData> {
        match self.get(id)?.kind {
            NodeKind::Flow(component) => self.components.flows.get(component),
            _ => None,
        }
    }

    /// Flow configuration of `id`, mutable.
    #[must_use]
    pub fn flow_data_mut(&mut self, id: NodeId) -> Option<&mut FlowData> {
        match self.get(id)?.kind {
            NodeKind::Flow(component) => self.components.flows.get_mut(component),
            _ => None,
        }
    }

    /// Margin configuration of `id`, when `id` is a live margin node.
    #[must_use]
    pub fn margin_data(&self, id: NodeId) -> Option<&MarginData> {
        match self.get(id)?.kind {
            NodeKind::Margin(component) => self.components.margins.get(component),
            _ => None,
        }
    }

    /// Margin configuration of `id`, mutable.
    #[must_use]
    pub fn margin_data_mut(&mut self, id: NodeId) -> Option<&mut MarginData> {
        match self.get(id)?.kind {
            NodeKind::Margin(component) => self.components.margins.get_mut(component),
            _ => None,
        }
    }

    // =========================================================================
    // Host-facing setters
    // =========================================================================

    /// Set resolved bounds. Hosts use this on roots before computing layout;
    /// no-op on stale handles.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.get_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Set the host-supplied minimum size; no-op on stale handles.
    pub fn set_minimum_size(&mut self, id: NodeId, minimum_size: Size) {
        if let Some(node) = self.get_mut(id) {
            node.minimum_size = minimum_size;
        }
    }

    /// Set anchor fractions; no-op on stale handles.
    pub fn set_anchors(&mut self, id: NodeId, anchors: Edges) {
        if let Some(node) = self.get_mut(id) {
            node.anchors = anchors;
        }
    }

    /// Set pixel offsets; no-op on stale handles.
    pub fn set_offsets(&mut self, id: NodeId, offsets: Edges) {
        if let Some(node) = self.get_mut(id) {
            node.offsets = offsets;
        }
    }

    /// Set per-axis expansion flags; no-op on stale handles.
    pub fn set_expand(&mut self, id: NodeId, expand: Expand) {
        if let Some(node) = self.get_mut(id) {
            node.expand = expand;
        }
    }

    /// Set per-axis stretch weights; no-op on stale handles.
    pub fn set_stretch(&mut self, id: NodeId, stretch: Stretch) {
        if let Some(node) = self.get_mut(id) {
            node.stretch = stretch;
        }
    }

    // =========================================================================
    // Removal and reparenting
    // =========================================================================

    /// Remove `id` and its whole subtree.
    ///
    /// Children are removed first, depth-first; each removed node releases
    /// its component slot, is unlinked from its parent, and has its slot
    /// generation bumped so every outstanding handle to it goes stale.
    /// Returns `false` without mutation when `id` is stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        self.remove_subtree(id);
        true
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.remove_subtree(child);
        }

        match self.node(id).kind {
            NodeKind::Generic | NodeKind::Center => {}
            NodeKind::Box(component) => self.components.boxes.release(component),
            NodeKind::Flow(component) => self.components.flows.release(component),
            NodeKind::Margin(component) => self.components.margins.release(component),
        }

        let parent = self.node(id).parent;
        if parent.is_null() {
            self.roots.retain(|&root| root != id);
        } else {
            // The parent is still live here: a cascading removal vacates
            // each node only after all of its children are gone.
            self.node_mut(parent).children.retain(|&child| child != id);
        }

        let index = id.index() as usize;
        self.slots[index] = None;
        self.generations[index] = self.generations[index].saturating_add(1);
        self.free_list.push(index);
    }

    /// Move `id` under `new_parent` ([`NodeId::NULL`] makes it a root).
    ///
    /// Returns `false` without mutation when `id` is stale, `new_parent` is
    /// non-null and stale, `id == new_parent`, or `new_parent` lies inside
    /// the subtree rooted at `id` (which would create a cycle).
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        if !new_parent.is_null() && !self.is_valid(new_parent) {
            return false;
        }
        if id == new_parent {
            return false;
        }
        if !new_parent.is_null() && self.is_descendant_of(new_parent, id) {
            return false;
        }

        let old_parent = self.node(id).parent;
        if old_parent.is_null() {
            self.roots.retain(|&root| root != id);
        } else {
            self.node_mut(old_parent)
                .children
                .retain(|&child| child != id);
        }

        if new_parent.is_null() {
            self.roots.push(id);
        } else {
            self.node_mut(new_parent).children.push(id);
        }
        self.node_mut(id).parent = new_parent;
        true
    }

    /// Depth-first search: is `target` inside the subtree rooted at
    /// `ancestor` (excluding `ancestor` itself)?
    fn is_descendant_of(&self, target: NodeId, ancestor: NodeId) -> bool {
        for &child in &self.node(ancestor).children {
            if child == target || self.is_descendant_of(target, child) {
                return true;
            }
        }
        false
    }
}
