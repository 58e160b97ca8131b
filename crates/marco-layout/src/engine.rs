//! Arrangement algorithms: anchor resolution and the per-kind passes.
//!
//! Layout is a single top-down walk. Each visited node arranges its direct
//! children (writing their `bounds`) and then recurses into each child with
//! the child's freshly resolved rectangle as the local frame. Every node is
//! visited exactly once, so the pass is linear in node count.

use marco_core::Rect;

use crate::components::{Align, BoxData, Direction, FlowData, MarginData};
use crate::node::{Node, NodeId, NodeKind};
use crate::tree::LayoutTree;

impl LayoutTree {
    /// Recompute `bounds` for the subtree rooted at `id`.
    ///
    /// The host must set `id`'s own bounds first; roots are not
    /// self-sizing. Stale handles are a no-op.
    pub fn compute_layout(&mut self, id: NodeId) {
        if !self.is_valid(id) {
            return;
        }
        let frame = self.node(id).bounds;
        let children = self.node(id).children.clone();

        match self.node(id).kind {
            NodeKind::Generic => self.arrange_generic(&children, frame),
            NodeKind::Center => self.arrange_center(&children, frame),
            NodeKind::Box(component) => {
                let data = *self
                    .components
                    .boxes
                    .get(component)
                    .expect("box component slot");
                self.arrange_box(&children, frame, data);
            }
            NodeKind::Flow(component) => {
                let data = *self
                    .components
                    .flows
                    .get(component)
                    .expect("flow component slot");
                self.arrange_flow(&children, frame, data);
            }
            NodeKind::Margin(component) => {
                let data = *self
                    .components
                    .margins
                    .get(component)
                    .expect("margin component slot");
                self.arrange_margin(&children, frame, data);
            }
        }

        for child in children {
            self.compute_layout(child);
        }
    }

    /// Generic: anchors and size precedence only, no cross-child
    /// interaction. A child's origin is touched only by anchor resolution.
    fn arrange_generic(&mut self, children: &[NodeId], frame: Rect) {
        for &child_id in children {
            let child = self.node_mut(child_id);
            apply_anchors(child, frame);
            child.bounds.width = fit_extent(
                child.bounds.width,
                child.minimum_size.width,
                child.expand.x,
                frame.width,
            );
            child.bounds.height = fit_extent(
                child.bounds.height,
                child.minimum_size.height,
                child.expand.y,
                frame.height,
            );
        }
    }

    /// Center: each child is centered independently within the parent,
    /// not the group as a whole.
    fn arrange_center(&mut self, children: &[NodeId], frame: Rect) {
        for &child_id in children {
            let child = self.node_mut(child_id);
            apply_anchors(child, frame);

            let mut width = child.minimum_size.width.max(0.0);
            if child.expand.x {
                width = width.max(frame.width);
            }
            let mut height = child.minimum_size.height.max(0.0);
            if child.expand.y {
                height = height.max(frame.height);
            }

            child.bounds = Rect::new(
                frame.x + (frame.width - width) * 0.5,
                frame.y + (frame.height - height) * 0.5,
                width,
                height,
            );
        }
    }

    /// Box: children packed along the main axis in child order.
    ///
    /// Anchors may move a child's main-axis origin before placement, but
    /// the cursor owns the final main-axis origin and size; only the cross
    /// axis keeps the anchor-resolved extent (raised to the cross minimum).
    fn arrange_box(&mut self, children: &[NodeId], frame: Rect, data: BoxData) {
        if children.is_empty() {
            return;
        }
        let direction = data.direction;
        let (frame_main, frame_cross) = to_axes(direction, frame.width, frame.height);
        let (origin_main, origin_cross) = to_axes(direction, frame.x, frame.y);

        // First pass: fixed main-axis total and stretch weight of expanders.
        let mut total_main = 0.0_f32;
        let mut total_stretch = 0.0_f32;
        for &child_id in children {
            let child = self.node(child_id);
            let (min_main, _) =
                to_axes(direction, child.minimum_size.width, child.minimum_size.height);
            total_main += min_main.max(0.0);
            let (expand_main, _) = to_axes(direction, child.expand.x, child.expand.y);
            if expand_main {
                let (stretch_main, _) = to_axes(direction, child.stretch.x, child.stretch.y);
                total_stretch += stretch_main.max(0.0);
            }
        }

        let leftover = (frame_main - total_main).max(0.0);
        let (mut cursor, spacing) = match data.align {
            Align::Start => (origin_main, 0.0),
            Align::Center => (origin_main + leftover / 2.0, 0.0),
            Align::End => (origin_main + leftover, 0.0),
            Align::SpaceBetween => {
                let spacing = if children.len() > 1 {
                    leftover / (children.len() - 1) as f32
                } else {
                    0.0
                };
                (origin_main, spacing)
            }
        };

        // Second pass: place in child order.
        for &child_id in children {
            let child = self.node_mut(child_id);
            apply_anchors(child, frame);

            let (min_main, min_cross) =
                to_axes(direction, child.minimum_size.width, child.minimum_size.height);
            let mut main_size = min_main.max(0.0);
            let (expand_main, _) = to_axes(direction, child.expand.x, child.expand.y);
            if expand_main && total_stretch > 0.0 {
                let (stretch_main, _) = to_axes(direction, child.stretch.x, child.stretch.y);
                main_size += leftover * stretch_main.max(0.0) / total_stretch;
            }

            let (_, anchored_cross) = to_axes(direction, child.bounds.width, child.bounds.height);
            let cross_size = anchored_cross.max(min_cross).max(0.0);

            let (x, y) = from_axes(direction, cursor, origin_cross);
            let (width, height) = from_axes(direction, main_size, cross_size);
            child.bounds = Rect::new(x, y, width, height);

            cursor += main_size + spacing;
        }
    }

    /// Flow: a moving cursor that wraps to the next line when a child would
    /// cross the parent's far main edge.
    fn arrange_flow(&mut self, children: &[NodeId], frame: Rect, data: FlowData) {
        if children.is_empty() {
            return;
        }
        let direction = data.direction;
        let (frame_main, frame_cross) = to_axes(direction, frame.width, frame.height);
        let (origin_main, origin_cross) = to_axes(direction, frame.x, frame.y);

        let mut cursor_main = origin_main;
        let mut cursor_cross = origin_cross;
        // Tallest cross extent seen on the current line.
        let mut cross_line = 0.0_f32;

        for &child_id in children {
            let child = self.node_mut(child_id);
            apply_anchors(child, frame);

            let (min_main, min_cross) =
                to_axes(direction, child.minimum_size.width, child.minimum_size.height);
            let main_size = min_main.max(0.0);
            let (_, expand_cross) = to_axes(direction, child.expand.x, child.expand.y);
            let mut cross_size = min_cross.max(0.0);
            if expand_cross {
                cross_size = cross_size.max(frame_cross);
            }

            if cursor_main + main_size > origin_main + frame_main {
                cursor_main = origin_main;
                cursor_cross += cross_line;
                cross_line = 0.0;
            }

            let (x, y) = from_axes(direction, cursor_main, cursor_cross);
            let (width, height) = from_axes(direction, main_size, cross_size);
            child.bounds = Rect::new(x, y, width, height);

            cursor_main += main_size;
            cross_line = cross_line.max(cross_size);
        }
    }

    /// Margin: arrange children against the inner rectangle produced by
    /// insetting the frame, with the inner extents as the expand target.
    fn arrange_margin(&mut self, children: &[NodeId], frame: Rect, data: MarginData) {
        let inner = frame.inset(data.insets());
        for &child_id in children {
            let child = self.node_mut(child_id);
            // Children default to the inner origin; anchors resolve against
            // the inner rectangle and may move them.
            child.bounds.x = inner.x;
            child.bounds.y = inner.y;
            apply_anchors(child, inner);
            child.bounds.width = fit_extent(
                child.bounds.width,
                child.minimum_size.width,
                child.expand.x,
                inner.width,
            );
            child.bounds.height = fit_extent(
                child.bounds.height,
                child.minimum_size.height,
                child.expand.y,
                inner.height,
            );
        }
    }
}

/// Resolve a child's anchors and offsets against a frame.
///
/// Per axis independently: the anchored span overwrites that axis's origin
/// and size only when it is positive, so all-zero anchors and offsets leave
/// the axis for the arrangement pass to own.
fn apply_anchors(child: &mut Node, frame: Rect) {
    let x0 = frame.x + child.anchors.left * frame.width + child.offsets.left;
    let x1 = frame.x + child.anchors.right * frame.width - child.offsets.right;
    if x1 > x0 {
        child.bounds.x = x0;
        child.bounds.width = x1 - x0;
    }

    let y0 = frame.y + child.anchors.top * frame.height + child.offsets.top;
    let y1 = frame.y + child.anchors.bottom * frame.height - child.offsets.bottom;
    if y1 > y0 {
        child.bounds.y = y0;
        child.bounds.height = y1 - y0;
    }
}

/// Final extent for one axis: the anchor-resolved extent, raised to the
/// minimum, raised again to the fill extent when expanding, never negative.
fn fit_extent(anchored: f32, minimum: f32, expand: bool, fill: f32) -> f32 {
    let mut extent = anchored.max(minimum);
    if expand {
        extent = extent.max(fill);
    }
    extent.max(0.0)
}

/// Split an (x, y) pair into (main, cross) for `direction`.
const fn to_axes<T: Copy>(direction: Direction, x: T, y: T) -> (T, T) {
    match direction {
        Direction::Horizontal => (x, y),
        Direction::Vertical => (y, x),
    }
}

/// Join a (main, cross) pair back into (x, y) for `direction`.
const fn from_axes<T: Copy>(direction: Direction, main: T, cross: T) -> (T, T) {
    to_axes(direction, main, cross)
}
