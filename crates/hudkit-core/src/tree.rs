//! Node arena and the per-frame traversal protocol.
//!
//! Every pass is a single depth-first walk that skips invisible subtrees:
//!
//! - input visits children last-to-first, then the node itself, so the most
//!   recently registered or focused element sees the pointer first;
//! - pre-draw and draw visit the node first, then children first-to-last, so
//!   parents settle their geometry before children read it and later
//!   children paint on top.

use std::panic::{AssertUnwindSafe, catch_unwind};

use slotmap::SlotMap;

use crate::alignment::ParentGeometry;
use crate::error::panic_message;
use crate::node::Node;
use crate::{
    Cursor, DrawCx, Element, HudError, InputCx, Layout, NodeId, PreDrawCx, Rect, Result, Scene,
    Vec2,
};

/// Smallest hit box extent per axis, in effective units.
pub const MIN_HIT_EXTENT: f32 = 8.0;

pub struct HudTree {
    nodes: SlotMap<NodeId, Node>,
    min_hit_extent: f32,
}

impl Default for HudTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HudTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min_hit_extent: MIN_HIT_EXTENT,
        }
    }

    pub fn set_min_hit_extent(&mut self, extent: f32) {
        self.min_hit_extent = extent;
    }

    /// Creates a detached, non-positioned node.
    pub fn insert(&mut self, element: impl Element) -> NodeId {
        self.nodes.insert(Node::new(Box::new(element), None))
    }

    /// Creates a detached positioned node.
    pub fn insert_positioned(&mut self, element: impl Element, layout: Layout) -> NodeId {
        self.nodes.insert(Node::new(Box::new(element), Some(layout)))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// Returns whether `child` is attached to `parent` afterwards. A child
    /// already under `parent` is left where it is; a child attached
    /// elsewhere must be unregistered first. Cycles are refused.
    pub fn register(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            log::debug!("register: stale node ({parent:?} <- {child:?})");
            return false;
        }
        match self.nodes[child].parent {
            Some(p) if p == parent => return true,
            Some(other) => {
                log::debug!("register: {child:?} is already attached to {other:?}");
                return false;
            }
            None => {}
        }
        if parent == child || self.is_ancestor(child, parent) {
            log::debug!("register: attaching {child:?} under {parent:?} would form a cycle");
            return false;
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.sync_parent_scale(child);
        true
    }

    /// Registers each child in order. Returns how many ended up attached.
    pub fn register_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> usize {
        children
            .into_iter()
            .filter(|&child| self.register(parent, child))
            .count()
    }

    /// Detaches `child` from its parent. Returns `false` if it was detached.
    pub fn unregister(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        self.nodes[child].parent = None;
        self.sync_parent_scale(child);
        true
    }

    /// Unregisters `id` and drops it together with its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unregister(id);

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Moves `child` to the end of its parent's children: drawn last, hit
    /// first. The other children keep their relative order.
    pub fn set_focus(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return false;
        };
        let Some(p) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = p.children.iter().position(|c| *c == child) else {
            return false;
        };
        let id = p.children.remove(index);
        p.children.push(id);
        true
    }

    /// Shows or hides `id` and its subtree. Hiding clears the subtree's
    /// mouse-over state, since hidden elements take no input.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        let Some(node) = self.nodes.get_mut(id) else { return };
        node.visible = visible;
        if !visible {
            self.clear_mouse_over(id);
        }
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.nodes.get(id).and_then(|n| n.layout.as_ref())
    }

    pub fn layout_mut(&mut self, id: NodeId) -> Option<&mut Layout> {
        self.nodes.get_mut(id).and_then(|n| n.layout.as_mut())
    }

    pub fn element<T: Element>(&self, id: NodeId) -> Option<&T> {
        let node = self.nodes.get(id)?;
        (*node.element).as_any().downcast_ref::<T>()
    }

    pub fn element_mut<T: Element>(&mut self, id: NodeId) -> Option<&mut T> {
        let node = self.nodes.get_mut(id)?;
        (*node.element).as_any_mut().downcast_mut::<T>()
    }

    pub fn element_name(&self, id: NodeId) -> Option<&'static str> {
        self.nodes.get(id).map(|n| n.element.name())
    }

    /// True if `ancestor` is `id`'s parent, grandparent, and so on.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Alignment origin: the parent's position plus this element's
    /// alignment offset, or zero when the parent is absent or not
    /// positioned. Derived on every call.
    pub fn origin(&self, id: NodeId) -> Vec2 {
        let Some(layout) = self.layout(id) else {
            return Vec2::ZERO;
        };
        match self.parent(id) {
            Some(parent) if self.layout(parent).is_some() => {
                self.position(parent) + layout.offset_alignment
            }
            _ => Vec2::ZERO,
        }
    }

    /// Centre of the element: origin plus scaled offset.
    pub fn position(&self, id: NodeId) -> Vec2 {
        match self.layout(id) {
            Some(layout) => self.origin(id) + layout.offset_scaled(),
            None => Vec2::ZERO,
        }
    }

    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let layout = self.layout(id)?;
        Some(Rect::from_center(self.position(id), layout.size_scaled()))
    }

    fn parent_geometry(&self, id: NodeId) -> Option<ParentGeometry> {
        let parent = self.parent(id)?;
        self.layout(parent).map(Layout::as_parent)
    }

    fn sync_parent_scale(&mut self, id: NodeId) {
        let parent_scale = self.parent_geometry(id).map(|g| g.scale);
        if let Some(layout) = self.layout_mut(id) {
            layout.has_parent_scale = parent_scale.is_some();
            layout.parent_scale = parent_scale.unwrap_or(1.0);
        }
    }

    /// Input pass over `root`'s subtree. Each element hook runs in
    /// isolation: a panicking hook is returned as [`HudError::HookFault`]
    /// and the rest of the pass carries on. `Err` only for a stale root.
    pub fn run_input(&mut self, root: NodeId, cursor: &mut Cursor) -> Result<Vec<HudError>> {
        self.check_root(root)?;
        let anchor = self.anchor_of_parent(root);
        let mut faults = Vec::new();
        self.input_node(root, anchor, cursor, &mut faults);
        Ok(faults)
    }

    pub fn run_pre_draw(&mut self, root: NodeId) -> Result<Vec<HudError>> {
        self.check_root(root)?;
        let anchor = self.anchor_of_parent(root);
        let mut faults = Vec::new();
        self.pre_draw_node(root, anchor, &mut faults);
        Ok(faults)
    }

    pub fn run_draw(&mut self, root: NodeId, scene: &mut Scene) -> Result<Vec<HudError>> {
        self.check_root(root)?;
        let anchor = self.anchor_of_parent(root);
        let mut faults = Vec::new();
        self.draw_node(root, anchor, scene, &mut faults);
        Ok(faults)
    }

    fn check_root(&self, root: NodeId) -> Result<()> {
        if self.contains(root) {
            Ok(())
        } else {
            Err(HudError::StaleNode(root))
        }
    }

    fn clear_mouse_over(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.get_mut(next) else { continue };
            if let Some(layout) = node.layout.as_mut() {
                layout.moused_over = false;
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Position children of `id`'s parent are anchored at. Lets a pass
    /// start at any attached node.
    fn anchor_of_parent(&self, id: NodeId) -> Vec2 {
        match self.parent(id) {
            Some(parent) if self.layout(parent).is_some() => self.position(parent),
            _ => Vec2::ZERO,
        }
    }

    /// Position handed to `id`'s children as their anchor.
    fn child_anchor(&self, id: NodeId, origin: Vec2) -> Vec2 {
        match self.layout(id) {
            Some(layout) => origin + layout.offset_scaled(),
            None => Vec2::ZERO,
        }
    }

    fn input_node(
        &mut self,
        id: NodeId,
        anchor: Vec2,
        cursor: &mut Cursor,
        faults: &mut Vec<HudError>,
    ) {
        let Some(node) = self.nodes.get(id) else { return };
        if !node.visible {
            self.clear_mouse_over(id);
            return;
        }
        let layout = node.layout;
        let children = node.children.clone();

        let origin = layout.map_or(Vec2::ZERO, |l| anchor + l.offset_alignment);
        let share = layout.is_some_and(|l| l.share_cursor);
        let was_moused_over = layout.is_some_and(|l| l.moused_over);

        // A capturer that had the pointer last frame holds the cursor while
        // its children run, unless it shares.
        if share {
            cursor.arbiter.try_release(id);
        } else if was_moused_over && layout.is_some_and(|l| l.capture_cursor) {
            cursor.arbiter.capture(id);
        }

        let child_anchor = self.child_anchor(id, origin);
        for &child in children.iter().rev() {
            self.input_node(child, child_anchor, cursor, faults);
        }

        if share && was_moused_over && !cursor.arbiter.is_captured() {
            cursor.arbiter.capture(id);
        }

        let pointer = cursor.pointer;
        let bounds = layout.map(|l| Rect::from_center(origin + l.offset_scaled(), l.size_scaled()));
        let moused_over = match layout {
            Some(l)
                if l.capture_cursor
                    && pointer.visible
                    && (!cursor.arbiter.is_captured() || cursor.arbiter.is_capturing(id)) =>
            {
                let hit = l.hit_box(origin + l.offset_scaled(), self.min_hit_extent);
                if hit.contains(pointer.position) {
                    cursor.arbiter.capture(id)
                } else {
                    cursor.arbiter.try_release(id);
                    false
                }
            }
            _ => {
                cursor.arbiter.try_release(id);
                false
            }
        };

        let Some(node) = self.nodes.get_mut(id) else { return };
        if let Some(l) = node.layout.as_mut() {
            l.moused_over = moused_over;
        }
        let cx = InputCx {
            id,
            pointer,
            moused_over,
            owns_cursor: cursor.arbiter.is_capturing(id),
            bounds,
        };
        let element = &mut node.element;
        guard(id, faults, || element.handle_input(&cx));
    }

    fn pre_draw_node(&mut self, id: NodeId, anchor: Vec2, faults: &mut Vec<HudError>) {
        if !self.is_visible(id) {
            return;
        }
        let parent = self.parent_geometry(id);

        let Some(node) = self.nodes.get_mut(id) else { return };
        let origin = match node.layout.as_mut() {
            Some(layout) => {
                layout.apply_parent(parent.as_ref());
                anchor + layout.offset_alignment
            }
            None => Vec2::ZERO,
        };
        let mut cx = PreDrawCx {
            id,
            layout: node.layout.as_mut(),
            origin,
        };
        let element = &mut node.element;
        guard(id, faults, || element.before_draw(&mut cx));
        log::trace!("pre-draw {} {id:?} at {origin:?}", node.element.name());

        let children = node.children.clone();
        let child_anchor = self.child_anchor(id, origin);
        for child in children {
            self.pre_draw_node(child, child_anchor, faults);
        }
    }

    fn draw_node(
        &mut self,
        id: NodeId,
        anchor: Vec2,
        scene: &mut Scene,
        faults: &mut Vec<HudError>,
    ) {
        let Some(node) = self.nodes.get_mut(id) else { return };
        if !node.visible {
            return;
        }
        let layout = node.layout;
        let origin = layout.map_or(Vec2::ZERO, |l| anchor + l.offset_alignment);
        let position = layout.map_or(Vec2::ZERO, |l| origin + l.offset_scaled());
        let cx = DrawCx {
            id,
            layout,
            position,
            bounds: layout.map(|l| Rect::from_center(position, l.size_scaled())),
        };
        let element = &mut node.element;
        guard(id, faults, || element.draw(&cx, scene));

        let children = node.children.clone();
        let child_anchor = if layout.is_some() { position } else { Vec2::ZERO };
        for child in children {
            self.draw_node(child, child_anchor, scene, faults);
        }
    }
}

/// Runs one element hook, turning a panic into a [`HudError::HookFault`].
fn guard(id: NodeId, faults: &mut Vec<HudError>, hook: impl FnOnce()) {
    if let Err(err) = catch_unwind(AssertUnwindSafe(hook)) {
        let message = panic_message(err);
        log::debug!("hook of {id:?} panicked: {message}");
        faults.push(HudError::HookFault { node: id, message });
    }
}
