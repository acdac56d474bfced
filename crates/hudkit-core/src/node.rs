use std::any::Any;

use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{Color, Layout, PointerState, Rect, Scene, SceneNode, Vec2};

new_key_type! {
    /// Stable, generation-checked identity of a node in a [`crate::HudTree`].
    pub struct NodeId;
}

pub type Children = SmallVec<[NodeId; 4]>;

/// What the input pass tells an element about the pointer.
#[derive(Clone, Copy, Debug)]
pub struct InputCx {
    pub id: NodeId,
    pub pointer: PointerState,
    /// Pointer is inside this element and it holds the cursor.
    pub moused_over: bool,
    pub owns_cursor: bool,
    /// Effective bounds; `None` for non-positioned nodes.
    pub bounds: Option<Rect>,
}

/// Handed to `before_draw`. The layout has already been aligned to the
/// parent for this frame; changes made here are seen by the children.
pub struct PreDrawCx<'a> {
    pub id: NodeId,
    pub layout: Option<&'a mut Layout>,
    pub origin: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct DrawCx {
    pub id: NodeId,
    pub layout: Option<Layout>,
    /// Centre of the element: origin plus scaled offset.
    pub position: Vec2,
    pub bounds: Option<Rect>,
}

#[doc(hidden)]
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-frame hooks of a concrete element. The traversal order and the
/// cursor protocol live in [`crate::HudTree`]; elements only react.
pub trait Element: AsAny {
    /// Diagnostic name, used by logs and the devtools tree dump.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    fn handle_input(&mut self, _cx: &InputCx) {}

    fn before_draw(&mut self, _cx: &mut PreDrawCx<'_>) {}

    fn draw(&mut self, _cx: &DrawCx, _scene: &mut Scene) {}
}

/// Element with no behaviour of its own; groups children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Group;

impl Element for Group {}

/// Solid rectangle filling the element's bounds, with an optional border
/// and a hover colour used while its layout is moused over.
#[derive(Clone, Debug)]
pub struct Panel {
    pub color: Color,
    pub hover_color: Option<Color>,
    pub border: Option<(Color, f32)>,
}

impl Panel {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            hover_color: None,
            border: None,
        }
    }

    pub fn hover(mut self, color: Color) -> Self {
        self.hover_color = Some(color);
        self
    }

    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border = Some((color, width));
        self
    }
}

impl Element for Panel {
    fn draw(&mut self, cx: &DrawCx, scene: &mut Scene) {
        let Some(rect) = cx.bounds else { return };
        let hovered = cx.layout.is_some_and(|l| l.is_moused_over());
        let color = match self.hover_color {
            Some(hover) if hovered => hover,
            _ => self.color,
        };
        scene.push(SceneNode::Rect {
            source: Some(cx.id),
            rect,
            color,
        });
        if let Some((color, width)) = self.border {
            scene.push(SceneNode::Border {
                source: Some(cx.id),
                rect,
                color,
                width,
            });
        }
    }
}

pub(crate) struct Node {
    pub(crate) visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children,
    pub(crate) layout: Option<Layout>,
    pub(crate) element: Box<dyn Element>,
}

impl Node {
    pub(crate) fn new(element: Box<dyn Element>, layout: Option<Layout>) -> Self {
        Self {
            visible: true,
            parent: None,
            children: SmallVec::new(),
            layout,
            element,
        }
    }
}
