use crate::{Color, NodeId, Rect};

/// Draw list filled by the draw pass. Backends consume `nodes` in order;
/// later entries paint over earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        /// Element that emitted this primitive, if any.
        source: Option<NodeId>,
        rect: Rect,
        color: Color,
    },
    Border {
        source: Option<NodeId>,
        rect: Rect,
        color: Color,
        width: f32,
    },
}

impl SceneNode {
    pub fn source(&self) -> Option<NodeId> {
        match self {
            SceneNode::Rect { source, .. } | SceneNode::Border { source, .. } => *source,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            SceneNode::Rect { rect, .. } | SceneNode::Border { rect, .. } => *rect,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }
}
