pub use crate::access::{NodeOp, NodeRequest, NodeResponse, Payload};
pub use crate::alignment::{DimAlignment, ParentAlignment};
pub use crate::color::Color;
pub use crate::cursor::{Cursor, PointerButtons, PointerState};
pub use crate::error::{HudError, Result};
pub use crate::geometry::{Rect, Vec2};
pub use crate::layout::Layout;
pub use crate::node::{DrawCx, Element, Group, InputCx, NodeId, Panel, PreDrawCx};
pub use crate::runtime::{Frame, Runtime, RuntimeConfig};
pub use crate::scene::{Scene, SceneNode};
pub use crate::tree::HudTree;
