//! Tagged request/response access for code that only holds node ids and
//! operation codes, not concrete element types.
//!
//! ```rust
//! use hudkit_core::*;
//!
//! let mut tree = HudTree::new();
//! let panel = tree.insert_positioned(Group, Layout::new(100.0, 100.0));
//! let button = tree.insert_positioned(Group, Layout::new(10.0, 10.0));
//!
//! let req = NodeRequest::decode(NodeOp::AddChild as u32, Payload::Node(button)).unwrap();
//! assert_eq!(tree.access(panel, req), Ok(NodeResponse::Applied(true)));
//! assert_eq!(tree.parent(button), Some(panel));
//! ```

use crate::{HudError, HudTree, NodeId, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NodeOp {
    AddChild = 1,
    RemoveChild = 2,
    SetFocus = 3,
    GetVisible = 4,
    SetVisible = 5,
    GetParent = 6,
    GetChildren = 7,
}

impl TryFrom<u32> for NodeOp {
    type Error = HudError;

    fn try_from(code: u32) -> Result<Self> {
        Ok(match code {
            1 => NodeOp::AddChild,
            2 => NodeOp::RemoveChild,
            3 => NodeOp::SetFocus,
            4 => NodeOp::GetVisible,
            5 => NodeOp::SetVisible,
            6 => NodeOp::GetParent,
            7 => NodeOp::GetChildren,
            other => return Err(HudError::UnknownOperation(other)),
        })
    }
}

/// Untyped argument accompanying an operation code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    None,
    Node(NodeId),
    Bool(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRequest {
    /// Register the node as the target's last child.
    AddChild(NodeId),
    /// Unregister the node if it is one of the target's children.
    RemoveChild(NodeId),
    /// Focus the node if it is one of the target's children.
    SetFocus(NodeId),
    GetVisible,
    SetVisible(bool),
    GetParent,
    GetChildren,
}

impl NodeRequest {
    pub fn decode(code: u32, payload: Payload) -> Result<Self> {
        let op = NodeOp::try_from(code)?;
        let req = match (op, payload) {
            (NodeOp::AddChild, Payload::Node(id)) => NodeRequest::AddChild(id),
            (NodeOp::RemoveChild, Payload::Node(id)) => NodeRequest::RemoveChild(id),
            (NodeOp::SetFocus, Payload::Node(id)) => NodeRequest::SetFocus(id),
            (NodeOp::GetVisible, Payload::None) => NodeRequest::GetVisible,
            (NodeOp::SetVisible, Payload::Bool(v)) => NodeRequest::SetVisible(v),
            (NodeOp::GetParent, Payload::None) => NodeRequest::GetParent,
            (NodeOp::GetChildren, Payload::None) => NodeRequest::GetChildren,
            (op, _) => return Err(HudError::InvalidPayload(op)),
        };
        Ok(req)
    }

    pub fn op(&self) -> NodeOp {
        match self {
            NodeRequest::AddChild(_) => NodeOp::AddChild,
            NodeRequest::RemoveChild(_) => NodeOp::RemoveChild,
            NodeRequest::SetFocus(_) => NodeOp::SetFocus,
            NodeRequest::GetVisible => NodeOp::GetVisible,
            NodeRequest::SetVisible(_) => NodeOp::SetVisible,
            NodeRequest::GetParent => NodeOp::GetParent,
            NodeRequest::GetChildren => NodeOp::GetChildren,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeResponse {
    /// Whether a mutating request changed (or confirmed) the tree.
    Applied(bool),
    Visible(bool),
    Parent(Option<NodeId>),
    Children(Vec<NodeId>),
}

impl HudTree {
    /// Applies `req` to `target`. Tree-shape mismatches (removing a node
    /// that is not a child, focusing a stranger) answer `Applied(false)`.
    pub fn access(&mut self, target: NodeId, req: NodeRequest) -> Result<NodeResponse> {
        if !self.contains(target) {
            return Err(HudError::StaleNode(target));
        }
        let res = match req {
            NodeRequest::AddChild(child) => NodeResponse::Applied(self.register(target, child)),
            NodeRequest::RemoveChild(child) => {
                let owned = self.parent(child) == Some(target);
                NodeResponse::Applied(owned && self.unregister(child))
            }
            NodeRequest::SetFocus(child) => {
                let owned = self.parent(child) == Some(target);
                NodeResponse::Applied(owned && self.set_focus(child))
            }
            NodeRequest::GetVisible => NodeResponse::Visible(self.is_visible(target)),
            NodeRequest::SetVisible(visible) => {
                self.set_visible(target, visible);
                NodeResponse::Applied(true)
            }
            NodeRequest::GetParent => NodeResponse::Parent(self.parent(target)),
            NodeRequest::GetChildren => NodeResponse::Children(self.children(target).to_vec()),
        };
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    #[test]
    fn decode_rejects_unknown_codes_and_bad_payloads() {
        assert_eq!(
            NodeRequest::decode(99, Payload::None),
            Err(HudError::UnknownOperation(99))
        );
        assert_eq!(
            NodeRequest::decode(NodeOp::SetVisible as u32, Payload::None),
            Err(HudError::InvalidPayload(NodeOp::SetVisible))
        );
        assert_eq!(
            NodeRequest::decode(NodeOp::SetVisible as u32, Payload::Bool(false)),
            Ok(NodeRequest::SetVisible(false))
        );
    }

    #[test]
    fn op_codes_round_trip() {
        for code in 1..=7u32 {
            let op = NodeOp::try_from(code).unwrap();
            assert_eq!(op as u32, code);
        }
    }

    #[test]
    fn remove_and_focus_by_identity() {
        let mut tree = HudTree::new();
        let root = tree.insert(Group);
        let a = tree.insert(Group);
        let b = tree.insert(Group);
        let stranger = tree.insert(Group);
        tree.register_children(root, [a, b]);

        assert_eq!(
            tree.access(root, NodeRequest::SetFocus(a)),
            Ok(NodeResponse::Applied(true))
        );
        assert_eq!(
            tree.access(root, NodeRequest::GetChildren),
            Ok(NodeResponse::Children(vec![b, a]))
        );

        assert_eq!(
            tree.access(root, NodeRequest::RemoveChild(stranger)),
            Ok(NodeResponse::Applied(false))
        );
        assert_eq!(
            tree.access(root, NodeRequest::RemoveChild(b)),
            Ok(NodeResponse::Applied(true))
        );
        assert_eq!(tree.access(b, NodeRequest::GetParent), Ok(NodeResponse::Parent(None)));
    }

    #[test]
    fn stale_target_is_an_error() {
        let mut tree = HudTree::new();
        let gone = tree.insert(Group);
        tree.remove(gone);
        assert_eq!(
            tree.access(gone, NodeRequest::GetVisible),
            Err(HudError::StaleNode(gone))
        );
    }

    #[test]
    fn visibility_through_the_boundary() {
        let mut tree = HudTree::new();
        let node = tree.insert(Group);
        let req = NodeRequest::decode(NodeOp::SetVisible as u32, Payload::Bool(false)).unwrap();
        tree.access(node, req).unwrap();
        assert_eq!(
            tree.access(node, NodeRequest::GetVisible),
            Ok(NodeResponse::Visible(false))
        );
    }
}
