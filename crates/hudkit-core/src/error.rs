use std::any::Any;

use thiserror::Error;

use crate::{NodeId, NodeOp};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HudError {
    #[error("node {0:?} does not exist")]
    StaleNode(NodeId),
    #[error("unknown node operation code {0}")]
    UnknownOperation(u32),
    #[error("payload does not fit operation {0:?}")]
    InvalidPayload(NodeOp),
    #[error("hook of element {node:?} panicked: {message}")]
    HookFault { node: NodeId, message: String },
}

pub type Result<T, E = HudError> = std::result::Result<T, E>;

pub(crate) fn panic_message(err: Box<dyn Any + Send>) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}
