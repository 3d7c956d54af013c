// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Identifier for a link, allocated sequentially by its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub u64);

/// A socket addressed by node and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    /// Owning node
    pub node: NodeId,
    /// Index into the node's inputs or outputs
    pub index: usize,
}

impl SocketRef {
    /// Create a socket reference
    pub fn new(node: NodeId, index: usize) -> Self {
        Self { node, index }
    }
}

/// A link from an output socket to an input socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Link ID
    pub id: LinkId,
    /// Source output socket
    pub from: SocketRef,
    /// Target input socket
    pub to: SocketRef,
}

impl Link {
    /// Create a new link
    pub fn new(id: LinkId, from: SocketRef, to: SocketRef) -> Self {
        Self { id, from, to }
    }
}
