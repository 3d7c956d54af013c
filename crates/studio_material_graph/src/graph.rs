// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and links.

use crate::link::{Link, LinkId, SocketRef};
use crate::node::{Node, NodeId};
use crate::socket::SocketDirection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A shader node graph (a material tree or a group's subgraph)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Node name index
    names: IndexMap<String, NodeId>,
    /// Links in creation order
    links: IndexMap<LinkId, Link>,
    /// Next link id
    next_link: u64,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            names: IndexMap::new(),
            links: IndexMap::new(),
            next_link: 0,
        }
    }

    /// Add a node to the graph, assigning its id from its name
    pub fn add_node(&mut self, mut node: Node) -> Result<NodeId, GraphError> {
        if self.names.contains_key(&node.name) {
            return Err(GraphError::DuplicateName(node.name));
        }
        let id = NodeId::from_name(&self.name, &node.name);
        node.id = id;
        self.names.insert(node.name.clone(), id);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Return `base` if no node uses it, otherwise the first free `base.NNN`
    pub fn unique_name(&self, base: &str) -> String {
        if !self.names.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !self.names.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Give a node a new unused name.
    ///
    /// The node keeps its id. A label that followed the old name follows the
    /// new one.
    pub fn rename_node(&mut self, node_id: NodeId, name: &str) -> Result<(), GraphError> {
        if self.names.contains_key(name) {
            return Err(GraphError::DuplicateName(name.to_string()));
        }
        let node = self.nodes.get_mut(&node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        let old = std::mem::replace(&mut node.name, name.to_string());
        if node.label == old {
            node.label = name.to_string();
        }
        self.names.shift_remove(&old);
        self.names.insert(name.to_string(), node_id);
        Ok(())
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Look up a node id by name
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Look up a node by name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.nodes.get(&id))
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all nodes mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Link an output socket to an input socket.
    ///
    /// Any link already arriving at the input is removed first, so an input
    /// never carries more than one physical link.
    pub fn connect(&mut self, from: SocketRef, to: SocketRef) -> Result<LinkId, ConnectionError> {
        let source_node = self.nodes.get(&from.node).ok_or(ConnectionError::NodeNotFound(from.node))?;
        let target_node = self.nodes.get(&to.node).ok_or(ConnectionError::NodeNotFound(to.node))?;

        let source = source_node
            .socket(SocketDirection::Output, from.index)
            .ok_or(ConnectionError::SocketNotFound(from))?;
        let target = target_node
            .socket(SocketDirection::Input, to.index)
            .ok_or(ConnectionError::SocketNotFound(to))?;

        if !source.can_connect(target) {
            return Err(ConnectionError::IncompatibleSockets {
                from: source.socket_type,
                to: target.socket_type,
            });
        }

        if from.node == to.node {
            return Err(ConnectionError::SelfLoop);
        }

        self.links.retain(|_, link| link.to != to);

        let id = LinkId(self.next_link);
        self.next_link += 1;
        self.links.insert(id, Link::new(id, from, to));
        Ok(id)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.shift_remove(&link_id)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Links arriving at an input socket
    pub fn links_to(&self, socket: SocketRef) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.to == socket)
    }

    /// Links arriving at any input of a node
    pub fn incoming(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.to.node == node_id)
    }

    /// Links leaving any output of a node
    pub fn outgoing(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.from.node == node_id)
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Get nodes in topological order (producers before consumers).
    ///
    /// Nodes that become ready at the same time keep insertion order.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut pending: IndexMap<NodeId, usize> = self.nodes.keys().map(|id| (*id, 0)).collect();
        for link in self.links.values() {
            if let Some(count) = pending.get_mut(&link.to.node) {
                *count += 1;
            }
        }

        let mut ready: VecDeque<NodeId> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(node_id) = ready.pop_front() {
            order.push(node_id);
            for link in self.outgoing(node_id) {
                if let Some(count) = pending.get_mut(&link.to.node) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(link.to.node);
                    }
                }
            }
        }

        if let Some((stuck, _)) = pending.iter().find(|(_, count)| **count > 0) {
            return Err(CycleError(*stuck));
        }
        Ok(order)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when adding a node
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Another node already uses this name
    #[error("Node name already in use: {0}")]
    DuplicateName(String),

    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),
}

/// Error when creating a link
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Socket index out of range
    #[error("Socket not found: {0:?}")]
    SocketNotFound(SocketRef),

    /// Incompatible socket types
    #[error("Cannot link {from} output to {to} input")]
    IncompatibleSockets {
        /// Source socket type
        from: crate::socket::SocketType,
        /// Target socket type
        to: crate::socket::SocketType,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

/// Error when graph contains a cycle
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Graph contains a cycle through node {0:?}")]
pub struct CycleError(pub NodeId);
