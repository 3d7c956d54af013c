// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shader graph.

use crate::socket::{Socket, SocketDirection};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Height of a node header in graph units
pub const NODE_HEADER_HEIGHT: f32 = 36.0;

/// Height of one socket row in graph units
pub const SOCKET_ROW_HEIGHT: f32 = 22.0;

/// Default node width in graph units
pub const DEFAULT_NODE_WIDTH: f32 = 140.0;

/// Unique identifier for a node
///
/// Ids are name-based so that rebuilding the same document yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Derive the id of the node called `node_name` inside `graph_name`
    pub fn from_name(graph_name: &str, node_name: &str) -> Self {
        let key = format!("{graph_name}\u{1f}{node_name}");
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Constants and geometry inputs
    Input,
    /// Material output
    Output,
    /// BSDFs and closure combinators
    Shader,
    /// Procedural and image textures
    Texture,
    /// Color adjustments
    Color,
    /// Vector operations
    Vector,
    /// Math and conversion
    Converter,
    /// Group nodes and group boundaries
    Group,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Target type identifier (e.g. `ShaderNodeMath`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Default width in graph units
    pub width: f32,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

impl NodeType {
    /// Create a node type with the default width and no sockets
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            width: DEFAULT_NODE_WIDTH,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the default width
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set the input sockets
    pub fn with_inputs(mut self, inputs: Vec<Socket>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the output sockets
    pub fn with_outputs(mut self, outputs: Vec<Socket>) -> Self {
        self.outputs = outputs;
        self
    }
}

/// Image bound to an image texture node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Path the image was loaded from, or the requested path for placeholders
    pub path: PathBuf,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// True when the image could not be found and a blank stands in for it
    pub placeholder: bool,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID, assigned when the node is added to a graph
    pub id: NodeId,
    /// Node type ID
    pub node_type: String,
    /// Unique name within the owning graph
    pub name: String,
    /// Display label
    pub label: String,
    /// Position in graph space
    pub position: [f32; 2],
    /// Width and height in graph space
    pub dimensions: [f32; 2],
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Whether the node is drawn collapsed
    pub collapsed: bool,
    /// Enumerated node-level configuration (e.g. `operation = "ADD"`)
    pub properties: IndexMap<String, String>,
    /// Subgraph instantiated by a group node
    pub subgraph: Option<String>,
    /// Image used by an image texture node
    pub image: Option<ImageHandle>,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut node = Self {
            id: NodeId(Uuid::nil()),
            node_type: node_type.id.clone(),
            label: name.clone(),
            name,
            position: [0.0, 0.0],
            dimensions: [node_type.width, 0.0],
            inputs: node_type.inputs.clone(),
            outputs: node_type.outputs.clone(),
            collapsed: false,
            properties: IndexMap::new(),
            subgraph: None,
            image: None,
        };
        node.refresh_dimensions();
        node
    }

    /// Sockets for one direction
    pub fn sockets(&self, direction: SocketDirection) -> &[Socket] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// Mutable sockets for one direction
    pub fn sockets_mut(&mut self, direction: SocketDirection) -> &mut Vec<Socket> {
        match direction {
            SocketDirection::Input => &mut self.inputs,
            SocketDirection::Output => &mut self.outputs,
        }
    }

    /// Get a socket by direction and index
    pub fn socket(&self, direction: SocketDirection, index: usize) -> Option<&Socket> {
        self.sockets(direction).get(index)
    }

    /// Find a socket index by exact name.
    ///
    /// Several sockets may share a name (one per mode); enabled sockets win.
    pub fn find_socket(&self, direction: SocketDirection, name: &str) -> Option<usize> {
        let sockets = self.sockets(direction);
        sockets
            .iter()
            .position(|s| s.enabled && s.name == name)
            .or_else(|| sockets.iter().position(|s| s.name == name))
    }

    /// Names of all sockets in one direction, in order
    pub fn socket_names(&self, direction: SocketDirection) -> Vec<String> {
        self.sockets(direction).iter().map(|s| s.name.clone()).collect()
    }

    /// Set a node property
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a node property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Recompute the node height from its visible sockets
    pub fn refresh_dimensions(&mut self) {
        let rows = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .filter(|s| s.enabled)
            .count();
        self.dimensions[1] = NODE_HEADER_HEIGHT + SOCKET_ROW_HEIGHT * rows as f32;
    }

    /// Width in graph space
    pub fn width(&self) -> f32 {
        self.dimensions[0]
    }

    /// Height in graph space
    pub fn height(&self) -> f32 {
        self.dimensions[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::SocketType;

    fn mix_type() -> NodeType {
        NodeType::new("ShaderNodeMix", "Mix", NodeCategory::Color)
            .with_inputs(vec![
                Socket::input("Factor", SocketType::Float),
                Socket::input("A", SocketType::Float).disabled(),
                Socket::input("A", SocketType::Color),
            ])
            .with_outputs(vec![Socket::output("Result", SocketType::Color)])
    }

    #[test]
    fn test_node_ids_are_name_based() {
        assert_eq!(NodeId::from_name("Mat", "BSDF"), NodeId::from_name("Mat", "BSDF"));
        assert_ne!(NodeId::from_name("Mat", "BSDF"), NodeId::from_name("Other", "BSDF"));
    }

    #[test]
    fn test_find_socket_prefers_enabled() {
        let node = Node::new(&mix_type(), "Mix");
        assert_eq!(node.find_socket(SocketDirection::Input, "A"), Some(2));
        assert_eq!(node.find_socket(SocketDirection::Output, "Result"), Some(0));
        assert_eq!(node.find_socket(SocketDirection::Input, "B"), None);
    }

    #[test]
    fn test_dimensions_follow_visible_sockets() {
        let node = Node::new(&mix_type(), "Mix");
        assert_eq!(node.width(), DEFAULT_NODE_WIDTH);
        assert_eq!(node.height(), NODE_HEADER_HEIGHT + SOCKET_ROW_HEIGHT * 3.0);
    }
}
