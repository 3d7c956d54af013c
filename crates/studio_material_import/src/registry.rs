// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry mapping Studio node tags to target node types.
//!
//! The registry is immutable once built and is handed to every import
//! session by reference. Besides the tag table it carries the alias tables
//! (keyed by target node type id, since several tags may share one type), the
//! positional fallback table and the passthrough socket types used when a
//! group input is wired straight into a group output.

use crate::diagnostics::ImportError;
use indexmap::IndexMap;
use studio_material_graph::{Node, NodeType, SocketDirection, SocketType};

/// Target type id of group nodes
pub const GROUP_TYPE: &str = "ShaderNodeGroup";

/// Target type id of a group's input boundary node
pub const GROUP_INPUT_TYPE: &str = "NodeGroupInput";

/// Target type id of a group's output boundary node
pub const GROUP_OUTPUT_TYPE: &str = "NodeGroupOutput";

/// Target type id of the material output node
pub const MATERIAL_OUTPUT_TYPE: &str = "ShaderNodeOutputMaterial";

/// Tag whose node type combines two shader contributions
pub const MERGE_TAG: &str = "add_closure";

/// Mode of a Mix node, selecting which socket set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixMode {
    /// Scalar mix (`FLOAT`)
    Float,
    /// Vector mix (`VECTOR`)
    Vector,
    /// Color mix (`RGBA`)
    Rgba,
}

impl MixMode {
    /// Value of the node's `data_type` property
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::Float => "FLOAT",
            Self::Vector => "VECTOR",
            Self::Rgba => "RGBA",
        }
    }

    /// Input and output indices that are active in this mode
    pub fn active_sockets(&self) -> (&'static [usize], &'static [usize]) {
        match self {
            Self::Float => (&[0, 2, 3], &[0]),
            Self::Vector => (&[0, 4, 5], &[1]),
            Self::Rgba => (&[0, 6, 7], &[2]),
        }
    }
}

/// Closed set of node behaviors.
///
/// The variant is fixed when a tag is resolved; configuration of a new node
/// dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Sockets and enumerated properties only
    Plain,
    /// Scalar constant driven by the `value` attribute
    Value,
    /// RGB constant; the vector variant renames its output
    Rgb {
        /// Whether the constant stands for a vector
        vector: bool,
    },
    /// Mix node in a fixed mode
    Mix(MixMode),
    /// Image texture bound to an asset
    ImageTexture,
    /// Group input boundary
    GroupInput,
    /// Group output boundary
    GroupOutput,
    /// Group instance
    Group,
    /// Group instance of a built-in subgraph
    CustomGroup {
        /// Subgraph instantiated by the tag
        subgraph: String,
    },
}

/// An enumerated node property set from a tag attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    /// Attribute name in the source document
    pub attribute: &'static str,
    /// Property name on the target node
    pub property: &'static str,
    /// Accepted values after normalization; empty accepts any text verbatim
    pub values: &'static [&'static str],
    /// Value the property starts with
    pub default: &'static str,
}

impl PropertySpec {
    /// Normalize an attribute value to the target vocabulary
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if self.values.is_empty() {
            return Some(raw.to_string());
        }
        let upper = raw.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        self.values.contains(&upper.as_str()).then_some(upper)
    }
}

/// Where an alias points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// Another socket name
    Name(String),
    /// A socket position
    Index(usize),
}

impl From<&str> for AliasTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<usize> for AliasTarget {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Alias tables of one target node type
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Input aliases
    pub inputs: IndexMap<String, AliasTarget>,
    /// Output aliases
    pub outputs: IndexMap<String, AliasTarget>,
}

impl AliasTable {
    /// Aliases for one direction
    pub fn for_direction(&self, direction: SocketDirection) -> &IndexMap<String, AliasTarget> {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }
}

/// A registered node tag
#[derive(Debug, Clone)]
pub struct NodeTypeEntry {
    /// Studio tag
    pub tag: String,
    /// Behavior
    pub kind: NodeKind,
    /// Target node type with its default socket layout
    pub node_type: NodeType,
    /// Enumerated properties set from attributes
    pub properties: Vec<PropertySpec>,
}

/// Registry of node tags and lookup tables
#[derive(Debug, Clone)]
pub struct NodeTypeRegistry {
    entries: IndexMap<String, NodeTypeEntry>,
    aliases: IndexMap<String, AliasTable>,
    positional: IndexMap<String, usize>,
    passthroughs: IndexMap<String, SocketType>,
    material_output: NodeType,
}

impl NodeTypeRegistry {
    /// Create a registry with only a material output type
    pub fn new(material_output: NodeType) -> Self {
        Self {
            entries: IndexMap::new(),
            aliases: IndexMap::new(),
            positional: IndexMap::new(),
            passthroughs: IndexMap::new(),
            material_output,
        }
    }

    /// Register a node tag
    pub fn register(&mut self, tag: &str, kind: NodeKind, node_type: NodeType, properties: Vec<PropertySpec>) {
        self.entries.insert(
            tag.to_string(),
            NodeTypeEntry {
                tag: tag.to_string(),
                kind,
                node_type,
                properties,
            },
        );
    }

    /// Add an alias for a socket of a target node type
    pub fn alias(
        &mut self,
        type_id: &str,
        direction: SocketDirection,
        name: &str,
        target: impl Into<AliasTarget>,
    ) {
        let table = self.aliases.entry(type_id.to_string()).or_default();
        let map = match direction {
            SocketDirection::Input => &mut table.inputs,
            SocketDirection::Output => &mut table.outputs,
        };
        map.insert(name.to_string(), target.into());
    }

    /// Add a positional fallback for a generic socket name
    pub fn positional(&mut self, name: &str, index: usize) {
        self.positional.insert(name.to_string(), index);
    }

    /// Add a passthrough socket type
    pub fn passthrough(&mut self, name: &str, socket_type: SocketType) {
        self.passthroughs.insert(name.to_string(), socket_type);
    }

    /// Registry for Studio material documents
    pub fn studio() -> Self {
        crate::studio_nodes::create_studio_registry()
    }

    /// Resolve a Studio tag
    pub fn resolve_node_type(&self, tag: &str) -> Result<&NodeTypeEntry, ImportError> {
        self.entries
            .get(tag)
            .ok_or_else(|| ImportError::UnrecognizedNodeTag { tag: tag.to_string() })
    }

    /// Entry of the node type that merges shader contributions
    pub fn merge_type(&self) -> Result<&NodeType, ImportError> {
        self.resolve_node_type(MERGE_TAG).map(|entry| &entry.node_type)
    }

    /// Material output node type
    pub fn material_output(&self) -> &NodeType {
        &self.material_output
    }

    /// Alias tables for a target node type
    pub fn aliases(&self, type_id: &str) -> Option<&AliasTable> {
        self.aliases.get(type_id)
    }

    /// Positional fallback for a generic socket name
    pub fn positional_index(&self, name: &str) -> Option<usize> {
        self.positional.get(name).copied()
    }

    /// Socket type of a group passthrough socket
    pub fn passthrough_type(&self, name: &str) -> Option<SocketType> {
        self.passthroughs.get(name).copied()
    }

    /// Whether a node's sockets come from a subgraph interface
    pub fn has_dynamic_sockets(&self, node: &Node) -> bool {
        matches!(node.node_type.as_str(), GROUP_TYPE | GROUP_INPUT_TYPE | GROUP_OUTPUT_TYPE)
    }
}
