// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subgraph library.
//!
//! Groups are stored by name for the whole import session. A group can be
//! referenced before it is defined; the reference creates an empty record
//! whose interface is then grown by later references and by the definition
//! itself.

use crate::diagnostics::ImportError;
use crate::interface::{BindOutcome, Interface};
use crate::registry::{GROUP_INPUT_TYPE, GROUP_OUTPUT_TYPE, GROUP_TYPE};
use indexmap::IndexMap;
use studio_material_graph::{Graph, Layout, Node, Socket, SocketDirection, SocketType};

/// A named group graph with its interface
#[derive(Debug, Clone)]
pub struct Subgraph {
    /// Group name
    pub name: String,
    /// Graph inside the group
    pub graph: Graph,
    /// Boundary sockets
    pub interface: Interface,
    /// Whether the group's own definition has been processed
    pub defined: bool,
    /// Whether the group was created by the importer rather than a document
    pub builtin: bool,
    /// Layout of the finished graph
    pub layout: Option<Layout>,
}

impl Subgraph {
    /// Create an empty, undefined group
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            graph: Graph::new(name.clone()),
            interface: Interface::new(name.clone()),
            name,
            defined: false,
            builtin: false,
            layout: None,
        }
    }
}

/// How a node presents a group interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRole {
    /// Group input node: interface inputs appear as outputs
    GroupInput,
    /// Group output node: interface outputs appear as inputs
    GroupOutput,
    /// Group instance: interface inputs and outputs as they are
    Instance,
}

impl BoundaryRole {
    /// Role of a node, if its sockets come from an interface
    pub fn of(node: &Node) -> Option<Self> {
        match node.node_type.as_str() {
            GROUP_INPUT_TYPE => Some(Self::GroupInput),
            GROUP_OUTPUT_TYPE => Some(Self::GroupOutput),
            GROUP_TYPE => Some(Self::Instance),
            _ => None,
        }
    }

    /// Interface direction backing a node socket direction
    pub fn interface_direction(&self, socket_direction: SocketDirection) -> Option<SocketDirection> {
        match (self, socket_direction) {
            (Self::GroupInput, SocketDirection::Output) => Some(SocketDirection::Input),
            (Self::GroupOutput, SocketDirection::Input) => Some(SocketDirection::Output),
            (Self::Instance, direction) => Some(direction),
            _ => None,
        }
    }
}

/// Append interface sockets a node does not have yet.
///
/// Interfaces only grow, so the node's sockets are always a prefix of the
/// interface. Returns the number of sockets added.
pub fn realize_interface(node: &mut Node, role: BoundaryRole, interface: &Interface) -> usize {
    let mut added = 0;
    for direction in [SocketDirection::Input, SocketDirection::Output] {
        let Some(source) = role.interface_direction(direction) else {
            continue;
        };
        let sockets = node.sockets_mut(direction);
        let missing: Vec<(String, SocketType)> = interface
            .sockets(source)
            .skip(sockets.len())
            .map(|s| (s.name.clone(), s.socket_type))
            .collect();
        added += missing.len();
        sockets.extend(
            missing
                .into_iter()
                .map(|(name, socket_type)| Socket::new(name, socket_type, direction)),
        );
    }
    if added > 0 {
        node.refresh_dimensions();
    }
    added
}

/// Realize interfaces on every group-related node of a graph
pub fn realize_graph<'a>(graph: &mut Graph, lookup: impl Fn(&str) -> Option<&'a Interface>) {
    let own = graph.name.clone();
    for node in graph.nodes_mut() {
        let Some(role) = BoundaryRole::of(node) else {
            continue;
        };
        let key = match role {
            BoundaryRole::Instance => node.subgraph.clone(),
            _ => Some(own.clone()),
        };
        if let Some(interface) = key.as_deref().and_then(&lookup) {
            realize_interface(node, role, interface);
        }
    }
}

/// All groups known to an import session
#[derive(Debug, Clone, Default)]
pub struct SubgraphLibrary {
    subgraphs: IndexMap<String, Subgraph>,
}

impl SubgraphLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a group
    pub fn get(&self, name: &str) -> Option<&Subgraph> {
        self.subgraphs.get(name)
    }

    /// Get a group mutably
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Subgraph> {
        self.subgraphs.get_mut(name)
    }

    /// Whether a group exists
    pub fn contains(&self, name: &str) -> bool {
        self.subgraphs.contains_key(name)
    }

    /// Interface of a group
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.subgraphs.get(name).map(|s| &s.interface)
    }

    /// Groups in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Subgraph> {
        self.subgraphs.values()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }

    /// Make sure a group exists. Returns true when this created it.
    pub fn reference(&mut self, name: &str) -> bool {
        if self.subgraphs.contains_key(name) {
            return false;
        }
        self.subgraphs.insert(name.to_string(), Subgraph::new(name));
        true
    }

    /// Add a group built by the importer
    pub fn insert_builtin(&mut self, mut subgraph: Subgraph) {
        subgraph.builtin = true;
        subgraph.defined = true;
        self.subgraphs.insert(subgraph.name.clone(), subgraph);
    }

    /// Start processing a group definition.
    ///
    /// The group's graph is handed to the caller and must be returned with
    /// [`SubgraphLibrary::finish_definition`].
    pub fn begin_definition(&mut self, name: &str) -> Result<Graph, ImportError> {
        self.reference(name);
        let subgraph = self
            .subgraphs
            .get_mut(name)
            .ok_or_else(|| ImportError::DuplicateUnit { name: name.to_string() })?;
        if subgraph.defined {
            return Err(ImportError::DuplicateUnit { name: name.to_string() });
        }
        subgraph.defined = true;
        Ok(std::mem::replace(&mut subgraph.graph, Graph::new(name)))
    }

    /// Store a finished group graph
    pub fn finish_definition(&mut self, name: &str, graph: Graph, layout: Option<Layout>) {
        if let Some(subgraph) = self.subgraphs.get_mut(name) {
            subgraph.graph = graph;
            subgraph.layout = layout;
        }
    }

    /// Bind a boundary socket of a group, creating the group if needed.
    ///
    /// The first request for a (name, direction) fixes its type; a later
    /// request with another type is an error unless it is the legacy
    /// exception.
    pub fn get_or_create_boundary_socket(
        &mut self,
        subgraph: &str,
        name: &str,
        direction: SocketDirection,
        socket_type: SocketType,
    ) -> Result<BindOutcome, ImportError> {
        self.reference(subgraph);
        let interface = self
            .subgraphs
            .get_mut(subgraph)
            .map(|s| &mut s.interface)
            .ok_or_else(|| ImportError::UnknownNode { name: subgraph.to_string() })?;
        Ok(interface.bind(name, direction, socket_type)?)
    }

    /// Replace a group's interface after a checked batch of bindings
    pub fn replace_interface(&mut self, subgraph: &str, interface: Interface) {
        if let Some(entry) = self.subgraphs.get_mut(subgraph) {
            entry.interface = interface;
        }
    }

    /// Realize current interfaces on the group nodes of a graph
    pub fn realize(&self, graph: &mut Graph) {
        realize_graph(graph, |name| self.interface(name));
    }

    /// Realize current interfaces on the group nodes of every stored group
    pub fn realize_all(&mut self) {
        let interfaces: IndexMap<String, Interface> = self
            .subgraphs
            .iter()
            .map(|(name, s)| (name.clone(), s.interface.clone()))
            .collect();
        for subgraph in self.subgraphs.values_mut() {
            realize_graph(&mut subgraph.graph, |name| interfaces.get(name));
        }
    }

    /// Groups referenced but never defined
    pub fn undefined(&self) -> impl Iterator<Item = &str> {
        self.subgraphs
            .values()
            .filter(|s| !s.defined)
            .map(|s| s.name.as_str())
    }
}
