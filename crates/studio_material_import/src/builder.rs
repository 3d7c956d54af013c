// SPDX-License-Identifier: MIT OR Apache-2.0
//! Directive processing.
//!
//! An [`ImportSession`] imports the units of one or more documents in order.
//! Each unit is built by a [`GraphBuilder`] that processes its directives
//! strictly in document order, then the finished graph is laid out. Errors
//! are recorded as diagnostics; a failing directive is skipped and the next
//! one is processed.

use crate::assets::AssetLoader;
use crate::custom_groups::builtin_subgraph;
use crate::diagnostics::{Diagnostic, Diagnostics, ImportError, Severity};
use crate::document::{
    ConnectDecl, Directive, Document, GroupInstanceDecl, InterfaceDecl, NodeDecl, Unit, UnitKind, CONNECT_TAG,
    GROUP_TAG,
};
use crate::interface::{BindOutcome, Interface};
use crate::library::{realize_interface, BoundaryRole, SubgraphLibrary};
use crate::literal::parse_literal;
use crate::merge::insert_link;
use crate::registry::{NodeKind, NodeTypeRegistry};
use crate::resolver::resolve_socket;
use crate::settings::ImportSettings;
use indexmap::IndexMap;
use std::collections::HashSet;
use studio_material_graph::{arrange, Graph, Layout, Node, NodeId, SocketDirection, SocketRef, SocketType};

/// Name of the material output node every material starts with
pub const MATERIAL_OUTPUT_NAME: &str = "Output";

/// An imported material
#[derive(Debug, Clone)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Material node tree
    pub graph: Graph,
    /// Layout of the tree
    pub layout: Option<Layout>,
}

/// Everything an import session produced
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Materials in document order
    pub materials: IndexMap<String, Material>,
    /// Groups, including forward references that were never defined
    pub library: SubgraphLibrary,
    /// Diagnostics in the order they were raised
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportResult {
    /// Get a material
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Whether any diagnostic is an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Import of one batch of documents.
///
/// The registry and settings are read-only for the whole session.
pub struct ImportSession<'a> {
    registry: &'a NodeTypeRegistry,
    settings: &'a ImportSettings,
    assets: &'a dyn AssetLoader,
    library: SubgraphLibrary,
    materials: IndexMap<String, Material>,
    diagnostics: Diagnostics,
}

impl<'a> ImportSession<'a> {
    /// Create a session
    pub fn new(registry: &'a NodeTypeRegistry, settings: &'a ImportSettings, assets: &'a dyn AssetLoader) -> Self {
        Self {
            registry,
            settings,
            assets,
            library: SubgraphLibrary::new(),
            materials: IndexMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Import every unit of a document
    pub fn import_document(&mut self, document: &Document) {
        for unit in &document.units {
            self.import_unit(unit);
        }
    }

    /// Import one material or group
    pub fn import_unit(&mut self, unit: &Unit) {
        tracing::debug!("Importing {:?} '{}'", unit.kind, unit.name);

        let graph = match unit.kind {
            UnitKind::Material => {
                if self.materials.contains_key(&unit.name) {
                    self.diagnostics
                        .push(&unit.name, None, ImportError::DuplicateUnit { name: unit.name.clone() });
                    return;
                }
                let mut graph = Graph::new(unit.name.clone());
                let output = Node::new(self.registry.material_output(), MATERIAL_OUTPUT_NAME);
                if let Err(e) = graph.add_node(output) {
                    self.diagnostics.push(&unit.name, None, e.into());
                }
                graph
            }
            UnitKind::Group => match self.library.begin_definition(&unit.name) {
                Ok(graph) => graph,
                Err(e) => {
                    self.diagnostics.push(&unit.name, None, e);
                    return;
                }
            },
        };

        let mut builder = GraphBuilder {
            registry: self.registry,
            assets: self.assets,
            library: &mut self.library,
            diagnostics: &mut self.diagnostics,
            unit: unit.name.clone(),
            kind: unit.kind,
            graph,
            synthesized: HashSet::new(),
        };
        match unit.kind {
            UnitKind::Group => builder.declare_interface(&unit.interface),
            UnitKind::Material => {
                for decl in &unit.interface {
                    builder.note(
                        None,
                        ImportError::BoundaryOutsideGroup {
                            tag: decl.direction.as_str().to_string(),
                        },
                    );
                }
            }
        }
        for (index, directive) in unit.directives.iter().enumerate() {
            if let Err(e) = builder.process(index, directive) {
                builder.diagnostics.push(&unit.name, Some(index), e);
            }
        }
        let mut graph = builder.graph;

        self.library.realize(&mut graph);
        let layout = match arrange(&mut graph, &self.settings.layout, self.settings.arrange_nodes) {
            Ok(layout) => Some(layout),
            Err(e) => {
                self.diagnostics.push(&unit.name, None, e.into());
                None
            }
        };

        tracing::info!(
            "Imported '{}': {} nodes, {} links",
            unit.name,
            graph.node_count(),
            graph.link_count()
        );

        match unit.kind {
            UnitKind::Material => {
                self.materials.insert(
                    unit.name.clone(),
                    Material {
                        name: unit.name.clone(),
                        graph,
                        layout,
                    },
                );
            }
            UnitKind::Group => self.library.finish_definition(&unit.name, graph, layout),
        }
    }

    /// Groups known so far
    pub fn library(&self) -> &SubgraphLibrary {
        &self.library
    }

    /// Materials imported so far
    pub fn materials(&self) -> &IndexMap<String, Material> {
        &self.materials
    }

    /// Diagnostics raised so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Finish the batch.
    ///
    /// Group nodes are brought up to date with interfaces that grew after
    /// their graph was built.
    pub fn finish(mut self) -> ImportResult {
        for group in self.library.undefined() {
            tracing::warn!("Group '{}' was referenced but never defined", group);
        }
        self.library.realize_all();
        for material in self.materials.values_mut() {
            self.library.realize(&mut material.graph);
        }
        ImportResult {
            materials: self.materials,
            library: self.library,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}

/// Import a single document in its own session
pub fn import_document(
    registry: &NodeTypeRegistry,
    settings: &ImportSettings,
    assets: &dyn AssetLoader,
    document: &Document,
) -> ImportResult {
    let mut session = ImportSession::new(registry, settings, assets);
    session.import_document(document);
    session.finish()
}

/// Builds the graph of one unit
pub struct GraphBuilder<'s> {
    registry: &'s NodeTypeRegistry,
    assets: &'s dyn AssetLoader,
    library: &'s mut SubgraphLibrary,
    diagnostics: &'s mut Diagnostics,
    unit: String,
    kind: UnitKind,
    graph: Graph,
    /// Nodes added by the importer rather than declared
    synthesized: HashSet<NodeId>,
}

/// One end of a connection after resolution
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    /// Existing socket
    Socket(SocketRef),
    /// Boundary socket that does not exist yet
    Unbound(NodeId),
}

impl<'s> GraphBuilder<'s> {
    /// Process one directive
    pub fn process(&mut self, index: usize, directive: &Directive) -> Result<(), ImportError> {
        match directive {
            Directive::Node(decl) => self.node(index, decl),
            Directive::Connect(decl) => self.connect(index, decl),
            Directive::Group(decl) => self.group_instance(index, decl, None),
        }
    }

    /// The graph built so far
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn note(&mut self, index: Option<usize>, error: ImportError) {
        self.diagnostics.push(&self.unit, index, error);
    }

    fn declare_interface(&mut self, sockets: &[InterfaceDecl]) {
        if sockets.is_empty() {
            return;
        }
        let unit = self.unit.clone();
        for decl in sockets {
            let Some(socket_type) = self.socket_type(None, decl) else {
                continue;
            };
            match self
                .library
                .get_or_create_boundary_socket(&unit, &decl.name, decl.direction, socket_type)
            {
                Ok(outcome) => self.legacy_note(None, &unit, &decl.name, socket_type, outcome),
                Err(e) => self.note(None, e),
            }
        }
    }

    fn socket_type(&mut self, index: Option<usize>, decl: &InterfaceDecl) -> Option<SocketType> {
        let parsed = SocketType::from_tag(&decl.socket_type);
        if parsed.is_none() {
            self.note(
                index,
                ImportError::UnknownSocketType {
                    socket: decl.name.clone(),
                    tag: decl.socket_type.clone(),
                },
            );
        }
        parsed
    }

    fn legacy_note(
        &mut self,
        index: Option<usize>,
        subgraph: &str,
        socket: &str,
        requested: SocketType,
        outcome: BindOutcome,
    ) {
        if let BindOutcome::Legacy(exception) = outcome {
            self.note(
                index,
                ImportError::LegacyInterfaceMismatch {
                    subgraph: subgraph.to_string(),
                    socket: socket.to_string(),
                    existing: exception.defined,
                    requested,
                },
            );
        }
    }

    /// Name for a declared node.
    ///
    /// A merge node the importer added under the requested name is moved to
    /// the next free name, so declared names always win.
    fn node_name(&mut self, requested: &str, fallback: &str) -> Result<String, ImportError> {
        if requested.is_empty() {
            return Ok(self.graph.unique_name(fallback));
        }
        match self.graph.node_id(requested) {
            None => Ok(requested.to_string()),
            Some(id) if self.synthesized.contains(&id) => {
                let moved = self.graph.unique_name(requested);
                self.graph.rename_node(id, &moved)?;
                tracing::debug!("Renamed merge node '{}' to '{}'", requested, moved);
                Ok(requested.to_string())
            }
            Some(_) => Err(ImportError::DuplicateNodeName {
                name: requested.to_string(),
            }),
        }
    }

    fn node(&mut self, index: usize, decl: &NodeDecl) -> Result<(), ImportError> {
        let registry = self.registry;
        let entry = registry.resolve_node_type(&decl.tag)?;

        match &entry.kind {
            NodeKind::GroupInput | NodeKind::GroupOutput if self.kind == UnitKind::Material => {
                return Err(ImportError::BoundaryOutsideGroup { tag: decl.tag.clone() });
            }
            NodeKind::Group => {
                let subgraph = decl
                    .attributes
                    .get("group_name")
                    .cloned()
                    .ok_or_else(|| ImportError::MissingAttribute {
                        tag: decl.tag.clone(),
                        attribute: "group_name".to_string(),
                    })?;
                let instance = GroupInstanceDecl {
                    name: decl.name.clone(),
                    subgraph,
                    sockets: Vec::new(),
                };
                return self.group_instance(index, &instance, Some(decl));
            }
            NodeKind::CustomGroup { subgraph } => {
                let instance = GroupInstanceDecl {
                    name: decl.name.clone(),
                    subgraph: subgraph.clone(),
                    sockets: Vec::new(),
                };
                return self.group_instance(index, &instance, Some(decl));
            }
            _ => {}
        }

        let name = self.node_name(&decl.name, &entry.node_type.name)?;
        let (mut node, issues) = entry.instantiate(&name, &decl.attributes, self.assets);
        for issue in issues {
            self.note(Some(index), issue);
        }

        if matches!(entry.kind, NodeKind::GroupInput | NodeKind::GroupOutput) {
            if let (Some(role), Some(interface)) = (BoundaryRole::of(&node), self.library.interface(&self.unit)) {
                realize_interface(&mut node, role, interface);
            }
        }

        let id = self.graph.add_node(node)?;
        self.assign_literals(index, id, decl);
        Ok(())
    }

    /// Write socket literals of a node declaration.
    ///
    /// Each literal stands alone: a socket that cannot be resolved or a value
    /// that cannot be parsed is reported and the socket keeps its default.
    fn assign_literals(&mut self, index: usize, id: NodeId, decl: &NodeDecl) {
        for assignment in &decl.sockets {
            let Some(text) = assignment.value.as_deref() else {
                continue;
            };
            let Some(node) = self.graph.node(id) else {
                return;
            };
            let socket = match resolve_socket(self.registry, node, &assignment.name, SocketDirection::Input) {
                Ok(socket) => socket,
                Err(e) => {
                    self.note(Some(index), e);
                    continue;
                }
            };
            let node_name = node.name.clone();
            let socket_type = node.inputs[socket].socket_type;
            match parse_literal(text, socket_type) {
                Ok(value) => {
                    if let Some(node) = self.graph.node_mut(id) {
                        node.inputs[socket].value = Some(value);
                    }
                }
                Err(e) => self.note(
                    Some(index),
                    ImportError::MalformedLiteral {
                        node: node_name,
                        socket: assignment.name.clone(),
                        value: text.to_string(),
                        reason: e.to_string(),
                    },
                ),
            }
        }
    }

    fn group_instance(
        &mut self,
        index: usize,
        decl: &GroupInstanceDecl,
        literals: Option<&NodeDecl>,
    ) -> Result<(), ImportError> {
        if decl.subgraph.is_empty() {
            return Err(ImportError::MissingAttribute {
                tag: GROUP_TAG.to_string(),
                attribute: "group_name".to_string(),
            });
        }
        if self.kind == UnitKind::Group && decl.subgraph == self.unit {
            return Err(ImportError::RecursiveGroup {
                subgraph: decl.subgraph.clone(),
            });
        }
        let name = self.node_name(&decl.name, &decl.subgraph)?;

        if !self.library.contains(&decl.subgraph) {
            match builtin_subgraph(&decl.subgraph) {
                Some(subgraph) => {
                    tracing::debug!("Creating built-in group '{}'", decl.subgraph);
                    self.library.insert_builtin(subgraph);
                }
                None => {
                    self.library.reference(&decl.subgraph);
                    self.note(
                        Some(index),
                        ImportError::ForwardReference {
                            subgraph: decl.subgraph.clone(),
                        },
                    );
                }
            }
        }

        // Check every declared socket before binding any of them
        let mut interface = self
            .library
            .interface(&decl.subgraph)
            .cloned()
            .unwrap_or_else(|| Interface::new(&decl.subgraph));
        let mut legacy = Vec::new();
        for socket in &decl.sockets {
            let Some(socket_type) = self.socket_type(Some(index), socket) else {
                continue;
            };
            let outcome = interface.bind(&socket.name, socket.direction, socket_type)?;
            if matches!(outcome, BindOutcome::Legacy(_)) {
                legacy.push((socket.name.clone(), socket_type, outcome));
            }
        }
        for (socket, requested, outcome) in legacy {
            self.legacy_note(Some(index), &decl.subgraph, &socket, requested, outcome);
        }

        let group_type = &self.registry.resolve_node_type(GROUP_TAG)?.node_type;
        let mut node = Node::new(group_type, name);
        node.label = decl.subgraph.clone();
        node.subgraph = Some(decl.subgraph.clone());
        realize_interface(&mut node, BoundaryRole::Instance, &interface);

        self.library.replace_interface(&decl.subgraph, interface);
        let id = self.graph.add_node(node)?;
        if let Some(literals) = literals {
            self.assign_literals(index, id, literals);
        }
        Ok(())
    }

    fn connect(&mut self, index: usize, decl: &ConnectDecl) -> Result<(), ImportError> {
        for (attribute, value) in [
            ("from_node", &decl.from_node),
            ("from_socket", &decl.from_socket),
            ("to_node", &decl.to_node),
            ("to_socket", &decl.to_socket),
        ] {
            if value.is_empty() {
                return Err(ImportError::MissingAttribute {
                    tag: CONNECT_TAG.to_string(),
                    attribute: attribute.to_string(),
                });
            }
        }

        let from_id = self.lookup(&decl.from_node)?;
        let to_id = self.lookup(&decl.to_node)?;
        self.library.realize(&mut self.graph);

        let from = self.endpoint(from_id, &decl.from_socket, SocketDirection::Output)?;
        let to = self.endpoint(to_id, &decl.to_socket, SocketDirection::Input)?;

        let (from, to) = match (from, to) {
            (Endpoint::Socket(from), Endpoint::Socket(to)) => (from, to),
            (Endpoint::Unbound(node), Endpoint::Socket(to)) => {
                let socket_type = self.socket_type_at(to, SocketDirection::Input)?;
                let from = self.bind_boundary(index, node, &decl.from_socket, SocketDirection::Output, socket_type)?;
                (from, to)
            }
            (Endpoint::Socket(from), Endpoint::Unbound(node)) => {
                let socket_type = self.socket_type_at(from, SocketDirection::Output)?;
                let to = self.bind_boundary(index, node, &decl.to_socket, SocketDirection::Input, socket_type)?;
                (from, to)
            }
            (Endpoint::Unbound(from_node), Endpoint::Unbound(to_node)) => {
                let socket_type = self
                    .registry
                    .passthrough_type(&decl.from_socket)
                    .or_else(|| self.registry.passthrough_type(&decl.to_socket))
                    .ok_or_else(|| ImportError::PassthroughTypeUnknown {
                        socket: decl.from_socket.clone(),
                    })?;
                self.check_boundary(from_node, &decl.from_socket, SocketDirection::Output, socket_type)?;
                self.check_boundary(to_node, &decl.to_socket, SocketDirection::Input, socket_type)?;
                let from = self.bind_boundary(index, from_node, &decl.from_socket, SocketDirection::Output, socket_type)?;
                let to = self.bind_boundary(index, to_node, &decl.to_socket, SocketDirection::Input, socket_type)?;
                (from, to)
            }
        };

        let merge_type = self.registry.merge_type()?;
        let outcome = insert_link(&mut self.graph, merge_type, from, to).map_err(|source| ImportError::Link {
            from: format!("{}.{}", decl.from_node, decl.from_socket),
            to: format!("{}.{}", decl.to_node, decl.to_socket),
            source,
        })?;
        if let Some(merge) = outcome.merge_node {
            self.synthesized.insert(merge);
            tracing::debug!(
                "Merged shader contributions into '{}.{}'",
                decl.to_node,
                decl.to_socket
            );
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<NodeId, ImportError> {
        self.graph
            .node_id(name)
            .ok_or_else(|| ImportError::UnknownNode { name: name.to_string() })
    }

    /// Resolve one end of a connection.
    ///
    /// A missing socket on one of this group's own boundary nodes is left
    /// unbound so it can be created once the type is known.
    fn endpoint(&self, id: NodeId, socket: &str, direction: SocketDirection) -> Result<Endpoint, ImportError> {
        let node = self.lookup_node(id)?;
        let boundary = matches!(
            (BoundaryRole::of(node), direction),
            (Some(BoundaryRole::GroupInput), SocketDirection::Output)
                | (Some(BoundaryRole::GroupOutput), SocketDirection::Input)
        );
        if boundary && node.find_socket(direction, socket).is_none() {
            return Ok(Endpoint::Unbound(id));
        }
        let index = resolve_socket(self.registry, node, socket, direction)?;
        Ok(Endpoint::Socket(SocketRef::new(id, index)))
    }

    fn lookup_node(&self, id: NodeId) -> Result<&Node, ImportError> {
        self.graph.node(id).ok_or_else(|| ImportError::UnknownNode {
            name: format!("{id:?}"),
        })
    }

    fn socket_type_at(&self, socket: SocketRef, direction: SocketDirection) -> Result<SocketType, ImportError> {
        let node = self.lookup_node(socket.node)?;
        node.socket(direction, socket.index)
            .map(|s| s.socket_type)
            .ok_or_else(|| ImportError::SocketResolution {
                node: node.name.clone(),
                socket: socket.index.to_string(),
                direction,
                available: node.socket_names(direction),
            })
    }

    /// Interface direction behind a socket of one of this group's boundary nodes
    fn boundary_direction(&self, node: NodeId, node_direction: SocketDirection) -> Result<SocketDirection, ImportError> {
        let node = self.lookup_node(node)?;
        BoundaryRole::of(node)
            .and_then(|role| role.interface_direction(node_direction))
            .ok_or_else(|| ImportError::SocketResolution {
                node: node.name.clone(),
                socket: node_direction.to_string(),
                direction: node_direction,
                available: node.socket_names(node_direction),
            })
    }

    /// Fail early if binding a boundary socket would conflict
    fn check_boundary(
        &self,
        node: NodeId,
        socket: &str,
        node_direction: SocketDirection,
        socket_type: SocketType,
    ) -> Result<(), ImportError> {
        let direction = self.boundary_direction(node, node_direction)?;
        if let Some(interface) = self.library.interface(&self.unit) {
            interface.check(socket, direction, socket_type)?;
        }
        Ok(())
    }

    /// Create a boundary socket of this group and return it on `node`
    fn bind_boundary(
        &mut self,
        index: usize,
        node: NodeId,
        socket: &str,
        node_direction: SocketDirection,
        socket_type: SocketType,
    ) -> Result<SocketRef, ImportError> {
        let interface_direction = self.boundary_direction(node, node_direction)?;
        let unit = self.unit.clone();
        let outcome = self
            .library
            .get_or_create_boundary_socket(&unit, socket, interface_direction, socket_type)?;
        if outcome == BindOutcome::Created {
            tracing::debug!(
                "Created {} '{}' ({}) on group '{}'",
                interface_direction,
                socket,
                socket_type,
                unit
            );
        }
        self.legacy_note(Some(index), &unit, socket, socket_type, outcome);
        self.library.realize(&mut self.graph);

        let node_ref = self.lookup_node(node)?;
        let socket_index = node_ref
            .find_socket(node_direction, socket)
            .ok_or_else(|| ImportError::SocketResolution {
                node: node_ref.name.clone(),
                socket: socket.to_string(),
                direction: node_direction,
                available: node_ref.socket_names(node_direction),
            })?;
        Ok(SocketRef::new(node, socket_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssetLoader;

    fn run(units: Vec<Unit>) -> ImportResult {
        let registry = NodeTypeRegistry::studio();
        let settings = ImportSettings::default();
        let assets = MemoryAssetLoader::new();
        import_document(&registry, &settings, &assets, &Document { units })
    }

    fn node(tag: &str, name: &str) -> Directive {
        Directive::Node(NodeDecl::new(tag, name))
    }

    fn connect(from: &str, from_socket: &str, to: &str, to_socket: &str) -> Directive {
        Directive::Connect(ConnectDecl::new(from, from_socket, to, to_socket))
    }

    #[test]
    fn test_material_starts_with_output() {
        let result = run(vec![Unit::new(UnitKind::Material, "Mat")]);
        let material = result.material("Mat").unwrap();
        let output = material.graph.node_by_name(MATERIAL_OUTPUT_NAME).unwrap();
        assert_eq!(output.node_type, "ShaderNodeOutputMaterial");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_tag_is_skipped() {
        let unit = Unit::new(UnitKind::Material, "Mat")
            .with_directive(node("hair_bsdf", "Hair"))
            .with_directive(node("emission", "Glow"))
            .with_directive(connect("Glow", "Emission", "Output", "Surface"));
        let result = run(vec![unit]);

        let graph = &result.material("Mat").unwrap().graph;
        assert!(graph.node_by_name("Hair").is_none());
        assert!(graph.node_by_name("Glow").is_some());
        assert_eq!(graph.link_count(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].directive, Some(0));
    }

    #[test]
    fn test_duplicate_node_name() {
        let unit = Unit::new(UnitKind::Material, "Mat")
            .with_directive(node("value", "V"))
            .with_directive(node("math", "V"));
        let result = run(vec![unit]);
        assert_eq!(result.material("Mat").unwrap().graph.node_by_name("V").unwrap().node_type, "ShaderNodeValue");
        assert!(matches!(result.diagnostics[0].error, ImportError::DuplicateNodeName { .. }));
    }

    #[test]
    fn test_boundary_outside_group() {
        let unit = Unit::new(UnitKind::Material, "Mat").with_directive(node("group_input", "In"));
        let result = run(vec![unit]);
        assert!(matches!(result.diagnostics[0].error, ImportError::BoundaryOutsideGroup { .. }));
    }

    #[test]
    fn test_material_interface_is_rejected() {
        let mut unit = Unit::new(UnitKind::Material, "Mat").with_directive(node("value", "V"));
        unit.interface
            .push(InterfaceDecl::new("Roughness", SocketDirection::Input, "float"));
        let result = run(vec![unit]);

        assert!(!result.library.contains("Mat"));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].error,
            ImportError::BoundaryOutsideGroup { tag: "input".into() }
        );
        assert!(result.material("Mat").unwrap().graph.node_by_name("V").is_some());
    }

    #[test]
    fn test_recursive_group() {
        let unit = Unit::new(UnitKind::Group, "Loop").with_directive(Directive::Group(GroupInstanceDecl {
            name: "Inner".into(),
            subgraph: "Loop".into(),
            sockets: Vec::new(),
        }));
        let result = run(vec![unit]);
        assert!(matches!(result.diagnostics[0].error, ImportError::RecursiveGroup { .. }));
    }

    #[test]
    fn test_group_output_from_node() {
        let unit = Unit::new(UnitKind::Group, "Tint")
            .with_directive(node("color", "C"))
            .with_directive(node("group_output", "Out"))
            .with_directive(connect("C", "Color", "Out", "Tint"));
        let result = run(vec![unit]);

        let group = result.library.get("Tint").unwrap();
        assert_eq!(
            group.interface.get("Tint", SocketDirection::Output).map(|s| s.socket_type),
            Some(SocketType::Color)
        );
        let out = group.graph.node_by_name("Out").unwrap();
        assert_eq!(out.inputs[0].name, "Tint");
        assert_eq!(group.graph.link_count(), 1);
    }

    #[test]
    fn test_passthrough_needs_known_name() {
        let unit = Unit::new(UnitKind::Group, "Pass")
            .with_directive(node("group_input", "In"))
            .with_directive(node("group_output", "Out"))
            .with_directive(connect("In", "enable", "Out", "enable"))
            .with_directive(connect("In", "Mystery", "Out", "Mystery"));
        let result = run(vec![unit]);

        let group = result.library.get("Pass").unwrap();
        assert_eq!(
            group.interface.get("enable", SocketDirection::Input).map(|s| s.socket_type),
            Some(SocketType::Bool)
        );
        assert_eq!(
            group.interface.get("enable", SocketDirection::Output).map(|s| s.socket_type),
            Some(SocketType::Bool)
        );
        assert!(group.interface.get("Mystery", SocketDirection::Input).is_none());
        assert_eq!(group.graph.link_count(), 1);
        assert!(matches!(
            result.diagnostics[0].error,
            ImportError::PassthroughTypeUnknown { .. }
        ));
    }

    #[test]
    fn test_socket_literals() {
        let unit = Unit::new(UnitKind::Material, "Mat").with_directive(Directive::Node(
            NodeDecl::new("principled_bsdf", "BSDF")
                .with_socket("BaseColor", "0.8 0.1 0.1")
                .with_socket("Roughness", "smooth")
                .with_socket("Glow", "1"),
        ));
        let result = run(vec![unit]);

        let bsdf = result.material("Mat").unwrap().graph.node_by_name("BSDF").unwrap();
        assert_eq!(
            bsdf.inputs[0].value,
            Some(studio_material_graph::SocketValue::Color([0.8, 0.1, 0.1, 0.0]))
        );
        assert_eq!(bsdf.inputs[2].value, Some(studio_material_graph::SocketValue::Float(0.5)));
        assert_eq!(result.diagnostics.len(), 2);
        assert!(matches!(result.diagnostics[0].error, ImportError::MalformedLiteral { .. }));
        assert!(matches!(result.diagnostics[1].error, ImportError::SocketResolution { .. }));
    }
}
