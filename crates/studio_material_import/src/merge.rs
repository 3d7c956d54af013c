// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link insertion with implicit shader merging.
//!
//! A shader input carries at most one physical link. When a second shader
//! contribution arrives, a binary merge node is inserted in front of the
//! input: the existing source goes into operand 0, the new source into
//! operand 1, and the merge output takes over the input. Further
//! contributions grow a left-leaning chain, one merge node each.

use studio_material_graph::{
    ConnectionError, Graph, GraphError, LinkId, Node, NodeId, NodeType, SocketDirection, SocketRef, SocketType,
};

/// What [`insert_link`] added to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Link arriving at the requested input
    pub link: LinkId,
    /// Merge node inserted in front of the input, if any
    pub merge_node: Option<NodeId>,
}

/// Error inserting a link
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InsertLinkError {
    /// The graph rejected the link
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The merge node could not be added
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The merge node type does not take two shaders
    #[error("Node type '{0}' cannot merge shaders")]
    InvalidMergeType(String),
}

/// Link `from` into `to`, merging shader contributions.
///
/// The graph is validated before any change, so on error it is left as it
/// was.
pub fn insert_link(
    graph: &mut Graph,
    merge_type: &NodeType,
    from: SocketRef,
    to: SocketRef,
) -> Result<LinkOutcome, InsertLinkError> {
    let source = graph
        .node(from.node)
        .ok_or(ConnectionError::NodeNotFound(from.node))?
        .socket(SocketDirection::Output, from.index)
        .ok_or(ConnectionError::SocketNotFound(from))?;
    let target = graph
        .node(to.node)
        .ok_or(ConnectionError::NodeNotFound(to.node))?
        .socket(SocketDirection::Input, to.index)
        .ok_or(ConnectionError::SocketNotFound(to))?;

    let merging = source.socket_type == SocketType::Shader && target.socket_type == SocketType::Shader;
    let existing = graph.links_to(to).next().map(|link| (link.id, link.from));

    let (existing_link, previous) = match existing {
        Some(found) if merging => found,
        _ => {
            let link = graph.connect(from, to)?;
            return Ok(LinkOutcome { link, merge_node: None });
        }
    };

    if from.node == to.node {
        return Err(ConnectionError::SelfLoop.into());
    }
    if !is_merge_type(merge_type) {
        return Err(InsertLinkError::InvalidMergeType(merge_type.id.clone()));
    }

    let name = graph.unique_name(&merge_type.name);
    let merge = graph.add_node(Node::new(merge_type, name))?;

    graph.disconnect(existing_link);
    graph.connect(previous, SocketRef::new(merge, 0))?;
    graph.connect(from, SocketRef::new(merge, 1))?;
    let link = graph.connect(SocketRef::new(merge, 0), to)?;

    tracing::debug!("Inserted merge node in graph '{}'", graph.name);

    Ok(LinkOutcome {
        link,
        merge_node: Some(merge),
    })
}

fn is_merge_type(node_type: &NodeType) -> bool {
    node_type.inputs.len() >= 2
        && node_type.inputs[..2].iter().all(|s| s.socket_type == SocketType::Shader)
        && node_type.outputs.first().map(|s| s.socket_type) == Some(SocketType::Shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_material_graph::{NodeCategory, Socket};

    fn add_shader() -> NodeType {
        NodeType::new("ShaderNodeAddShader", "Add Shader", NodeCategory::Shader)
            .with_inputs(vec![Socket::input("Shader", SocketType::Shader), Socket::input("Shader", SocketType::Shader)])
            .with_outputs(vec![Socket::output("Shader", SocketType::Shader)])
    }

    fn bsdf() -> NodeType {
        NodeType::new("ShaderNodeBsdfDiffuse", "Diffuse BSDF", NodeCategory::Shader)
            .with_outputs(vec![Socket::output("BSDF", SocketType::Shader)])
    }

    fn output() -> NodeType {
        NodeType::new("ShaderNodeOutputMaterial", "Material Output", NodeCategory::Output).with_inputs(vec![
            Socket::input("Surface", SocketType::Shader),
            Socket::input("Displacement", SocketType::Vector),
        ])
    }

    fn value() -> NodeType {
        NodeType::new("ShaderNodeValue", "Value", NodeCategory::Input)
            .with_outputs(vec![Socket::output("Value", SocketType::Float)])
    }

    fn setup(sources: usize) -> (Graph, Vec<NodeId>, NodeId) {
        let mut graph = Graph::new("Mat");
        let out = graph.add_node(Node::new(&output(), "Output")).unwrap();
        let ids = (0..sources)
            .map(|i| graph.add_node(Node::new(&bsdf(), format!("BSDF_{i}"))).unwrap())
            .collect();
        (graph, ids, out)
    }

    #[test]
    fn test_first_link_is_direct() {
        let (mut graph, ids, out) = setup(1);
        let outcome = insert_link(&mut graph, &add_shader(), SocketRef::new(ids[0], 0), SocketRef::new(out, 0)).unwrap();
        assert_eq!(outcome.merge_node, None);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_second_shader_inserts_merge() {
        let (mut graph, ids, out) = setup(2);
        let surface = SocketRef::new(out, 0);
        insert_link(&mut graph, &add_shader(), SocketRef::new(ids[0], 0), surface).unwrap();
        let outcome = insert_link(&mut graph, &add_shader(), SocketRef::new(ids[1], 0), surface).unwrap();

        let merge = outcome.merge_node.unwrap();
        assert_eq!(graph.node(merge).unwrap().name, "Add Shader");
        assert_eq!(graph.links_to(SocketRef::new(merge, 0)).next().unwrap().from.node, ids[0]);
        assert_eq!(graph.links_to(SocketRef::new(merge, 1)).next().unwrap().from.node, ids[1]);

        let into_surface: Vec<_> = graph.links_to(surface).collect();
        assert_eq!(into_surface.len(), 1);
        assert_eq!(into_surface[0].from, SocketRef::new(merge, 0));
    }

    #[test]
    fn test_chain_is_left_leaning() {
        let (mut graph, ids, out) = setup(4);
        let surface = SocketRef::new(out, 0);
        let mut merges = Vec::new();
        for id in &ids {
            let outcome = insert_link(&mut graph, &add_shader(), SocketRef::new(*id, 0), surface).unwrap();
            merges.extend(outcome.merge_node);
        }

        assert_eq!(merges.len(), ids.len() - 1);
        for pair in merges.windows(2) {
            let first_operand = graph.links_to(SocketRef::new(pair[1], 0)).next().unwrap();
            assert_eq!(first_operand.from.node, pair[0]);
        }
        assert_eq!(graph.links_to(surface).count(), 1);
        assert_eq!(graph.node_by_name("Add Shader.002").map(|n| n.id), merges.last().copied());
    }

    #[test]
    fn test_value_inputs_are_replaced() {
        let mut graph = Graph::new("Mat");
        let out = graph.add_node(Node::new(&output(), "Output")).unwrap();
        let a = graph.add_node(Node::new(&value(), "A")).unwrap();
        let b = graph.add_node(Node::new(&value(), "B")).unwrap();
        let displacement = SocketRef::new(out, 1);

        insert_link(&mut graph, &add_shader(), SocketRef::new(a, 0), displacement).unwrap();
        let outcome = insert_link(&mut graph, &add_shader(), SocketRef::new(b, 0), displacement).unwrap();

        assert_eq!(outcome.merge_node, None);
        assert_eq!(graph.links_to(displacement).next().unwrap().from.node, b);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_failed_merge_leaves_graph_untouched() {
        let (mut graph, ids, out) = setup(2);
        let surface = SocketRef::new(out, 0);
        insert_link(&mut graph, &add_shader(), SocketRef::new(ids[0], 0), surface).unwrap();

        let err = insert_link(&mut graph, &value(), SocketRef::new(ids[1], 0), surface).unwrap_err();
        assert_eq!(err, InsertLinkError::InvalidMergeType("ShaderNodeValue".into()));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.links_to(surface).next().unwrap().from.node, ids[0]);
    }
}
