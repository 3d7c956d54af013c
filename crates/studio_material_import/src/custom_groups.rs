// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in groups behind custom node tags.

use crate::diagnostics::ImportError;
use crate::library::{realize_interface, BoundaryRole, Subgraph};
use crate::lookups::UV_DEGRADATION;
use crate::registry::{GROUP_INPUT_TYPE, GROUP_OUTPUT_TYPE};
use studio_material_graph::{Node, NodeCategory, NodeType, SocketDirection, SocketRef, SocketType};

/// Build the importer-provided group with this name, if there is one.
///
/// Custom tags whose group has no built-in definition (such as "Project to
/// Axis Planes") are expected to be defined by a document.
pub fn builtin_subgraph(name: &str) -> Option<Subgraph> {
    match name {
        UV_DEGRADATION => match uv_degradation() {
            Ok(subgraph) => Some(subgraph),
            Err(e) => {
                tracing::error!("Failed to build '{}': {}", UV_DEGRADATION, e);
                None
            }
        },
        _ => None,
    }
}

fn uv_degradation() -> Result<Subgraph, ImportError> {
    let mut subgraph = Subgraph::new(UV_DEGRADATION);

    let inputs = [
        ("FromColor", SocketType::Color),
        ("ToColor", SocketType::Color),
        ("Levels", SocketType::Int),
        ("MinColorRatio", SocketType::Float),
        ("MaxColorRatio", SocketType::Float),
        ("MinRoughness", SocketType::Float),
        ("MaxRoughness", SocketType::Float),
        ("Strength", SocketType::Float),
        ("enable", SocketType::Bool),
    ];
    for (name, socket_type) in inputs {
        subgraph.interface.bind(name, SocketDirection::Input, socket_type)?;
    }
    subgraph.interface.bind("OutColor", SocketDirection::Output, SocketType::Color)?;
    subgraph.interface.bind("OutRoughness", SocketDirection::Output, SocketType::Float)?;

    let mut input = Node::new(
        &NodeType::new(GROUP_INPUT_TYPE, "Group Input", NodeCategory::Group),
        "Group Input",
    );
    realize_interface(&mut input, BoundaryRole::GroupInput, &subgraph.interface);
    let mut output = Node::new(
        &NodeType::new(GROUP_OUTPUT_TYPE, "Group Output", NodeCategory::Group),
        "Group Output",
    );
    realize_interface(&mut output, BoundaryRole::GroupOutput, &subgraph.interface);

    let input = subgraph.graph.add_node(input)?;
    let output = subgraph.graph.add_node(output)?;

    // Pass the color through until the degradation network is built
    if let Err(e) = subgraph.graph.connect(SocketRef::new(input, 0), SocketRef::new(output, 0)) {
        tracing::warn!("Failed to link '{}' passthrough: {}", UV_DEGRADATION, e);
    }

    Ok(subgraph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_degradation_interface() {
        let subgraph = builtin_subgraph(UV_DEGRADATION).unwrap();
        let inputs: Vec<_> = subgraph
            .interface
            .sockets(SocketDirection::Input)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            inputs,
            vec![
                "FromColor",
                "ToColor",
                "Levels",
                "MinColorRatio",
                "MaxColorRatio",
                "MinRoughness",
                "MaxRoughness",
                "Strength",
                "enable"
            ]
        );
        assert_eq!(subgraph.interface.index_of("OutRoughness", SocketDirection::Output), Some(1));
        assert_eq!(subgraph.graph.node_count(), 2);
        assert_eq!(subgraph.graph.link_count(), 1);
    }

    #[test]
    fn test_only_uv_degradation_is_builtin() {
        assert!(builtin_subgraph("Project to Axis Planes").is_none());
    }
}
