// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket name resolution.
//!
//! Documents name sockets the way some revision of the target schema did.
//! Resolution tries, in order: the exact name, the node type's alias table,
//! and the generic positional fallbacks. Nodes whose sockets come from a
//! group interface only resolve exact names.

use crate::diagnostics::ImportError;
use crate::registry::{AliasTarget, NodeTypeRegistry};
use studio_material_graph::{Node, SocketDirection};

/// Resolve a document socket name to a socket index on `node`
pub fn resolve_socket(
    registry: &NodeTypeRegistry,
    node: &Node,
    name: &str,
    direction: SocketDirection,
) -> Result<usize, ImportError> {
    if let Some(index) = node.find_socket(direction, name) {
        return Ok(index);
    }

    if !registry.has_dynamic_sockets(node) {
        let count = node.sockets(direction).len();

        let aliased = registry
            .aliases(&node.node_type)
            .and_then(|table| table.for_direction(direction).get(name))
            .and_then(|target| match target {
                AliasTarget::Name(alias) => node.find_socket(direction, alias),
                AliasTarget::Index(index) => (*index < count).then_some(*index),
            });
        if let Some(index) = aliased {
            tracing::trace!("Resolved '{}' on '{}' through alias table", name, node.name);
            return Ok(index);
        }

        if let Some(index) = registry.positional_index(name).filter(|index| *index < count) {
            tracing::trace!("Resolved '{}' on '{}' by position {}", name, node.name, index);
            return Ok(index);
        }
    }

    Err(ImportError::SocketResolution {
        node: node.name.clone(),
        socket: name.to_string(),
        direction,
        available: node.socket_names(direction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio_nodes::create_studio_registry;
    use studio_material_graph::{NodeCategory, NodeType, Socket, SocketType};

    fn instantiate(registry: &NodeTypeRegistry, tag: &str) -> Node {
        let entry = registry.resolve_node_type(tag).unwrap();
        Node::new(&entry.node_type, tag)
    }

    #[test]
    fn test_exact_match_wins() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "principled_bsdf");
        assert_eq!(resolve_socket(&registry, &node, "Roughness", SocketDirection::Input).unwrap(), 2);
        assert_eq!(resolve_socket(&registry, &node, "BSDF", SocketDirection::Output).unwrap(), 0);
    }

    #[test]
    fn test_alias_by_name() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "principled_bsdf");
        let index = resolve_socket(&registry, &node, "Clearcoat", SocketDirection::Input).unwrap();
        assert_eq!(node.inputs[index].name, "Coat Weight");
        let index = resolve_socket(&registry, &node, "BaseColor", SocketDirection::Input).unwrap();
        assert_eq!(node.inputs[index].name, "Base Color");
    }

    #[test]
    fn test_alias_by_index() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "mix_closure");
        assert_eq!(resolve_socket(&registry, &node, "Shader2", SocketDirection::Input).unwrap(), 2);
        let node = instantiate(&registry, "mix");
        assert_eq!(resolve_socket(&registry, &node, "Color1", SocketDirection::Input).unwrap(), 6);
    }

    #[test]
    fn test_output_alias() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "voronoi_texture");
        let index = resolve_socket(&registry, &node, "Fac", SocketDirection::Output).unwrap();
        assert_eq!(node.outputs[index].name, "Distance");
    }

    #[test]
    fn test_positional_fallback_respects_socket_count() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "combine_xyz");
        assert_eq!(resolve_socket(&registry, &node, "Input2", SocketDirection::Input).unwrap(), 1);

        let node = instantiate(&registry, "rgb_ramp");
        let err = resolve_socket(&registry, &node, "Value2", SocketDirection::Input).unwrap_err();
        assert!(matches!(err, ImportError::SocketResolution { .. }));
    }

    #[test]
    fn test_failure_lists_available_names() {
        let registry = create_studio_registry();
        let node = instantiate(&registry, "emission");
        match resolve_socket(&registry, &node, "Glow", SocketDirection::Input) {
            Err(ImportError::SocketResolution { node, socket, available, .. }) => {
                assert_eq!(node, "emission");
                assert_eq!(socket, "Glow");
                assert_eq!(available, vec!["Color", "Strength", "Weight"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_group_nodes_resolve_exact_names_only() {
        let registry = create_studio_registry();
        let group = NodeType::new(crate::registry::GROUP_TYPE, "Group", NodeCategory::Group)
            .with_inputs(vec![Socket::input("A", SocketType::Float), Socket::input("B", SocketType::Float)]);
        let node = Node::new(&group, "G");
        assert_eq!(resolve_socket(&registry, &node, "B", SocketDirection::Input).unwrap(), 1);
        assert!(resolve_socket(&registry, &node, "Value2", SocketDirection::Input).is_err());
    }
}
