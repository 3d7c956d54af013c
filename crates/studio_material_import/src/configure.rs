// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-kind configuration of new nodes.

use crate::assets::{placeholder_image, AssetLoader};
use crate::diagnostics::ImportError;
use crate::literal::{coerce, parse_components, parse_literal, LiteralError};
use crate::registry::{MixMode, NodeKind, NodeTypeEntry};
use indexmap::IndexMap;
use std::path::Path;
use studio_material_graph::{Node, SocketType, SocketValue};

/// Attribute holding the literal of constant nodes
pub const VALUE_ATTRIBUTE: &str = "value";

/// Attribute holding the image path of image texture nodes
pub const IMAGE_ATTRIBUTE: &str = "filename";

impl NodeTypeEntry {
    /// Create a configured node.
    ///
    /// Problems that do not prevent creating the node are returned alongside
    /// it.
    pub fn instantiate(
        &self,
        name: &str,
        attributes: &IndexMap<String, String>,
        assets: &dyn AssetLoader,
    ) -> (Node, Vec<ImportError>) {
        let mut node = Node::new(&self.node_type, name);
        let mut issues = Vec::new();

        for spec in &self.properties {
            let value = match attributes.get(spec.attribute) {
                Some(raw) => spec.normalize(raw).unwrap_or_else(|| {
                    issues.push(ImportError::InvalidAttribute {
                        node: name.to_string(),
                        attribute: spec.attribute.to_string(),
                        value: raw.clone(),
                    });
                    spec.default.to_string()
                }),
                None => spec.default.to_string(),
            };
            node.set_property(spec.property, value);
        }

        self.kind.configure(&mut node, attributes, assets, &mut issues);
        (node, issues)
    }
}

impl NodeKind {
    /// Apply kind-specific configuration to a new node
    pub fn configure(
        &self,
        node: &mut Node,
        attributes: &IndexMap<String, String>,
        assets: &dyn AssetLoader,
        issues: &mut Vec<ImportError>,
    ) {
        match self {
            Self::Plain => {}
            Self::Value => {
                if let Some(raw) = attributes.get(VALUE_ATTRIBUTE) {
                    match parse_literal(raw, SocketType::Float) {
                        Ok(value) => set_output(node, value),
                        Err(e) => issues.push(malformed(node, raw, e)),
                    }
                }
            }
            Self::Rgb { vector } => {
                if let Some(raw) = attributes.get(VALUE_ATTRIBUTE) {
                    let parsed = parse_components(raw).and_then(|mut components| {
                        if components.len() == 3 {
                            components.push(1.0);
                        }
                        coerce(&components, SocketType::Color)
                    });
                    match parsed {
                        Ok(value) => set_output(node, value),
                        Err(e) => issues.push(malformed(node, raw, e)),
                    }
                }
                if *vector {
                    if let Some(output) = node.outputs.first_mut() {
                        output.name = "Vector".to_string();
                    }
                }
            }
            Self::Mix(mode) => configure_mix(node, *mode),
            Self::ImageTexture => {
                if let Some(raw) = attributes.get(IMAGE_ATTRIBUTE) {
                    let path = Path::new(raw);
                    node.image = Some(match assets.load_image(path) {
                        Ok(handle) => handle,
                        Err(e) => {
                            tracing::debug!("Using placeholder for {}: {}", raw, e);
                            issues.push(ImportError::MissingAsset { path: path.to_path_buf() });
                            placeholder_image(path)
                        }
                    });
                }
            }
            // Sockets come from the group interface
            Self::GroupInput | Self::GroupOutput | Self::Group | Self::CustomGroup { .. } => {}
        }
    }
}

fn configure_mix(node: &mut Node, mode: MixMode) {
    node.set_property("data_type", mode.data_type());
    let (inputs, outputs) = mode.active_sockets();
    for (index, socket) in node.inputs.iter_mut().enumerate() {
        socket.enabled = inputs.contains(&index);
    }
    for (index, socket) in node.outputs.iter_mut().enumerate() {
        socket.enabled = outputs.contains(&index);
    }
    node.refresh_dimensions();
}

fn set_output(node: &mut Node, value: SocketValue) {
    if let Some(output) = node.outputs.first_mut() {
        output.value = Some(value);
    }
}

fn malformed(node: &Node, raw: &str, error: LiteralError) -> ImportError {
    ImportError::MalformedLiteral {
        node: node.name.clone(),
        socket: VALUE_ATTRIBUTE.to_string(),
        value: raw.to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssetLoader;
    use crate::registry::NodeTypeRegistry;
    use studio_material_graph::SocketDirection;

    fn build(tag: &str, attributes: &[(&str, &str)]) -> (Node, Vec<ImportError>) {
        let registry = NodeTypeRegistry::studio();
        let attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let assets = MemoryAssetLoader::new().with_image("decal.png", 16, 16);
        registry
            .resolve_node_type(tag)
            .unwrap()
            .instantiate(tag, &attributes, &assets)
    }

    #[test]
    fn test_value_node() {
        let (node, issues) = build("value", &[("value", "0.25")]);
        assert!(issues.is_empty());
        assert_eq!(node.outputs[0].value, Some(SocketValue::Float(0.25)));

        let (node, issues) = build("value", &[("value", "bright")]);
        assert_eq!(issues.len(), 1);
        assert_eq!(node.outputs[0].value, Some(SocketValue::Float(0.5)));
    }

    #[test]
    fn test_color_gets_opaque_alpha() {
        let (node, _) = build("color", &[("value", "0.8 0.1 0.1")]);
        assert_eq!(node.outputs[0].value, Some(SocketValue::Color([0.8, 0.1, 0.1, 1.0])));
        assert_eq!(node.outputs[0].name, "Color");
    }

    #[test]
    fn test_vector_constant_renames_output() {
        let (node, _) = build("vector", &[("value", "0 0 1")]);
        assert_eq!(node.outputs[0].name, "Vector");
        assert_eq!(node.find_socket(SocketDirection::Output, "Vector"), Some(0));
    }

    #[test]
    fn test_mix_modes_enable_sockets() {
        let (node, _) = build("mix_value", &[("blend_type", "multiply")]);
        assert_eq!(node.property("data_type"), Some("FLOAT"));
        assert_eq!(node.property("blend_type"), Some("MULTIPLY"));
        assert_eq!(node.find_socket(SocketDirection::Input, "A"), Some(2));
        assert_eq!(node.find_socket(SocketDirection::Output, "Result"), Some(0));

        let (node, _) = build("mix", &[]);
        assert_eq!(node.property("data_type"), Some("RGBA"));
        assert_eq!(node.find_socket(SocketDirection::Input, "A"), Some(6));
        assert_eq!(node.find_socket(SocketDirection::Output, "Result"), Some(2));
    }

    #[test]
    fn test_enumerated_properties() {
        let (node, issues) = build(
            "vector_transform",
            &[("convert_from", "object"), ("convert_to", "world"), ("type", "point")],
        );
        assert!(issues.is_empty());
        assert_eq!(node.property("convert_from"), Some("OBJECT"));
        assert_eq!(node.property("convert_to"), Some("WORLD"));
        assert_eq!(node.property("vector_type"), Some("POINT"));

        let (node, issues) = build("math", &[("operation", "teleport")]);
        assert_eq!(node.property("operation"), Some("ADD"));
        assert!(matches!(issues[0], ImportError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_image_texture() {
        let (node, issues) = build("image_texture", &[("filename", "decal.png")]);
        assert!(issues.is_empty());
        assert_eq!(node.image.as_ref().map(|i| i.width), Some(16));

        let (node, issues) = build("image_texture", &[("filename", "lost.png")]);
        assert!(node.image.as_ref().is_some_and(|i| i.placeholder));
        assert!(matches!(issues[0], ImportError::MissingAsset { .. }));
    }
}
