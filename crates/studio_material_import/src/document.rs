// SPDX-License-Identifier: MIT OR Apache-2.0
//! Source documents.
//!
//! A document is an ordered list of units (materials and groups), each an
//! ordered list of directives. Documents are read from Studio XML or from
//! their RON form.
//!
//! Studio XML looks like:
//!
//! ```xml
//! <materials>
//!   <material name="Red">
//!     <shader>
//!       <principled_bsdf name="BSDF">
//!         <input name="BaseColor" value="0.8 0.1 0.1"/>
//!       </principled_bsdf>
//!       <connect from_node="BSDF" from_socket="BSDF" to_node="Output" to_socket="Surface"/>
//!     </shader>
//!   </material>
//!   <group name="Rough">
//!     <input name="Roughness" type="float"/>
//!     <shader>...</shader>
//!   </group>
//! </materials>
//! ```

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use studio_material_graph::SocketDirection;

/// Tag of connection directives
pub const CONNECT_TAG: &str = "connect";

/// Tag of group instance directives
pub const GROUP_TAG: &str = "group";

/// A parsed source document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Units in document order
    pub units: Vec<Unit>,
}

/// Kind of top-level unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// A material tree
    Material,
    /// A reusable group
    Group,
}

/// A material or group definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Material or group
    pub kind: UnitKind,
    /// Unit name
    pub name: String,
    /// Interface sockets declared up front (groups only)
    #[serde(default)]
    pub interface: Vec<InterfaceDecl>,
    /// Directives in document order
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// One directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Create a node
    Node(NodeDecl),
    /// Link two sockets
    Connect(ConnectDecl),
    /// Create a group instance
    Group(GroupInstanceDecl),
}

/// Node declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDecl {
    /// Studio node tag
    pub tag: String,
    /// Node name, unique within the unit
    #[serde(default)]
    pub name: String,
    /// Remaining attributes
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// Input socket literals
    #[serde(default)]
    pub sockets: Vec<SocketAssignment>,
}

/// Literal written to an input socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketAssignment {
    /// Socket name as written in the document
    pub name: String,
    /// Literal text
    #[serde(default)]
    pub value: Option<String>,
}

/// Connection between two named sockets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectDecl {
    /// Source node name
    pub from_node: String,
    /// Source output socket name
    pub from_socket: String,
    /// Target node name
    pub to_node: String,
    /// Target input socket name
    pub to_socket: String,
}

/// Group instance declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupInstanceDecl {
    /// Node name
    #[serde(default)]
    pub name: String,
    /// Group instantiated
    pub subgraph: String,
    /// Interface sockets the instance expects
    #[serde(default)]
    pub sockets: Vec<InterfaceDecl>,
}

/// Declared interface socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    /// Socket name
    pub name: String,
    /// Direction as seen from outside the group
    pub direction: SocketDirection,
    /// Socket type tag (`float`, `color`, `closure`, ...)
    pub socket_type: String,
}

/// Error reading a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Malformed RON
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Closing tag without a matching opening tag, or unclosed elements
    #[error("Unbalanced element <{0}>")]
    Unbalanced(String),

    /// No root element
    #[error("Document is empty")]
    Empty,

    /// File extension not recognized
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl Document {
    /// Read a document from a `.xml` or `.ron` file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("xml") => Self::from_xml(&text),
            Some("ron") => Self::from_ron(&text),
            other => Err(DocumentError::UnsupportedFormat(other.unwrap_or_default().to_string())),
        }
    }

    /// Parse the RON form
    pub fn from_ron(text: &str) -> Result<Self, DocumentError> {
        Ok(ron::from_str(text)?)
    }

    /// Parse Studio XML.
    ///
    /// Children of the root element other than `material` and `group` are
    /// ignored, as are `shader` blocks after the first in a unit.
    pub fn from_xml(text: &str) -> Result<Self, DocumentError> {
        let root = parse_tree(text)?;
        let units = root.children.into_iter().filter_map(unit_from_element).collect();
        Ok(Self { units })
    }

    /// Find a unit by name
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }
}

impl Unit {
    /// Create an empty unit
    pub fn new(kind: UnitKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            interface: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Append a directive
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

impl NodeDecl {
    /// Create a declaration with no attributes or literals
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a socket literal
    pub fn with_socket(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.sockets.push(SocketAssignment {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }
}

impl ConnectDecl {
    /// Create a connection
    pub fn new(from_node: &str, from_socket: &str, to_node: &str, to_socket: &str) -> Self {
        Self {
            from_node: from_node.to_string(),
            from_socket: from_socket.to_string(),
            to_node: to_node.to_string(),
            to_socket: to_socket.to_string(),
        }
    }
}

impl InterfaceDecl {
    /// Create a socket declaration
    pub fn new(name: &str, direction: SocketDirection, socket_type: &str) -> Self {
        Self {
            name: name.to_string(),
            direction,
            socket_type: socket_type.to_string(),
        }
    }
}

/// Generic XML element
#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let mut attributes = IndexMap::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            attributes.insert(key, attribute.unescape_value()?.into_owned());
        }
        Ok(Self {
            tag: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    fn attribute(&self, key: &str) -> String {
        self.attributes.get(key).cloned().unwrap_or_default()
    }
}

fn parse_tree(text: &str) -> Result<Element, DocumentError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = root.or(Some(element)),
                }
            }
            Event::End(end) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DocumentError::Unbalanced(String::from_utf8_lossy(end.name().as_ref()).into_owned()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = root.or(Some(element)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DocumentError::Unbalanced(open.tag));
    }
    root.ok_or(DocumentError::Empty)
}

fn unit_from_element(element: Element) -> Option<Unit> {
    let kind = match element.tag.as_str() {
        "material" => UnitKind::Material,
        "group" => UnitKind::Group,
        other => {
            tracing::debug!("Skipping <{}> at document level", other);
            return None;
        }
    };
    let name = element.attribute("name");
    let mut unit = Unit::new(kind, name);

    let mut shaders = 0;
    for child in element.children {
        match child.tag.as_str() {
            "shader" => {
                shaders += 1;
                if shaders > 1 {
                    tracing::warn!("Ignoring extra <shader> block in '{}'", unit.name);
                    continue;
                }
                unit.directives = child.children.into_iter().map(directive_from_element).collect();
            }
            "input" | "output" if kind == UnitKind::Group => {
                unit.interface.extend(interface_from_element(&child));
            }
            other => tracing::debug!("Skipping <{}> in '{}'", other, unit.name),
        }
    }
    Some(unit)
}

fn interface_from_element(element: &Element) -> Option<InterfaceDecl> {
    let direction = match element.tag.as_str() {
        "input" => SocketDirection::Input,
        "output" => SocketDirection::Output,
        _ => return None,
    };
    Some(InterfaceDecl {
        name: element.attribute("name"),
        direction,
        socket_type: element.attribute("type"),
    })
}

fn directive_from_element(element: Element) -> Directive {
    match element.tag.as_str() {
        CONNECT_TAG => Directive::Connect(ConnectDecl {
            from_node: element.attribute("from_node"),
            from_socket: element.attribute("from_socket"),
            to_node: element.attribute("to_node"),
            to_socket: element.attribute("to_socket"),
        }),
        GROUP_TAG => Directive::Group(GroupInstanceDecl {
            name: element.attribute("name"),
            subgraph: element.attribute("group_name"),
            sockets: element.children.iter().filter_map(interface_from_element).collect(),
        }),
        _ => {
            let Element {
                tag,
                mut attributes,
                children,
            } = element;
            let name = attributes.shift_remove("name").unwrap_or_default();
            let sockets = children
                .into_iter()
                .filter(|child| child.tag == "input")
                .map(|child| SocketAssignment {
                    name: child.attribute("name"),
                    value: child.attributes.get("value").cloned(),
                })
                .collect();
            Directive::Node(NodeDecl {
                tag,
                name,
                attributes,
                sockets,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <materials>
          <material name="Red">
            <shader>
              <principled_bsdf name="BSDF">
                <input name="BaseColor" value="0.8 0.1 0.1"/>
                <input name="Roughness" value="0.3"/>
              </principled_bsdf>
              <group name="Wear" group_name="UV Degradation">
                <input name="Levels" type="float"/>
                <output name="OutColor" type="color"/>
              </group>
              <connect from_node="BSDF" from_socket="BSDF" to_node="Output" to_socket="Surface"/>
            </shader>
            <shader><value name="Ignored" value="1"/></shader>
          </material>
          <group name="Rough">
            <input name="Roughness" type="float"/>
            <shader/>
          </group>
          <comment/>
        </materials>
    "#;

    #[test]
    fn test_xml_units_and_directives() {
        let document = Document::from_xml(SAMPLE).unwrap();
        assert_eq!(document.units.len(), 2);

        let red = &document.units[0];
        assert_eq!(red.kind, UnitKind::Material);
        assert_eq!(red.directives.len(), 3);

        match &red.directives[0] {
            Directive::Node(node) => {
                assert_eq!(node.tag, "principled_bsdf");
                assert_eq!(node.name, "BSDF");
                assert!(node.attributes.is_empty());
                assert_eq!(node.sockets[0].name, "BaseColor");
                assert_eq!(node.sockets[0].value.as_deref(), Some("0.8 0.1 0.1"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &red.directives[1] {
            Directive::Group(group) => {
                assert_eq!(group.subgraph, "UV Degradation");
                assert_eq!(group.sockets[1], InterfaceDecl::new("OutColor", SocketDirection::Output, "color"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            red.directives[2],
            Directive::Connect(ConnectDecl::new("BSDF", "BSDF", "Output", "Surface"))
        );

        let rough = document.unit("Rough").unwrap();
        assert_eq!(rough.kind, UnitKind::Group);
        assert_eq!(rough.interface, vec![InterfaceDecl::new("Roughness", SocketDirection::Input, "float")]);
        assert!(rough.directives.is_empty());
    }

    #[test]
    fn test_attributes_are_unescaped() {
        let xml = r#"<m><material name="A &amp; B"><shader><value name="V" value="0.5"/></shader></material></m>"#;
        let document = Document::from_xml(xml).unwrap();
        assert_eq!(document.units[0].name, "A & B");
        match &document.units[0].directives[0] {
            Directive::Node(node) => assert_eq!(node.attributes.get("value").map(String::as_str), Some("0.5")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_malformed_xml() {
        assert!(Document::from_xml("<materials><material name=\"A\">").is_err());
        assert!(matches!(Document::from_xml(""), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_ron_form() {
        let document = Document {
            units: vec![Unit::new(UnitKind::Material, "Mat")
                .with_directive(Directive::Node(NodeDecl::new("value", "V").with_attribute("value", "0.5")))
                .with_directive(Directive::Connect(ConnectDecl::new("V", "Value", "Output", "Displacement")))],
        };
        let text = ron::ser::to_string_pretty(&document, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(Document::from_ron(&text).unwrap(), document);
    }
}
