// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

impl SocketDirection {
    /// Lowercase name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value category carried by a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    /// Floating point value
    Float,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// 3-component vector
    Vector,
    /// RGBA color
    Color,
    /// Shader closure, carries no value
    Shader,
}

impl SocketType {
    /// Parse the socket type tag used by Studio documents.
    ///
    /// Tags are `float`, `int`, `boolean`, `vector`, `color` and `closure`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "float" => Some(Self::Float),
            "int" => Some(Self::Int),
            "boolean" | "bool" => Some(Self::Bool),
            "vector" => Some(Self::Vector),
            "color" => Some(Self::Color),
            "closure" | "shader" => Some(Self::Shader),
            _ => None,
        }
    }

    /// Number of numeric components a literal of this type holds
    pub fn component_count(&self) -> usize {
        match self {
            Self::Float | Self::Int | Self::Bool => 1,
            Self::Vector => 3,
            Self::Color => 4,
            Self::Shader => 0,
        }
    }

    /// Neutral default value for a freshly created socket of this type
    pub fn default_value(&self) -> Option<SocketValue> {
        match self {
            Self::Float => Some(SocketValue::Float(0.0)),
            Self::Int => Some(SocketValue::Int(0)),
            Self::Bool => Some(SocketValue::Bool(false)),
            Self::Vector => Some(SocketValue::Vector([0.0; 3])),
            Self::Color => Some(SocketValue::Color([0.0, 0.0, 0.0, 1.0])),
            Self::Shader => None,
        }
    }

    /// Check if an output of this type may feed an input of `other`.
    ///
    /// Value types convert implicitly into each other; shader closures only
    /// connect to shader inputs.
    pub fn can_connect_to(&self, other: &SocketType) -> bool {
        match (self, other) {
            (Self::Shader, Self::Shader) => true,
            (Self::Shader, _) | (_, Self::Shader) => false,
            _ => true,
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "Float",
            Self::Int => "Int",
            Self::Bool => "Bool",
            Self::Vector => "Vector",
            Self::Color => "Color",
            Self::Shader => "Shader",
        };
        f.write_str(name)
    }
}

/// Value that can be stored in a socket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Float
    Float(f32),
    /// Integer
    Int(i32),
    /// Boolean
    Bool(bool),
    /// Vector
    Vector([f32; 3]),
    /// Color (RGBA)
    Color([f32; 4]),
}

impl SocketValue {
    /// Get the socket type for this value
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Float(_) => SocketType::Float,
            Self::Int(_) => SocketType::Int,
            Self::Bool(_) => SocketType::Bool,
            Self::Vector(_) => SocketType::Vector,
            Self::Color(_) => SocketType::Color,
        }
    }
}

/// A socket on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    /// Socket name, not necessarily unique on a node
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Current literal value (None for shader sockets)
    pub value: Option<SocketValue>,
    /// Whether the socket is active for the node's current mode
    pub enabled: bool,
}

impl Socket {
    /// Create a new socket with the type's neutral default
    pub fn new(name: impl Into<String>, socket_type: SocketType, direction: SocketDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            socket_type,
            value: socket_type.default_value(),
            enabled: true,
        }
    }

    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self::new(name, socket_type, SocketDirection::Input)
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self::new(name, socket_type, SocketDirection::Output)
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Mark the socket as disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check if a link from this socket to another is valid
    pub fn can_connect(&self, other: &Socket) -> bool {
        if self.direction == other.direction {
            return false;
        }

        let (from, to) = match self.direction {
            SocketDirection::Output => (self, other),
            SocketDirection::Input => (other, self),
        };
        from.socket_type.can_connect_to(&to.socket_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        assert_eq!(SocketType::from_tag("closure"), Some(SocketType::Shader));
        assert_eq!(SocketType::from_tag("Boolean"), Some(SocketType::Bool));
        assert_eq!(SocketType::from_tag("matrix"), None);
    }

    #[test]
    fn test_connection_rules() {
        assert!(SocketType::Float.can_connect_to(&SocketType::Color));
        assert!(SocketType::Vector.can_connect_to(&SocketType::Float));
        assert!(SocketType::Shader.can_connect_to(&SocketType::Shader));
        assert!(!SocketType::Shader.can_connect_to(&SocketType::Color));
        assert!(!SocketType::Color.can_connect_to(&SocketType::Shader));
    }

    #[test]
    fn test_socket_direction_check() {
        let out = Socket::output("Value", SocketType::Float);
        let input = Socket::input("Roughness", SocketType::Float);
        assert!(out.can_connect(&input));
        assert!(input.can_connect(&out));
        assert!(!out.can_connect(&out.clone()));
    }

    #[test]
    fn test_shader_sockets_carry_no_value() {
        let socket = Socket::input("Surface", SocketType::Shader);
        assert!(socket.value.is_none());
    }
}
