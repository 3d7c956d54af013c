// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed lookup tables for Studio material documents.

use studio_material_graph::{SocketDirection, SocketType};

/// Boundary sockets that may be wired straight from a group input to a group
/// output, with the type they are created with.
pub const PASSTHROUGHS: &[(&str, SocketType)] = &[
    ("Levels", SocketType::Int),
    ("MinColorRatio", SocketType::Float),
    ("MaxColorRatio", SocketType::Float),
    ("enable", SocketType::Bool),
];

/// Generic operand names mapped to socket positions, tried after the
/// per-type alias tables.
pub const POSITIONAL_FALLBACKS: &[(&str, usize)] = &[
    ("Value1", 0),
    ("Value2", 1),
    ("Vector1", 0),
    ("Vector2", 1),
    ("Color1", 0),
    ("Color2", 1),
    ("Shader1", 0),
    ("Shader2", 1),
    ("Input1", 0),
    ("Input2", 1),
];

/// Studio tags that instantiate a built-in group, and the group's name
pub const CUSTOM_NODE_GROUPS: &[(&str, &str)] = &[
    ("uv_degradation", UV_DEGRADATION),
    ("project_to_axis_plane", "Project to Axis Planes"),
];

/// Name of the built-in UV degradation group
pub const UV_DEGRADATION: &str = "UV Degradation";

/// The one interface socket whose type is allowed to disagree between
/// references.
///
/// Studio documents declare the UV Degradation `Levels` input as a float,
/// while the group itself defines it as an integer. The existing integer
/// socket is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyInterfaceException {
    /// Group name
    pub subgraph: &'static str,
    /// Socket name
    pub socket: &'static str,
    /// Socket direction
    pub direction: SocketDirection,
    /// Type the interface defines
    pub defined: SocketType,
    /// Type documents declare
    pub declared: SocketType,
}

/// UV Degradation `Levels`: defined as Int, declared as Float
pub const UV_DEGRADATION_LEVELS: LegacyInterfaceException = LegacyInterfaceException {
    subgraph: UV_DEGRADATION,
    socket: "Levels",
    direction: SocketDirection::Input,
    defined: SocketType::Int,
    declared: SocketType::Float,
};

impl LegacyInterfaceException {
    /// Whether a type disagreement is this exception
    pub fn matches(
        &self,
        subgraph: &str,
        socket: &str,
        direction: SocketDirection,
        existing: SocketType,
        requested: SocketType,
    ) -> bool {
        self.subgraph == subgraph
            && self.socket == socket
            && self.direction == direction
            && ((existing == self.defined && requested == self.declared)
                || (existing == self.declared && requested == self.defined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_exception_is_narrow() {
        let ex = UV_DEGRADATION_LEVELS;
        assert!(ex.matches(UV_DEGRADATION, "Levels", SocketDirection::Input, SocketType::Int, SocketType::Float));
        assert!(ex.matches(UV_DEGRADATION, "Levels", SocketDirection::Input, SocketType::Float, SocketType::Int));
        assert!(!ex.matches(UV_DEGRADATION, "Levels", SocketDirection::Input, SocketType::Int, SocketType::Color));
        assert!(!ex.matches(UV_DEGRADATION, "Strength", SocketDirection::Input, SocketType::Int, SocketType::Float));
        assert!(!ex.matches("Other", "Levels", SocketDirection::Input, SocketType::Int, SocketType::Float));
    }
}
