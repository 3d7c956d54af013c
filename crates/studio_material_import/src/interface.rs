// SPDX-License-Identifier: MIT OR Apache-2.0
//! Group interfaces.
//!
//! An interface is an ordered list of boundary sockets. Each (name,
//! direction) pair starts out unbound and is bound to a type by the first
//! reference; later references must agree with that type. Sockets are only
//! ever appended, so socket positions on group nodes stay stable.

use crate::lookups::{LegacyInterfaceException, UV_DEGRADATION_LEVELS};
use serde::{Deserialize, Serialize};
use studio_material_graph::{SocketDirection, SocketType};

/// Interface socket types that are allowed to disagree
pub const LEGACY_EXCEPTIONS: &[LegacyInterfaceException] = &[UV_DEGRADATION_LEVELS];

/// State of an interface socket name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Not referenced yet
    Unbound,
    /// Bound to a type by its first reference
    Bound(SocketType),
}

/// A boundary socket of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSocket {
    /// Socket name
    pub name: String,
    /// Direction as seen from outside the group
    pub direction: SocketDirection,
    /// Socket type
    pub socket_type: SocketType,
}

/// Result of binding an interface socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The socket was created
    Created,
    /// The socket already existed with the same type
    Existing,
    /// The socket already existed with a type the legacy exception allows
    Legacy(LegacyInterfaceException),
}

/// A boundary socket was requested with a conflicting type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Interface {direction} '{name}' of '{subgraph}' is {existing}, requested {requested}")]
pub struct InterfaceConflict {
    /// Group name
    pub subgraph: String,
    /// Socket name
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Bound type
    pub existing: SocketType,
    /// Requested type
    pub requested: SocketType,
}

/// Ordered boundary sockets of one group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Owning group name
    pub subgraph: String,
    sockets: Vec<InterfaceSocket>,
}

impl Interface {
    /// Create an empty interface
    pub fn new(subgraph: impl Into<String>) -> Self {
        Self {
            subgraph: subgraph.into(),
            sockets: Vec::new(),
        }
    }

    /// Binding state of a socket name
    pub fn binding(&self, name: &str, direction: SocketDirection) -> Binding {
        match self.get(name, direction) {
            Some(socket) => Binding::Bound(socket.socket_type),
            None => Binding::Unbound,
        }
    }

    /// Look up a socket
    pub fn get(&self, name: &str, direction: SocketDirection) -> Option<&InterfaceSocket> {
        self.sockets
            .iter()
            .find(|s| s.direction == direction && s.name == name)
    }

    /// Sockets of one direction in creation order
    pub fn sockets(&self, direction: SocketDirection) -> impl Iterator<Item = &InterfaceSocket> {
        self.sockets.iter().filter(move |s| s.direction == direction)
    }

    /// Position of a socket among the sockets of its direction
    pub fn index_of(&self, name: &str, direction: SocketDirection) -> Option<usize> {
        self.sockets(direction).position(|s| s.name == name)
    }

    /// Number of sockets
    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    /// Whether no socket has been bound
    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// Check a request against the current bindings without changing them
    pub fn check(
        &self,
        name: &str,
        direction: SocketDirection,
        requested: SocketType,
    ) -> Result<BindOutcome, InterfaceConflict> {
        match self.binding(name, direction) {
            Binding::Unbound => Ok(BindOutcome::Created),
            Binding::Bound(existing) if existing == requested => Ok(BindOutcome::Existing),
            Binding::Bound(existing) => LEGACY_EXCEPTIONS
                .iter()
                .find(|ex| ex.matches(&self.subgraph, name, direction, existing, requested))
                .map(|ex| BindOutcome::Legacy(*ex))
                .ok_or_else(|| InterfaceConflict {
                    subgraph: self.subgraph.clone(),
                    name: name.to_string(),
                    direction,
                    existing,
                    requested,
                }),
        }
    }

    /// Bind a socket, creating it on first reference
    pub fn bind(
        &mut self,
        name: &str,
        direction: SocketDirection,
        requested: SocketType,
    ) -> Result<BindOutcome, InterfaceConflict> {
        let outcome = self.check(name, direction, requested)?;
        if outcome == BindOutcome::Created {
            self.sockets.push(InterfaceSocket {
                name: name.to_string(),
                direction,
                socket_type: requested,
            });
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups::UV_DEGRADATION;

    #[test]
    fn test_first_reference_binds() {
        let mut interface = Interface::new("Rough");
        assert_eq!(interface.binding("Roughness", SocketDirection::Input), Binding::Unbound);
        assert_eq!(
            interface.bind("Roughness", SocketDirection::Input, SocketType::Float),
            Ok(BindOutcome::Created)
        );
        assert_eq!(
            interface.binding("Roughness", SocketDirection::Input),
            Binding::Bound(SocketType::Float)
        );
        assert_eq!(
            interface.bind("Roughness", SocketDirection::Input, SocketType::Float),
            Ok(BindOutcome::Existing)
        );
        assert_eq!(interface.len(), 1);
    }

    #[test]
    fn test_directions_are_separate() {
        let mut interface = Interface::new("G");
        interface.bind("Color", SocketDirection::Input, SocketType::Color).unwrap();
        interface.bind("Color", SocketDirection::Output, SocketType::Float).unwrap();
        assert_eq!(interface.index_of("Color", SocketDirection::Output), Some(0));
        assert_eq!(interface.sockets(SocketDirection::Input).count(), 1);
    }

    #[test]
    fn test_conflict_keeps_existing_type() {
        let mut interface = Interface::new("G");
        interface.bind("Mask", SocketDirection::Input, SocketType::Float).unwrap();
        let err = interface
            .bind("Mask", SocketDirection::Input, SocketType::Color)
            .unwrap_err();
        assert_eq!(err.existing, SocketType::Float);
        assert_eq!(err.requested, SocketType::Color);
        assert_eq!(interface.binding("Mask", SocketDirection::Input), Binding::Bound(SocketType::Float));
    }

    #[test]
    fn test_legacy_levels_exception() {
        let mut interface = Interface::new(UV_DEGRADATION);
        interface.bind("Levels", SocketDirection::Input, SocketType::Int).unwrap();
        assert_eq!(
            interface.bind("Levels", SocketDirection::Input, SocketType::Float),
            Ok(BindOutcome::Legacy(UV_DEGRADATION_LEVELS))
        );
        assert_eq!(interface.binding("Levels", SocketDirection::Input), Binding::Bound(SocketType::Int));

        let mut other = Interface::new("Other");
        other.bind("Levels", SocketDirection::Input, SocketType::Int).unwrap();
        assert!(other.bind("Levels", SocketDirection::Input, SocketType::Float).is_err());
    }
}
