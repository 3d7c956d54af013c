// SPDX-License-Identifier: MIT OR Apache-2.0
//! Import diagnostics.
//!
//! Failures are recorded here instead of being propagated across directive
//! boundaries. Every recorded diagnostic is also logged through `tracing`.

use crate::interface::InterfaceConflict;
use crate::merge::InsertLinkError;
use std::fmt;
use std::path::PathBuf;
use studio_material_graph::{GraphError, LayoutError, SocketDirection, SocketType};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, nothing was lost
    Note,
    /// Something was skipped or substituted, processing continued
    Warning,
    /// A directive or unit was aborted
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Errors raised while importing a document
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    /// Node tag not present in the registry
    #[error("Unrecognized node tag '{tag}'")]
    UnrecognizedNodeTag {
        /// Tag as written in the document
        tag: String,
    },

    /// A socket name could not be resolved on a node
    #[error("No {direction} socket '{socket}' on node '{node}' (available: {})", available.join(", "))]
    SocketResolution {
        /// Node name
        node: String,
        /// Socket name searched
        socket: String,
        /// Direction searched
        direction: SocketDirection,
        /// Socket names the node has in that direction
        available: Vec<String>,
    },

    /// A group interface socket was redeclared with another type
    #[error("Interface {direction} '{socket}' of group '{subgraph}' is {existing}, requested {requested}")]
    InterfaceTypeConflict {
        /// Group name
        subgraph: String,
        /// Socket name
        socket: String,
        /// Socket direction
        direction: SocketDirection,
        /// Type the socket was created with
        existing: SocketType,
        /// Type requested by the later reference
        requested: SocketType,
    },

    /// The legacy interface mismatch was accepted
    #[error("Group '{subgraph}' keeps {existing} for '{socket}' (document declares {requested})")]
    LegacyInterfaceMismatch {
        /// Group name
        subgraph: String,
        /// Socket name
        socket: String,
        /// Type kept
        existing: SocketType,
        /// Type declared
        requested: SocketType,
    },

    /// Image not found, a placeholder was used
    #[error("Image not found: {}", path.display())]
    MissingAsset {
        /// Requested path
        path: PathBuf,
    },

    /// A literal could not be parsed for its socket
    #[error("Invalid value '{value}' for '{socket}' on node '{node}': {reason}")]
    MalformedLiteral {
        /// Node name
        node: String,
        /// Socket or attribute name
        socket: String,
        /// Literal text
        value: String,
        /// Parse failure
        reason: String,
    },

    /// An attribute value is not in the property's vocabulary
    #[error("Invalid {attribute} '{value}' on node '{node}'")]
    InvalidAttribute {
        /// Node name
        node: String,
        /// Attribute name
        attribute: String,
        /// Attribute value
        value: String,
    },

    /// A required attribute is missing
    #[error("Missing attribute '{attribute}' on <{tag}>")]
    MissingAttribute {
        /// Directive tag
        tag: String,
        /// Attribute name
        attribute: String,
    },

    /// A directive names a node that does not exist
    #[error("Unknown node '{name}'")]
    UnknownNode {
        /// Node name
        name: String,
    },

    /// A node name is already used in the graph
    #[error("Node name '{name}' is already in use")]
    DuplicateNodeName {
        /// Node name
        name: String,
    },

    /// The graph refused a link
    #[error("Cannot link '{from}' to '{to}': {source}")]
    Link {
        /// Source as `node.socket`
        from: String,
        /// Target as `node.socket`
        to: String,
        /// Rejection reason
        source: InsertLinkError,
    },

    /// No type could be inferred for a group passthrough socket
    #[error("Cannot infer a type for passthrough socket '{socket}'")]
    PassthroughTypeUnknown {
        /// Socket name
        socket: String,
    },

    /// A group boundary node was declared outside a group
    #[error("<{tag}> is only allowed inside a group")]
    BoundaryOutsideGroup {
        /// Directive tag
        tag: String,
    },

    /// A group instantiates itself
    #[error("Group '{subgraph}' cannot contain an instance of itself")]
    RecursiveGroup {
        /// Group name
        subgraph: String,
    },

    /// A material or group is defined twice
    #[error("'{name}' is already defined")]
    DuplicateUnit {
        /// Unit name
        name: String,
    },

    /// A socket type tag is not recognized
    #[error("Unknown socket type '{tag}' for '{socket}'")]
    UnknownSocketType {
        /// Socket name
        socket: String,
        /// Type tag
        tag: String,
    },

    /// A group was used before its definition
    #[error("Group '{subgraph}' referenced before its definition")]
    ForwardReference {
        /// Group name
        subgraph: String,
    },

    /// The finished graph could not be laid out
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}

impl ImportError {
    /// Severity this error is reported with
    pub fn severity(&self) -> Severity {
        match self {
            Self::ForwardReference { .. } | Self::LegacyInterfaceMismatch { .. } => Severity::Note,
            Self::UnrecognizedNodeTag { .. }
            | Self::MissingAsset { .. }
            | Self::InvalidAttribute { .. }
            | Self::UnknownSocketType { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<InterfaceConflict> for ImportError {
    fn from(conflict: InterfaceConflict) -> Self {
        Self::InterfaceTypeConflict {
            subgraph: conflict.subgraph,
            socket: conflict.name,
            direction: conflict.direction,
            existing: conflict.existing,
            requested: conflict.requested,
        }
    }
}

impl From<GraphError> for ImportError {
    fn from(error: GraphError) -> Self {
        match error {
            GraphError::DuplicateName(name) => Self::DuplicateNodeName { name },
            GraphError::NodeNotFound(id) => Self::UnknownNode { name: id.0.to_string() },
        }
    }
}

/// A recorded diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Material or group being imported
    pub unit: String,
    /// Position of the directive within the unit
    pub directive: Option<usize>,
    /// What went wrong
    pub error: ImportError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.directive {
            Some(index) => write!(f, "{} [{} #{}]: {}", self.severity, self.unit, index, self.error),
            None => write!(f, "{} [{}]: {}", self.severity, self.unit, self.error),
        }
    }
}

/// Collected diagnostics of an import session
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and log it
    pub fn push(&mut self, unit: &str, directive: Option<usize>, error: ImportError) {
        let diagnostic = Diagnostic {
            severity: error.severity(),
            unit: unit.to_string(),
            directive,
            error,
        };
        match diagnostic.severity {
            Severity::Note => tracing::debug!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Error => tracing::error!("{}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    /// All diagnostics in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics recorded for one unit
    pub fn for_unit<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| d.unit == unit)
    }

    /// Number of diagnostics with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    /// Whether any error was recorded
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the recorded diagnostics
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let tag = ImportError::UnrecognizedNodeTag { tag: "hair_bsdf".into() };
        assert_eq!(tag.severity(), Severity::Warning);
        let forward = ImportError::ForwardReference { subgraph: "G".into() };
        assert_eq!(forward.severity(), Severity::Note);
        let unknown = ImportError::UnknownNode { name: "X".into() };
        assert_eq!(unknown.severity(), Severity::Error);
    }

    #[test]
    fn test_resolution_message_lists_sockets() {
        let err = ImportError::SocketResolution {
            node: "BSDF".into(),
            socket: "Glow".into(),
            direction: SocketDirection::Input,
            available: vec!["Base Color".into(), "Roughness".into()],
        };
        let message = err.to_string();
        assert!(message.contains("Glow"));
        assert!(message.contains("BSDF"));
        assert!(message.contains("Base Color, Roughness"));
    }

    #[test]
    fn test_collector_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push("Mat", Some(0), ImportError::UnrecognizedNodeTag { tag: "x".into() });
        diagnostics.push("Mat", Some(3), ImportError::UnknownNode { name: "Y".into() });
        diagnostics.push("Other", None, ImportError::ForwardReference { subgraph: "G".into() });

        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.for_unit("Mat").count(), 2);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.to_string()),
            Some("warning [Mat #0]: Unrecognized node tag 'x'".to_string())
        );
    }
}
