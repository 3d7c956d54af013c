// SPDX-License-Identifier: MIT OR Apache-2.0
//! Studio material import.
//!
//! Turns Studio material descriptions into typed shader node graphs:
//! - Node tags are mapped to node types through an immutable registry
//! - Socket names are resolved through per-type aliases and positional fallbacks
//! - Group interfaces are synthesized the first time a boundary socket is used
//! - Shader contributions into one input are merged with Add Shader nodes
//! - Finished graphs are laid out in levels
//!
//! Problems with single directives are collected as diagnostics; the rest of
//! the document is still imported.

pub mod lookups;
pub mod registry;
pub mod studio_nodes;
pub mod diagnostics;
pub mod literal;
pub mod resolver;
pub mod interface;
pub mod library;
pub mod merge;
pub mod configure;
pub mod custom_groups;
pub mod document;
pub mod assets;
pub mod settings;
pub mod builder;

pub use assets::{AssetError, AssetLoader, FsAssetLoader, MemoryAssetLoader};
pub use builder::{import_document, GraphBuilder, ImportResult, ImportSession, Material, MATERIAL_OUTPUT_NAME};
pub use diagnostics::{Diagnostic, Diagnostics, ImportError, Severity};
pub use document::{
    ConnectDecl, Directive, Document, DocumentError, GroupInstanceDecl, InterfaceDecl, NodeDecl, SocketAssignment,
    Unit, UnitKind,
};
pub use interface::{BindOutcome, Binding, Interface, InterfaceConflict, InterfaceSocket};
pub use library::{Subgraph, SubgraphLibrary};
pub use merge::{insert_link, InsertLinkError, LinkOutcome};
pub use registry::{AliasTarget, MixMode, NodeKind, NodeTypeEntry, NodeTypeRegistry};
pub use resolver::resolve_socket;
pub use settings::{ImportSettings, Resolution, SettingsError};
