// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed shader node graph for Studio material import.
//!
//! This crate models the target graph environment the importer writes into:
//! - Typed input/output sockets (float, int, bool, vector, color, shader)
//! - Nodes with unique names and enumerated properties
//! - Links with single-link inputs
//! - Layered, deterministic layout of finished graphs

pub mod socket;
pub mod node;
pub mod link;
pub mod graph;
pub mod layout;

pub use socket::{Socket, SocketDirection, SocketType, SocketValue};
pub use node::{ImageHandle, Node, NodeCategory, NodeId, NodeType};
pub use link::{Link, LinkId, SocketRef};
pub use graph::{ConnectionError, CycleError, Graph, GraphError};
pub use layout::{arrange, compute_levels, find_sinks, Layout, LayoutConfig, LayoutError, LayoutLevel, RankDirection};
