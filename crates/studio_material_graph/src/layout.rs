// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered layout for finished node graphs.
//!
//! Nodes are grouped into levels by their backward distance from the sink
//! nodes (nodes whose results go nowhere else). Level 0 holds the sinks and
//! sits at the origin; every further level is packed against the previous one
//! on the upstream side. A node reachable along several paths is placed only
//! at its deepest level.
//!
//! The engine reads nothing but nodes and links, and iterates both in graph
//! insertion order, so the same graph always produces the same layout.

use crate::graph::{CycleError, Graph};
use crate::link::SocketRef;
use crate::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Gap between two adjacent levels
pub const DEFAULT_COLUMN_GAP: f32 = 200.0;

/// Margin between two nodes stacked in the same level
pub const DEFAULT_ROW_MARGIN: f32 = 225.0;

/// Axis along which levels are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDirection {
    /// Data flows left to right, sinks on the right
    #[default]
    LeftRight,
    /// Data flows top to bottom, sinks at the bottom
    TopDown,
}

/// Layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Position of the first sink
    pub origin: [f32; 2],
    /// Gap between adjacent levels
    pub column_gap: f32,
    /// Margin between nodes within a level
    pub row_margin: f32,
    /// Flow direction
    pub direction: RankDirection,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            column_gap: DEFAULT_COLUMN_GAP,
            row_margin: DEFAULT_ROW_MARGIN,
            direction: RankDirection::default(),
        }
    }
}

impl LayoutConfig {
    /// Extent of a node along the level axis
    fn rank_extent(&self, node: &Node) -> f32 {
        match self.direction {
            RankDirection::LeftRight => node.width(),
            RankDirection::TopDown => stacked_height(node),
        }
    }

    /// Extent of a node across the level axis
    fn cross_extent(&self, node: &Node) -> f32 {
        match self.direction {
            RankDirection::LeftRight => stacked_height(node),
            RankDirection::TopDown => node.width(),
        }
    }

    fn position(&self, rank: f32, cross: f32) -> [f32; 2] {
        let [ox, oy] = self.origin;
        match self.direction {
            RankDirection::LeftRight => [ox + rank, oy + cross],
            RankDirection::TopDown => [ox - cross, oy - rank],
        }
    }
}

/// Collapsed nodes only take up half their height
fn stacked_height(node: &Node) -> f32 {
    if node.collapsed {
        node.height() / 2.0
    } else {
        node.height()
    }
}

/// One column (or row) of the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutLevel {
    /// Nodes in first-discovered order
    pub nodes: Vec<NodeId>,
    /// Coordinate of the level along the flow axis, relative to the origin
    pub offset: f32,
    /// Center of the stacked nodes across the flow axis, relative to the origin
    pub center: f32,
}

/// Result of laying out a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Levels, sinks first
    pub levels: Vec<LayoutLevel>,
    /// Nodes not reachable backward from any sink
    pub unreached: Vec<NodeId>,
    /// Whether positions were written to the graph
    pub arranged: bool,
}

impl Layout {
    /// Nodes reached from the sinks, level by level
    pub fn reached(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.levels.iter().flat_map(|level| level.nodes.iter().copied())
    }

    /// Node ids per level
    pub fn node_levels(&self) -> Vec<Vec<NodeId>> {
        self.levels.iter().map(|level| level.nodes.clone()).collect()
    }
}

/// Error during layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Backward traversal would not terminate
    #[error("Cannot lay out graph: {0}")]
    Cycle(#[from] CycleError),
}

/// Find the sink nodes of a graph in node order.
///
/// A sink has no outgoing links and either has at least one linked input or
/// has no outputs at all. Nodes without any links that still produce values
/// are orphans, not sinks.
pub fn find_sinks(graph: &Graph) -> Vec<NodeId> {
    graph
        .nodes()
        .filter(|node| graph.outgoing(node.id).next().is_none())
        .filter(|node| node.outputs.is_empty() || graph.incoming(node.id).next().is_some())
        .map(|node| node.id)
        .collect()
}

/// Assign every node reachable from a sink to exactly one level.
pub fn compute_levels(graph: &Graph) -> Result<Vec<Vec<NodeId>>, LayoutError> {
    graph.topological_order()?;

    let sinks = find_sinks(graph);
    if sinks.is_empty() {
        return Ok(Vec::new());
    }

    let mut levels = vec![sinks];
    loop {
        let mut next = Vec::new();
        let mut seen = HashSet::new();
        for &node_id in levels.last().into_iter().flatten() {
            let Some(node) = graph.node(node_id) else {
                continue;
            };
            for index in 0..node.inputs.len() {
                for link in graph.links_to(SocketRef::new(node_id, index)) {
                    if seen.insert(link.from.node) {
                        next.push(link.from.node);
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        levels.push(next);
    }

    // A node stays only at the deepest level it was discovered on
    let mut deepest: HashMap<NodeId, usize> = HashMap::new();
    for (depth, level) in levels.iter().enumerate() {
        for &node_id in level {
            deepest.insert(node_id, depth);
        }
    }
    for (depth, level) in levels.iter_mut().enumerate() {
        level.retain(|node_id| deepest.get(node_id) == Some(&depth));
    }

    Ok(levels)
}

/// Lay out a graph.
///
/// With `enabled` false no positions are written; the returned layout still
/// reports the levels and the nodes that could not be reached from a sink.
pub fn arrange(graph: &mut Graph, config: &LayoutConfig, enabled: bool) -> Result<Layout, LayoutError> {
    let node_levels = compute_levels(graph)?;

    let reached: HashSet<NodeId> = node_levels.iter().flatten().copied().collect();
    let unreached: Vec<NodeId> = graph.node_ids().filter(|id| !reached.contains(id)).collect();

    if node_levels.is_empty() && graph.node_count() > 0 {
        tracing::warn!("No sink node found in graph '{}'", graph.name);
    }

    if !enabled {
        let levels = node_levels
            .into_iter()
            .map(|nodes| LayoutLevel { nodes, offset: 0.0, center: 0.0 })
            .collect();
        return Ok(Layout { levels, unreached, arranged: false });
    }

    let mut levels = Vec::with_capacity(node_levels.len());
    let mut previous_offset = 0.0;

    for (depth, nodes) in node_levels.into_iter().enumerate() {
        let offset = if depth == 0 {
            0.0
        } else {
            let extent = nodes
                .iter()
                .filter_map(|id| graph.node(*id))
                .map(|node| config.rank_extent(node))
                .fold(0.0_f32, f32::max);
            previous_offset - (extent + config.column_gap)
        };
        previous_offset = offset;

        let mut cross = 0.0;
        for id in &nodes {
            if let Some(node) = graph.node_mut(*id) {
                node.position = config.position(offset, cross);
                cross -= config.row_margin + config.cross_extent(node);
            }
        }
        let center = (cross + config.row_margin) / 2.0;

        levels.push(LayoutLevel { nodes, offset, center });
    }

    tracing::debug!(
        "Arranged graph '{}' into {} levels ({} unreached nodes)",
        graph.name,
        levels.len(),
        unreached.len()
    );

    Ok(Layout { levels, unreached, arranged: true })
}
