// SPDX-License-Identifier: MIT OR Apache-2.0
//! Saved graph format and load/store.
//!
//! Only node identity, type and position are written. Port layouts are
//! implied by the type name and rebuilt through the [`NodeRegistry`] on load.

use crate::connection::{Connection, ConnectionId};
use crate::graph::Graph;
use crate::node::{is_finite_position, NodeId};
use crate::port::PortId;
use crate::registry::NodeRegistry;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A persisted node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node ID
    pub id: NodeId,
    /// Canonical type name
    #[serde(rename = "type")]
    pub node_type: String,
    /// Canvas X
    pub x: f64,
    /// Canvas Y
    pub y: f64,
}

/// A persisted connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    /// Connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub from_node_id: NodeId,
    /// Source port ID
    pub from_port_id: PortId,
    /// Target node ID
    pub to_node_id: NodeId,
    /// Target port ID
    pub to_port_id: PortId,
}

/// Persisted state of a whole graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    /// Nodes, in graph order
    pub nodes: Vec<NodeRecord>,
    /// Connections, in graph order
    pub connections: Vec<ConnectionRecord>,
}

impl GraphState {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(s: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, PersistError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self, PersistError> {
        Ok(ron::from_str(s)?)
    }

    /// Save to a file. `.ron` files are written as RON, anything else as JSON.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let contents = if is_ron(path) {
            self.to_ron()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load from a file, picking the format by extension like [`GraphState::save`]
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let contents = std::fs::read_to_string(path)?;
        if is_ron(path) {
            Self::from_ron(&contents)
        } else {
            Self::from_json(&contents)
        }
    }
}

fn is_ron(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"))
}

/// Outcome of [`Graph::deserialize`].
///
/// Loading never fails as a whole; records that cannot be restored are
/// dropped and counted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Nodes added to the graph
    pub nodes_restored: usize,
    /// Node records skipped (unknown type, non-finite position or duplicate ID)
    pub nodes_dropped: usize,
    /// Connections added to the graph
    pub connections_restored: usize,
    /// Connection records skipped (missing endpoint or duplicate ID)
    pub connections_dropped: usize,
    /// Distinct unknown type names, in first-seen order
    pub unknown_types: Vec<String>,
}

impl LoadReport {
    /// Whether every record was restored
    pub fn is_complete(&self) -> bool {
        self.nodes_dropped == 0 && self.connections_dropped == 0
    }
}

impl Graph {
    /// Capture the graph as persistable records, in insertion order
    pub fn serialize(&self) -> GraphState {
        GraphState {
            nodes: self
                .nodes()
                .map(|node| {
                    let (x, y) = node.position();
                    NodeRecord {
                        id: node.id().clone(),
                        node_type: node.node_type().to_string(),
                        x,
                        y,
                    }
                })
                .collect(),
            connections: self
                .connections()
                .map(|c| ConnectionRecord {
                    id: c.id().clone(),
                    from_node_id: c.from_node.clone(),
                    from_port_id: c.from_port.clone(),
                    to_node_id: c.to_node.clone(),
                    to_port_id: c.to_port.clone(),
                })
                .collect(),
        }
    }

    /// Replace the graph contents with a persisted state.
    ///
    /// Nodes of unknown type are dropped, and so is every connection that
    /// references them, since connections go through the normal endpoint
    /// check in [`Graph::add_connection`].
    pub fn deserialize(&mut self, state: &GraphState, registry: &NodeRegistry) -> LoadReport {
        self.clear();
        let mut report = LoadReport::default();
        let mut unknown_types = IndexSet::new();

        for record in &state.nodes {
            if !is_finite_position(record.x, record.y) {
                tracing::warn!(
                    "Dropped node {}: non-finite position ({}, {})",
                    record.id,
                    record.x,
                    record.y
                );
                report.nodes_dropped += 1;
                continue;
            }
            let restored =
                registry.restore(record.id.clone(), &record.node_type, record.x, record.y);
            let Some(node) = restored else {
                tracing::warn!("Dropped node {}: unknown type {}", record.id, record.node_type);
                unknown_types.insert(record.node_type.as_str());
                report.nodes_dropped += 1;
                continue;
            };
            match self.add_node(node) {
                Ok(_) => report.nodes_restored += 1,
                Err(_) => report.nodes_dropped += 1,
            }
        }
        report.unknown_types = unknown_types.into_iter().map(str::to_string).collect();

        for record in &state.connections {
            let connection = Connection::restore(
                record.id.clone(),
                record.from_node_id.clone(),
                record.from_port_id.clone(),
                record.to_node_id.clone(),
                record.to_port_id.clone(),
            );
            match self.add_connection(connection) {
                Ok(_) => report.connections_restored += 1,
                Err(_) => report.connections_dropped += 1,
            }
        }

        tracing::debug!(
            "Loaded graph {}: {} nodes, {} connections",
            self.name,
            report.nodes_restored,
            report.connections_restored
        );
        report
    }
}

/// Error when reading or writing a saved graph
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON encoding failed
    #[error("RON encode error: {0}")]
    RonEncode(#[from] ron::Error),

    /// Malformed RON
    #[error("RON decode error: {0}")]
    RonDecode(#[from] ron::error::SpannedError),
}
