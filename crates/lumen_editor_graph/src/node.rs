// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::port::{Port, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new random node ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeCategory {
    /// Entry points triggered by the game (start, key press, collision)
    Event,
    /// Side-effecting steps in a flow chain
    Action,
    /// Constants, variables and pure computations
    Data,
    /// Branching and sequencing
    ControlFlow,
}

impl NodeCategory {
    /// Kebab-case tag, as used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Action => "action",
            Self::Data => "data",
            Self::ControlFlow => "control-flow",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node type definition.
///
/// A template from which node instances are stamped. `type_name` is the
/// canonical name written to save files and resolved by the registry on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    /// Canonical type name
    pub type_name: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

/// A node instance in the graph.
///
/// Identity, type and ports are fixed once constructed. The only mutable
/// state is the canvas position, which the owning graph updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    node_type: String,
    x: f64,
    y: f64,
    inputs: IndexMap<PortId, Port>,
    outputs: IndexMap<PortId, Port>,
}

impl Node {
    /// Create a new node from a type definition with a freshly generated ID
    pub fn new(node_type: &NodeType, x: f64, y: f64) -> Self {
        Self::restore(NodeId::generate(), node_type, x, y)
    }

    /// Rebuild a node from a type definition under a known ID
    pub fn restore(id: NodeId, node_type: &NodeType, x: f64, y: f64) -> Self {
        Self {
            id,
            node_type: node_type.type_name.clone(),
            x,
            y,
            inputs: port_map(&node_type.inputs),
            outputs: port_map(&node_type.outputs),
        }
    }

    /// Node ID
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Canonical type name
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Position on the canvas
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Get an input port by ID
    pub fn input(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs.get(port_id)
    }

    /// Get an output port by ID
    pub fn output(&self, port_id: &PortId) -> Option<&Port> {
        self.outputs.get(port_id)
    }

    /// Input ports in declaration order
    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.inputs.values()
    }

    /// Output ports in declaration order
    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.outputs.values()
    }

    /// Get all ports, inputs first
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.values().chain(self.outputs.values())
    }
}

/// Whether a canvas position can be stored and saved.
///
/// JSON has no representation for NaN or infinities.
pub fn is_finite_position(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite()
}

// First declaration of a port ID wins.
fn port_map(ports: &[Port]) -> IndexMap<PortId, Port> {
    let mut map = IndexMap::with_capacity(ports.len());
    for port in ports {
        map.entry(port.id.clone()).or_insert_with(|| port.clone());
    }
    map
}
