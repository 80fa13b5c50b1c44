// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A directed connection from an output port to an input port.
///
/// Endpoints are held by ID only and resolved through the owning graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    /// Source node ID
    pub from_node: NodeId,
    /// Source (output) port ID
    pub from_port: PortId,
    /// Target node ID
    pub to_node: NodeId,
    /// Target (input) port ID
    pub to_port: PortId,
}

impl Connection {
    /// Create a new connection with a freshly generated ID
    pub fn new(
        from_node: impl Into<NodeId>,
        from_port: impl Into<PortId>,
        to_node: impl Into<NodeId>,
        to_port: impl Into<PortId>,
    ) -> Self {
        Self::restore(ConnectionId::generate(), from_node, from_port, to_node, to_port)
    }

    /// Rebuild a connection under a known ID
    pub fn restore(
        id: ConnectionId,
        from_node: impl Into<NodeId>,
        from_port: impl Into<PortId>,
        to_node: impl Into<NodeId>,
        to_port: impl Into<PortId>,
    ) -> Self {
        Self {
            id,
            from_node: from_node.into(),
            from_port: from_port.into(),
            to_node: to_node.into(),
            to_port: to_port.into(),
        }
    }

    /// Connection ID
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        self.from_node == *node_id || self.to_node == *node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_endpoints() {
        let c = Connection::new("A", "flow_out", "B", "flow_in");
        assert_eq!(c.from_node, NodeId::from("A"));
        assert_eq!(c.to_port, PortId::from("flow_in"));
        assert!(c.involves_node(&NodeId::from("A")));
        assert!(c.involves_node(&NodeId::from("B")));
        assert!(!c.involves_node(&NodeId::from("C")));
    }

    #[test]
    fn test_restore_keeps_id() {
        let c = Connection::restore(ConnectionId::from("c1"), "A", "flow_out", "B", "flow_in");
        assert_eq!(c.id().as_str(), "c1");
        assert_ne!(Connection::new("A", "x", "B", "y").id(), c.id());
    }
}
