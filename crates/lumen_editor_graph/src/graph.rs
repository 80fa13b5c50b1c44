// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{is_finite_position, Node, NodeId};
use indexmap::IndexMap;

/// A node graph.
///
/// Owns every node and connection in one authored document. All mutation
/// goes through the methods below so that IDs stay unique and no connection
/// ever points at a node outside the graph.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph.
    ///
    /// A node whose ID is already present is rejected and the existing node
    /// is left untouched. So is a node placed at a non-finite position.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let (x, y) = node.position();
        if !is_finite_position(x, y) {
            tracing::warn!("Rejected node {} at non-finite position ({}, {})", node.id(), x, y);
            return Err(GraphError::NonFinitePosition(node.id().clone()));
        }
        if self.nodes.contains_key(node.id()) {
            tracing::warn!("Rejected node with duplicate ID: {}", node.id());
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        let id = node.id().clone();
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Remove a node and every connection touching it.
    ///
    /// Returns `false` if the node was not in the graph.
    pub fn remove_node(&mut self, node_id: &NodeId) -> bool {
        if !self.nodes.contains_key(node_id) {
            return false;
        }
        self.connections.retain(|_, c| !c.involves_node(node_id));
        self.nodes.shift_remove(node_id);
        true
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Check whether a node is in the graph
    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Move a node on the canvas.
    ///
    /// Returns `false` if the node is absent or the position is not finite;
    /// the node stays where it was.
    pub fn move_node(&mut self, node_id: &NodeId, x: f64, y: f64) -> bool {
        if !is_finite_position(x, y) {
            tracing::warn!("Refused to move node {} to ({}, {})", node_id, x, y);
            return false;
        }
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.set_position(x, y);
                true
            }
            None => false,
        }
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection between two nodes.
    ///
    /// Rejected if the ID is taken or either endpoint node is missing. Port
    /// existence and type compatibility are left to the validator.
    pub fn add_connection(&mut self, connection: Connection) -> Result<ConnectionId, GraphError> {
        if self.connections.contains_key(connection.id()) {
            tracing::warn!("Rejected connection with duplicate ID: {}", connection.id());
            return Err(GraphError::DuplicateConnection(connection.id().clone()));
        }
        for endpoint in [&connection.from_node, &connection.to_node] {
            if !self.nodes.contains_key(endpoint) {
                tracing::warn!(
                    "Rejected connection {}: node {} is not in the graph",
                    connection.id(),
                    endpoint
                );
                return Err(GraphError::MissingEndpoint {
                    connection: connection.id().clone(),
                    node: endpoint.clone(),
                });
            }
        }
        let id = connection.id().clone();
        self.connections.insert(id.clone(), connection);
        Ok(id)
    }

    /// Remove a connection. Returns whether it existed.
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> bool {
        self.connections.shift_remove(connection_id).is_some()
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    /// Get all connections, in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections leaving a node
    pub fn connections_from<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.values().filter(move |c| c.from_node == *node_id)
    }

    /// Get connections entering a node
    pub fn connections_to<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.values().filter(move |c| c.to_node == *node_id)
    }

    /// Get connections involving a node
    pub fn connections_for_node<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.values().filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether the graph has no nodes (and therefore no connections)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and connection
    pub fn clear(&mut self) {
        self.connections.clear();
        self.nodes.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert_connection_unchecked(&mut self, connection: Connection) {
        self.connections.insert(connection.id().clone(), connection);
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when a graph mutation is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node with this ID already exists
    #[error("Duplicate node ID: {0}")]
    DuplicateNode(NodeId),

    /// The node's position is NaN or infinite
    #[error("Node {0} has a non-finite position")]
    NonFinitePosition(NodeId),

    /// A connection with this ID already exists
    #[error("Duplicate connection ID: {0}")]
    DuplicateConnection(ConnectionId),

    /// A connection endpoint is not in the graph
    #[error("Connection {connection} references missing node {node}")]
    MissingEndpoint {
        /// The rejected connection
        connection: ConnectionId,
        /// The endpoint that could not be found
        node: NodeId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NodeRegistry;

    fn node(registry: &NodeRegistry, id: &str, type_name: &str) -> Node {
        registry
            .restore(NodeId::from(id), type_name, 0.0, 0.0)
            .unwrap()
    }

    fn sample() -> Graph {
        let registry = NodeRegistry::with_builtins();
        let mut graph = Graph::new("Sample");
        graph.add_node(node(&registry, "A", "OnKeyPressEventNode")).unwrap();
        graph.add_node(node(&registry, "B", "IfElseNode")).unwrap();
        graph.add_node(node(&registry, "C", "PrintMessageActionNode")).unwrap();
        graph
            .add_connection(Connection::restore("ab".into(), "A", "flow_out", "B", "flow_in"))
            .unwrap();
        graph
            .add_connection(Connection::restore("bc".into(), "B", "true_out", "C", "flow_in"))
            .unwrap();
        graph
            .add_connection(Connection::restore("ac".into(), "A", "key_out", "C", "message_in"))
            .unwrap();
        graph
    }

    #[test]
    fn test_add_node_rejects_duplicate() {
        let registry = NodeRegistry::with_builtins();
        let mut graph = Graph::default();
        graph.add_node(node(&registry, "A", "OnStartEventNode")).unwrap();

        let result = graph.add_node(node(&registry, "A", "DelayNode"));
        assert_eq!(result, Err(GraphError::DuplicateNode(NodeId::from("A"))));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(
            graph.node(&NodeId::from("A")).unwrap().node_type(),
            "OnStartEventNode"
        );
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = sample();
        assert!(graph.remove_node(&NodeId::from("A")));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
        assert!(graph.connection(&"bc".into()).is_some());
        assert!(graph
            .connections()
            .all(|c| !c.involves_node(&NodeId::from("A"))));
    }

    #[test]
    fn test_remove_missing_node() {
        let mut graph = sample();
        assert!(!graph.remove_node(&NodeId::from("Z")));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.connection_count(), 3);
    }

    #[test]
    fn test_add_connection_requires_both_nodes() {
        let mut graph = sample();
        let result = graph.add_connection(Connection::restore(
            "bz".into(),
            "B",
            "false_out",
            "Z",
            "flow_in",
        ));
        assert_eq!(
            result,
            Err(GraphError::MissingEndpoint {
                connection: "bz".into(),
                node: NodeId::from("Z"),
            })
        );
        let result = graph.add_connection(Connection::restore(
            "zb".into(),
            "Z",
            "flow_out",
            "B",
            "flow_in",
        ));
        assert!(result.is_err());
        assert_eq!(graph.connection_count(), 3);
    }

    #[test]
    fn test_add_connection_rejects_duplicate() {
        let mut graph = sample();
        let result = graph.add_connection(Connection::restore(
            "ab".into(),
            "B",
            "false_out",
            "C",
            "flow_in",
        ));
        assert_eq!(result, Err(GraphError::DuplicateConnection("ab".into())));
        assert_eq!(graph.connection(&"ab".into()).unwrap().to_node, NodeId::from("B"));
    }

    #[test]
    fn test_add_connection_skips_port_checks() {
        let mut graph = sample();
        let id = graph
            .add_connection(Connection::new("A", "no_such_port", "B", "condition_in"))
            .unwrap();
        assert!(graph.connection(&id).is_some());
    }

    #[test]
    fn test_remove_connection() {
        let mut graph = sample();
        assert!(graph.remove_connection(&"bc".into()));
        assert!(!graph.remove_connection(&"bc".into()));
        assert_eq!(graph.connection_count(), 2);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_removal_preserves_order() {
        let mut graph = sample();
        graph.remove_connection(&"ab".into());
        let ids: Vec<_> = graph.connections().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["bc", "ac"]);

        graph.remove_node(&NodeId::from("B"));
        let ids: Vec<_> = graph.node_ids().map(NodeId::as_str).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn test_connection_queries() {
        let graph = sample();
        let a = NodeId::from("A");
        let c = NodeId::from("C");
        assert_eq!(graph.connections_from(&a).count(), 2);
        assert_eq!(graph.connections_to(&a).count(), 0);
        assert_eq!(graph.connections_to(&c).count(), 2);
        assert_eq!(graph.connections_for_node(&NodeId::from("B")).count(), 2);
    }

    #[test]
    fn test_move_node() {
        let mut graph = sample();
        assert!(graph.move_node(&NodeId::from("B"), 120.0, 40.0));
        assert_eq!(graph.node(&NodeId::from("B")).unwrap().position(), (120.0, 40.0));
        assert!(!graph.move_node(&NodeId::from("Z"), 0.0, 0.0));
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        let mut graph = sample();
        let b = NodeId::from("B");
        assert!(!graph.move_node(&b, f64::NAN, f64::INFINITY));
        assert_eq!(graph.node(&b).unwrap().position(), (0.0, 0.0));

        let ty = crate::kinds::NodeKind::Delay.definition();
        let stray = Node::restore(NodeId::from("D"), &ty, f64::NAN, 0.0);
        assert_eq!(
            graph.add_node(stray),
            Err(GraphError::NonFinitePosition(NodeId::from("D")))
        );
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut graph = sample();
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.connection_count(), 0);
    }
}
