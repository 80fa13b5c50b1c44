// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic validation of a populated graph.

use crate::connection::ConnectionId;
use crate::graph::Graph;
use crate::port::PortType;

/// A problem found on a single connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// One or both endpoint nodes are missing
    #[error("Connection {connection} references non-existent nodes")]
    MissingNodes {
        /// Offending connection
        connection: ConnectionId,
    },

    /// The source output or target input port is missing
    #[error("Connection {connection} references non-existent ports")]
    MissingPorts {
        /// Offending connection
        connection: ConnectionId,
    },

    /// The port data types are incompatible
    #[error("Connection {connection} has incompatible port types: {from} -> {to}")]
    TypeMismatch {
        /// Offending connection
        connection: ConnectionId,
        /// Source port type
        from: PortType,
        /// Target port type
        to: PortType,
    },
}

impl ValidationIssue {
    /// ID of the connection this issue was raised for
    pub fn connection(&self) -> &ConnectionId {
        match self {
            Self::MissingNodes { connection }
            | Self::MissingPorts { connection }
            | Self::TypeMismatch { connection, .. } => connection,
        }
    }
}

/// Stateless checker for graph connections
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphValidator;

impl GraphValidator {
    /// Check every connection, in graph order.
    ///
    /// Each connection yields at most one issue: node resolution is checked
    /// first, then ports, then types. An empty result means the graph is
    /// structurally sound.
    pub fn validate(&self, graph: &Graph) -> Vec<ValidationIssue> {
        let issues: Vec<_> = graph
            .connections()
            .filter_map(|connection| {
                let id = connection.id().clone();
                let (Some(source), Some(target)) =
                    (graph.node(&connection.from_node), graph.node(&connection.to_node))
                else {
                    return Some(ValidationIssue::MissingNodes { connection: id });
                };
                let (Some(from), Some(to)) = (
                    source.output(&connection.from_port),
                    target.input(&connection.to_port),
                ) else {
                    return Some(ValidationIssue::MissingPorts { connection: id });
                };
                if from.can_connect(to) {
                    None
                } else {
                    Some(ValidationIssue::TypeMismatch {
                        connection: id,
                        from: from.port_type,
                        to: to.port_type,
                    })
                }
            })
            .collect();

        for issue in &issues {
            tracing::debug!("Validation issue in {}: {}", graph.name, issue);
        }
        issues
    }
}

/// Validate a graph with the default validator
pub fn validate(graph: &Graph) -> Vec<ValidationIssue> {
    GraphValidator.validate(graph)
}
