// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph model for `Lumen` event/action graphs.
//!
//! Designers wire events, actions, data and control-flow nodes together in
//! the editor; this crate owns the resulting document:
//! - Typed input/output ports
//! - Node kinds and the registry that materializes them by name
//! - The graph container and its integrity rules
//! - Save/load of graph state
//! - Connection validation
//!
//! ## Architecture
//!
//! A [`Graph`] owns its nodes and connections. Connections refer to nodes
//! and ports by ID only. A [`NodeRegistry`] is passed explicitly wherever
//! nodes are created or loaded; the port layout of a node is never stored,
//! only its type name. The [`GraphValidator`] checks a finished graph and
//! reports problems as data.

pub mod port;
pub mod node;
pub mod kinds;
pub mod registry;
pub mod connection;
pub mod graph;
pub mod persistence;
pub mod validation;

pub use node::{is_finite_position, Node, NodeCategory, NodeId, NodeType};
pub use port::{ParsePortTypeError, Port, PortId, PortType};
pub use kinds::NodeKind;
pub use registry::NodeRegistry;
pub use connection::{Connection, ConnectionId};
pub use graph::{Graph, GraphError};
pub use persistence::{ConnectionRecord, GraphState, LoadReport, NodeRecord, PersistError};
pub use validation::{validate, GraphValidator, ValidationIssue};
