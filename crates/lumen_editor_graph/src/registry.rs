// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of node types, used to materialize nodes by type name.

use crate::kinds::NodeKind;
use crate::node::{is_finite_position, Node, NodeCategory, NodeId, NodeType};
use indexmap::IndexMap;

/// Registry of available node types.
///
/// Built once at startup and then passed by reference to whatever creates
/// or loads nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Registered node types by canonical name
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in node kind
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in NodeKind::ALL {
            registry.register(kind.definition());
        }
        registry
    }

    /// Register a node type, replacing any previous type of the same name
    pub fn register(&mut self, node_type: NodeType) {
        let type_name = node_type.type_name.clone();
        if self.types.insert(type_name.clone(), node_type).is_some() {
            tracing::debug!("Replaced node type registration: {}", type_name);
        } else {
            tracing::debug!("Registered node type: {}", type_name);
        }
    }

    /// Get a node type by name
    pub fn get(&self, type_name: &str) -> Option<&NodeType> {
        self.types.get(type_name)
    }

    /// Check whether a type name is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Get all registered types, in registration order
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a node of the named type with a fresh ID.
    ///
    /// Unknown names yield `None` and a warning; this usually means a save
    /// file references a node type that no longer exists. Non-finite
    /// coordinates are refused the same way.
    pub fn create(&self, type_name: &str, x: f64, y: f64) -> Option<Node> {
        self.lookup(type_name, x, y).map(|ty| Node::new(ty, x, y))
    }

    /// Rebuild a node of the named type under a persisted ID
    pub fn restore(&self, id: NodeId, type_name: &str, x: f64, y: f64) -> Option<Node> {
        self.lookup(type_name, x, y).map(|ty| Node::restore(id, ty, x, y))
    }

    fn lookup(&self, type_name: &str, x: f64, y: f64) -> Option<&NodeType> {
        if !is_finite_position(x, y) {
            tracing::warn!("Refused {} at non-finite position ({}, {})", type_name, x, y);
            return None;
        }
        let found = self.types.get(type_name);
        if found.is_none() {
            tracing::warn!("Unknown node type: {}", type_name);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{Port, PortId, PortType};

    #[test]
    fn test_builtins_registered() {
        let registry = NodeRegistry::with_builtins();
        assert_eq!(registry.len(), NodeKind::ALL.len());
        for kind in NodeKind::ALL {
            assert!(registry.contains(kind.type_name()));
        }
        assert!(NodeRegistry::new().is_empty());
    }

    #[test]
    fn test_create_known_type() {
        let registry = NodeRegistry::with_builtins();
        let node = registry.create("OnKeyPressEventNode", 5.0, 6.0).unwrap();
        assert_eq!(node.node_type(), "OnKeyPressEventNode");
        assert_eq!(node.position(), (5.0, 6.0));
        assert!(node.output(&PortId::from("flow_out")).is_some());
    }

    #[test]
    fn test_create_unknown_type() {
        let registry = NodeRegistry::with_builtins();
        assert!(registry.create("TeleportActionNode", 0.0, 0.0).is_none());
        assert!(registry
            .restore(NodeId::from("A"), "TeleportActionNode", 0.0, 0.0)
            .is_none());
    }

    #[test]
    fn test_create_rejects_non_finite_position() {
        let registry = NodeRegistry::with_builtins();
        assert!(registry.create("IfElseNode", f64::NAN, 0.0).is_none());
        assert!(registry.create("IfElseNode", 0.0, f64::INFINITY).is_none());
        assert!(registry
            .restore(NodeId::from("A"), "IfElseNode", f64::NEG_INFINITY, 0.0)
            .is_none());
    }

    #[test]
    fn test_restore_uses_given_id() {
        let registry = NodeRegistry::with_builtins();
        let node = registry
            .restore(NodeId::from("A"), "IfElseNode", 1.0, 1.0)
            .unwrap();
        assert_eq!(node.id().as_str(), "A");
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = NodeRegistry::with_builtins();
        let mut custom = NodeKind::Delay.definition();
        custom.outputs.push(Port::new("done_out", "Done", PortType::Flow));
        registry.register(custom);

        assert_eq!(registry.len(), NodeKind::ALL.len());
        let node = registry.create("DelayNode", 0.0, 0.0).unwrap();
        assert_eq!(node.outputs().count(), 2);
    }

    #[test]
    fn test_types_in_category() {
        let registry = NodeRegistry::with_builtins();
        let events: Vec<_> = registry
            .types_in_category(NodeCategory::Event)
            .map(|t| t.type_name.as_str())
            .collect();
        assert_eq!(
            events,
            vec![
                "OnStartEventNode",
                "OnKeyPressEventNode",
                "OnCollisionEventNode",
                "OnTimerEventNode"
            ]
        );
    }
}
