// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a port, unique within one side (inputs or outputs) of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    /// Create a port ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PortId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Execution flow, sequences actions rather than carrying a value
    Flow,
    /// Numeric value
    Number,
    /// String value
    String,
    /// Boolean value
    Boolean,
    /// Wildcard, compatible with every type
    Any,
}

impl PortType {
    /// Every port type, in declaration order
    pub const ALL: [PortType; 5] = [
        Self::Flow,
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::Any,
    ];

    /// Lowercase tag used in diagnostics and text formats
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flow => "flow",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Check if a value of this type may be wired into a port of `other`.
    ///
    /// `Any` on either side matches everything; otherwise the types must be
    /// equal. There are no implicit conversions, and `Flow` follows the same
    /// rule as data types.
    pub fn is_compatible_with(self, other: PortType) -> bool {
        matches!(self, Self::Any) || matches!(other, Self::Any) || self == other
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a port type tag is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown port type: {0:?}")]
pub struct ParsePortTypeError(pub String);

impl FromStr for PortType {
    type Err = ParsePortTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ParsePortTypeError(s.to_string()))
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port ID
    pub id: PortId,
    /// Display name
    pub name: String,
    /// Data type
    pub port_type: PortType,
}

impl Port {
    /// Create a new port
    pub fn new(id: impl Into<PortId>, name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            port_type,
        }
    }

    /// Check if a connection from this port into `target` is type-compatible
    pub fn can_connect(&self, target: &Port) -> bool {
        self.port_type.is_compatible_with(target.port_type)
    }
}
