// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node kinds for event/action graphs.
//!
//! Each kind is pure data: a canonical type name, a category and a fixed
//! port layout. What a kind does at runtime is not modelled here.

use crate::node::{NodeCategory, NodeType};
use crate::port::{Port, PortType};

/// Built-in node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Fires once when play begins
    OnStart,
    /// Fires when a key is pressed
    OnKeyPress,
    /// Fires when the owner collides with another entity
    OnCollision,
    /// Fires repeatedly on an interval
    OnTimer,
    /// Writes a message to the game console
    PrintMessage,
    /// Adds to (or subtracts from) an entity's health
    ModifyHealth,
    /// Spawns an entity from a prefab
    SpawnEntity,
    /// Plays a sound clip
    PlaySound,
    /// Constant number
    NumberConstant,
    /// Constant string
    StringConstant,
    /// Constant boolean
    BooleanConstant,
    /// Reads a named variable
    GetVariable,
    /// Writes a named variable
    SetVariable,
    /// Compares two numbers
    CompareNumbers,
    /// Adds two numbers
    AddNumbers,
    /// Branches on a condition
    IfElse,
    /// Runs two flow outputs in order
    Sequence,
    /// Waits before continuing
    Delay,
}

impl NodeKind {
    /// Every built-in kind, in registration order
    pub const ALL: [NodeKind; 18] = [
        Self::OnStart,
        Self::OnKeyPress,
        Self::OnCollision,
        Self::OnTimer,
        Self::PrintMessage,
        Self::ModifyHealth,
        Self::SpawnEntity,
        Self::PlaySound,
        Self::NumberConstant,
        Self::StringConstant,
        Self::BooleanConstant,
        Self::GetVariable,
        Self::SetVariable,
        Self::CompareNumbers,
        Self::AddNumbers,
        Self::IfElse,
        Self::Sequence,
        Self::Delay,
    ];

    /// Canonical type name, as written to save files
    pub fn type_name(self) -> &'static str {
        match self {
            Self::OnStart => "OnStartEventNode",
            Self::OnKeyPress => "OnKeyPressEventNode",
            Self::OnCollision => "OnCollisionEventNode",
            Self::OnTimer => "OnTimerEventNode",
            Self::PrintMessage => "PrintMessageActionNode",
            Self::ModifyHealth => "ModifyHealthActionNode",
            Self::SpawnEntity => "SpawnEntityActionNode",
            Self::PlaySound => "PlaySoundActionNode",
            Self::NumberConstant => "NumberConstantNode",
            Self::StringConstant => "StringConstantNode",
            Self::BooleanConstant => "BooleanConstantNode",
            Self::GetVariable => "GetVariableNode",
            Self::SetVariable => "SetVariableNode",
            Self::CompareNumbers => "CompareNumbersNode",
            Self::AddNumbers => "AddNumbersNode",
            Self::IfElse => "IfElseNode",
            Self::Sequence => "SequenceNode",
            Self::Delay => "DelayNode",
        }
    }

    /// Resolve a canonical type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Category of this kind
    pub fn category(self) -> NodeCategory {
        match self {
            Self::OnStart | Self::OnKeyPress | Self::OnCollision | Self::OnTimer => {
                NodeCategory::Event
            }
            Self::PrintMessage | Self::ModifyHealth | Self::SpawnEntity | Self::PlaySound => {
                NodeCategory::Action
            }
            Self::NumberConstant
            | Self::StringConstant
            | Self::BooleanConstant
            | Self::GetVariable
            | Self::SetVariable
            | Self::CompareNumbers
            | Self::AddNumbers => NodeCategory::Data,
            Self::IfElse | Self::Sequence | Self::Delay => NodeCategory::ControlFlow,
        }
    }

    /// Build the node type template for this kind
    pub fn definition(self) -> NodeType {
        use PortType::{Any, Boolean, Flow, Number, String as Text};

        let (name, description, inputs, outputs) = match self {
            Self::OnStart => (
                "On Start",
                "Triggered when gameplay starts",
                vec![],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
            Self::OnKeyPress => (
                "On Key Press",
                "Triggered when a key is pressed",
                vec![],
                vec![
                    Port::new("flow_out", "Out", Flow),
                    Port::new("key_out", "Key", Text),
                ],
            ),
            Self::OnCollision => (
                "On Collision",
                "Triggered when the owner touches another entity",
                vec![],
                vec![
                    Port::new("flow_out", "Out", Flow),
                    Port::new("other_out", "Other", Text),
                ],
            ),
            Self::OnTimer => (
                "On Timer",
                "Triggered every interval seconds",
                vec![Port::new("interval_in", "Interval", Number)],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
            Self::PrintMessage => (
                "Print Message",
                "Print a message to the console",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("message_in", "Message", Text),
                ],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
            Self::ModifyHealth => (
                "Modify Health",
                "Change an entity's health by an amount",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("target_in", "Target", Text),
                    Port::new("amount_in", "Amount", Number),
                ],
                vec![
                    Port::new("flow_out", "Out", Flow),
                    Port::new("health_out", "Health", Number),
                ],
            ),
            Self::SpawnEntity => (
                "Spawn Entity",
                "Spawn a prefab at a position",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("prefab_in", "Prefab", Text),
                    Port::new("x_in", "X", Number),
                    Port::new("y_in", "Y", Number),
                ],
                vec![
                    Port::new("flow_out", "Out", Flow),
                    Port::new("entity_out", "Entity", Text),
                ],
            ),
            Self::PlaySound => (
                "Play Sound",
                "Play a sound clip",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("sound_in", "Sound", Text),
                    Port::new("volume_in", "Volume", Number),
                ],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
            Self::NumberConstant => (
                "Number",
                "Constant number value",
                vec![],
                vec![Port::new("value_out", "Value", Number)],
            ),
            Self::StringConstant => (
                "String",
                "Constant string value",
                vec![],
                vec![Port::new("value_out", "Value", Text)],
            ),
            Self::BooleanConstant => (
                "Boolean",
                "Constant boolean value",
                vec![],
                vec![Port::new("value_out", "Value", Boolean)],
            ),
            Self::GetVariable => (
                "Get Variable",
                "Read a named variable",
                vec![Port::new("name_in", "Name", Text)],
                vec![Port::new("value_out", "Value", Any)],
            ),
            Self::SetVariable => (
                "Set Variable",
                "Write a named variable",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("name_in", "Name", Text),
                    Port::new("value_in", "Value", Any),
                ],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
            Self::CompareNumbers => (
                "Compare Numbers",
                "True when A is greater than B",
                vec![
                    Port::new("a_in", "A", Number),
                    Port::new("b_in", "B", Number),
                ],
                vec![Port::new("result_out", "Result", Boolean)],
            ),
            Self::AddNumbers => (
                "Add Numbers",
                "A + B",
                vec![
                    Port::new("a_in", "A", Number),
                    Port::new("b_in", "B", Number),
                ],
                vec![Port::new("sum_out", "Sum", Number)],
            ),
            Self::IfElse => (
                "If / Else",
                "Branch on a condition",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("condition_in", "Condition", Boolean),
                ],
                vec![
                    Port::new("true_out", "True", Flow),
                    Port::new("false_out", "False", Flow),
                ],
            ),
            Self::Sequence => (
                "Sequence",
                "Run the first output, then the second",
                vec![Port::new("flow_in", "In", Flow)],
                vec![
                    Port::new("first_out", "First", Flow),
                    Port::new("second_out", "Second", Flow),
                ],
            ),
            Self::Delay => (
                "Delay",
                "Wait a number of seconds before continuing",
                vec![
                    Port::new("flow_in", "In", Flow),
                    Port::new("seconds_in", "Seconds", Number),
                ],
                vec![Port::new("flow_out", "Out", Flow)],
            ),
        };

        NodeType {
            type_name: self.type_name().to_string(),
            name: name.to_string(),
            category: self.category(),
            description: description.to_string(),
            inputs,
            outputs,
        }
    }
}
