//! Event entry points of a Blueprint's event graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::BlueprintCommand;
use crate::params::{null_as_default, NodePosition};
use crate::schema;

/// Add an event node (e.g. `ReceiveBeginPlay`, `ReceiveTick`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintEventNode {
    pub blueprint_name: String,
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddBlueprintEventNode {
    const NAME: &'static str = "add_blueprint_event_node";
    const DESCRIPTION: &'static str = "Add an event node to a Blueprint's event graph. \
        Use the 'Receive' prefix for standard events: 'ReceiveBeginPlay' for Begin Play, \
        'ReceiveTick' for Tick. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("event_name", schema::string("Name of the event, e.g. 'ReceiveBeginPlay'")),
                ("node_position", schema::node_position()),
            ],
            &["blueprint_name", "event_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding event node '{}' to blueprint '{}'",
            self.event_name, self.blueprint_name
        )
    }
}

/// Add an input action event node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintInputActionNode {
    pub blueprint_name: String,
    pub action_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddBlueprintInputActionNode {
    const NAME: &'static str = "add_blueprint_input_action_node";
    const DESCRIPTION: &'static str =
        "Add an input action event node to a Blueprint's event graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("action_name", schema::string("Name of the input action to respond to")),
                ("node_position", schema::node_position()),
            ],
            &["blueprint_name", "action_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding input action node for '{}' to blueprint '{}'",
            self.action_name, self.blueprint_name
        )
    }
}

/// Look up an existing event node by event name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindEventNodeByName {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub event_name: String,
}

impl BlueprintCommand for FindEventNodeByName {
    const NAME: &'static str = "find_event_node_by_name";
    const DESCRIPTION: &'static str =
        "Find an event node in a Blueprint graph by its event name. Returns the node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                (
                    "event_name",
                    schema::string("Event to find, e.g. 'ReceiveBeginPlay' or 'ReceiveTick'"),
                ),
            ],
            &["blueprint_name", "function_or_graph_name", "event_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Finding event node '{}' in blueprint '{}'",
            self.event_name, self.blueprint_name
        )
    }
}
