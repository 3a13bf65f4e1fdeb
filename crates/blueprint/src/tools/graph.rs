//! Graph inspection and wiring: pins, connections, node queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::BlueprintCommand;
use crate::schema;

/// Connect `source_pin_name` on one node to `target_pin_name` on another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectBlueprintNodes {
    pub blueprint_name: String,
    pub source_node_id: String,
    pub source_pin_name: String,
    pub target_node_id: String,
    pub target_pin_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_or_graph_name: Option<String>,
}

impl BlueprintCommand for ConnectBlueprintNodes {
    const NAME: &'static str = "connect_blueprint_nodes";
    const DESCRIPTION: &'static str = "Connect an output pin of one node to an input pin of \
        another. Execution flow uses the 'then' output and 'execute' input pins.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("source_node_id", schema::string("ID of the source node")),
                ("source_pin_name", schema::string("Output pin on the source node, e.g. 'then'")),
                ("target_node_id", schema::string("ID of the target node")),
                ("target_pin_name", schema::string("Input pin on the target node, e.g. 'execute'")),
                (
                    "function_or_graph_name",
                    schema::string("Optional graph containing both nodes (e.g. 'EventGraph')"),
                ),
            ],
            &[
                "blueprint_name",
                "source_node_id",
                "source_pin_name",
                "target_node_id",
                "target_pin_name",
            ],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Connecting {}.{} -> {}.{} in blueprint '{}'",
            self.source_node_id,
            self.source_pin_name,
            self.target_node_id,
            self.target_pin_name,
            self.blueprint_name
        )
    }
}

/// Query nodes by type. Both filters are always sent, as `null` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindBlueprintNodes {
    pub blueprint_name: String,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

impl BlueprintCommand for FindBlueprintNodes {
    const NAME: &'static str = "find_blueprint_nodes";
    const DESCRIPTION: &'static str = "Find nodes in a Blueprint's event graph, optionally \
        filtered by node type (Event, Function, Variable) and event type (BeginPlay, Tick). \
        Returns the matching node IDs.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("node_type", schema::string("Optional node type filter (Event, Function, Variable)")),
                ("event_type", schema::string("Optional event filter (BeginPlay, Tick, ...)")),
            ],
            &["blueprint_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Finding nodes in blueprint '{}' (node_type={:?}, event_type={:?})",
            self.blueprint_name, self.node_type, self.event_type
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNodePins {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub node_id: String,
}

impl BlueprintCommand for GetNodePins {
    const NAME: &'static str = "get_node_pins";
    const DESCRIPTION: &'static str =
        "List the pins of a node with their names, directions and types.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("node_id", schema::string("ID of the node to inspect")),
            ],
            &["blueprint_name", "function_or_graph_name", "node_id"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Getting pins of node {} in blueprint '{}'",
            self.node_id, self.blueprint_name
        )
    }
}

/// Set the literal default of an input pin. `default_value` is sent as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodePinDefaultValue {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub node_id: String,
    pub pin_name: String,
    pub default_value: Value,
}

impl BlueprintCommand for SetNodePinDefaultValue {
    const NAME: &'static str = "set_node_pin_default_value";
    const DESCRIPTION: &'static str = "Set the default value of an input pin on a node, e.g. the \
        'InString' pin of a PrintString node.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("node_id", schema::string("ID of the node owning the pin")),
                ("pin_name", schema::string("Name of the input pin")),
                (
                    "default_value",
                    schema::any("Value to assign; booleans are usually passed as \"true\"/\"false\""),
                ),
            ],
            &[
                "blueprint_name",
                "function_or_graph_name",
                "node_id",
                "pin_name",
                "default_value",
            ],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Setting {}.{} = {} in blueprint '{}'",
            self.node_id, self.pin_name, self.default_value, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAllNodes {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
}

impl BlueprintCommand for GetAllNodes {
    const NAME: &'static str = "get_all_nodes";
    const DESCRIPTION: &'static str = "List every node in a Blueprint graph.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![schema::blueprint_name(), schema::graph_name()],
            &["blueprint_name", "function_or_graph_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Listing nodes of graph '{}' in blueprint '{}'",
            self.function_or_graph_name, self.blueprint_name
        )
    }
}
