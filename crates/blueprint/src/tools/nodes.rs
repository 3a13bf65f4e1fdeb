//! Node creation commands.
//!
//! Nodes that the editor places itself take no position. The rest accept an
//! optional `node_position` that defaults to `[0, 0]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::BlueprintCommand;
use crate::params::{null_as_default, NodePosition, ParamMap};
use crate::schema;

// ── Function calls ──────────────────────────────────────────────────

/// Call `target_function` on `target_class` (e.g. `UKismetSystemLibrary::PrintString`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFunctionCallNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub target_class: String,
    pub target_function: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: ParamMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddFunctionCallNode {
    const NAME: &'static str = "add_function_call_node";
    const DESCRIPTION: &'static str = "Add a function call node to a Blueprint's event graph or \
        function graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                (
                    "target_class",
                    schema::string("Class owning the function, e.g. 'UKismetSystemLibrary' or 'Self'"),
                ),
                ("target_function", schema::string("Function to call, e.g. 'PrintString'")),
                ("params", schema::object("Optional parameters to set on the node (default {})")),
                ("node_position", schema::node_position()),
            ],
            &[
                "blueprint_name",
                "function_or_graph_name",
                "target_class",
                "target_function",
            ],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding function call node '{}::{}' to graph '{}' of blueprint '{}'",
            self.target_class, self.target_function, self.function_or_graph_name, self.blueprint_name
        )
    }
}

/// Call `function_name` on a component or `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintFunctionNode {
    pub blueprint_name: String,
    pub target: String,
    pub function_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: ParamMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddBlueprintFunctionNode {
    const NAME: &'static str = "add_blueprint_function_node";
    const DESCRIPTION: &'static str =
        "Add a function call node to a Blueprint's event graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("target", schema::string("Target object for the function (component name or self)")),
                ("function_name", schema::string("Name of the function to call")),
                ("params", schema::object("Optional parameters to set on the node (default {})")),
                ("node_position", schema::node_position()),
            ],
            &["blueprint_name", "target", "function_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding function node '{}' to blueprint '{}'",
            self.function_name, self.blueprint_name
        )
    }
}

// ── References ──────────────────────────────────────────────────────

/// Get a reference to a component owned by the Blueprint, like dragging it
/// in from the Components panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintGetSelfComponentReference {
    pub blueprint_name: String,
    pub component_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddBlueprintGetSelfComponentReference {
    const NAME: &'static str = "add_blueprint_get_self_component_reference";
    const DESCRIPTION: &'static str = "Add a node that gets a reference to a component owned by \
        the Blueprint. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("component_name", schema::string("Name of the component to reference")),
                ("node_position", schema::node_position()),
            ],
            &["blueprint_name", "component_name"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding self component reference node for '{}' to blueprint '{}'",
            self.component_name, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintSelfReference {
    pub blueprint_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_position: NodePosition,
}

impl BlueprintCommand for AddBlueprintSelfReference {
    const NAME: &'static str = "add_blueprint_self_reference";
    const DESCRIPTION: &'static str = "Add a 'Get Self' node to a Blueprint's event graph that \
        returns a reference to this actor. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![schema::blueprint_name(), ("node_position", schema::node_position())],
            &["blueprint_name"],
        )
    }

    fn summary(&self) -> String {
        format!("Adding self reference node to blueprint '{}'", self.blueprint_name)
    }
}

// ── Operators and flow control ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMathNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub operation: String,
    pub data_type: String,
}

impl BlueprintCommand for AddMathNode {
    const NAME: &'static str = "add_math_node";
    const DESCRIPTION: &'static str =
        "Add a math operation node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("operation", schema::string("Math operation (Add, Subtract, Multiply, Divide)")),
                ("data_type", schema::string("Operand type (Integer, Float, Vector, ...)")),
            ],
            &["blueprint_name", "function_or_graph_name", "operation", "data_type"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding math node '{}' ({}) to blueprint '{}'",
            self.operation, self.data_type, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddControlNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub control_type: String,
}

impl BlueprintCommand for AddControlNode {
    const NAME: &'static str = "add_control_node";
    const DESCRIPTION: &'static str =
        "Add a control flow node (Branch, Sequence, ForLoop, ...) to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("control_type", schema::string("Control node type (Branch, Sequence, ForLoop, ...)")),
            ],
            &["blueprint_name", "function_or_graph_name", "control_type"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding control node '{}' to blueprint '{}'",
            self.control_type, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSequenceNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
}

impl BlueprintCommand for AddSequenceNode {
    const NAME: &'static str = "add_sequence_node";
    const DESCRIPTION: &'static str = "Add a sequence node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![schema::blueprint_name(), schema::graph_name()],
            &["blueprint_name", "function_or_graph_name"],
        )
    }

    fn summary(&self) -> String {
        format!("Adding sequence node to blueprint '{}'", self.blueprint_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSelectNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
}

impl BlueprintCommand for AddSelectNode {
    const NAME: &'static str = "add_select_node";
    const DESCRIPTION: &'static str = "Add a select node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![schema::blueprint_name(), schema::graph_name()],
            &["blueprint_name", "function_or_graph_name"],
        )
    }

    fn summary(&self) -> String {
        format!("Adding select node to blueprint '{}'", self.blueprint_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEnumSwitchNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub enum_path: String,
}

impl BlueprintCommand for AddEnumSwitchNode {
    const NAME: &'static str = "add_enum_switch_node";
    const DESCRIPTION: &'static str =
        "Add a switch-on-enum node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("enum_path", schema::string("Enum asset path, e.g. '/Game/Enums/MyEnum.MyEnum'")),
            ],
            &["blueprint_name", "function_or_graph_name", "enum_path"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding enum switch node for '{}' to blueprint '{}'",
            self.enum_path, self.blueprint_name
        )
    }
}

// ── Structs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMakeStructNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub struct_path: String,
}

impl BlueprintCommand for AddMakeStructNode {
    const NAME: &'static str = "add_make_struct_node";
    const DESCRIPTION: &'static str = "Add a make struct node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        struct_schema()
    }

    fn summary(&self) -> String {
        format!(
            "Adding make struct node for '{}' to blueprint '{}'",
            self.struct_path, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBreakStructNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub struct_path: String,
}

impl BlueprintCommand for AddBreakStructNode {
    const NAME: &'static str = "add_break_struct_node";
    const DESCRIPTION: &'static str = "Add a break struct node to a Blueprint graph. Returns the new node's ID.";

    fn input_schema() -> Value {
        struct_schema()
    }

    fn summary(&self) -> String {
        format!(
            "Adding break struct node for '{}' to blueprint '{}'",
            self.struct_path, self.blueprint_name
        )
    }
}

fn struct_schema() -> Value {
    schema::tool_input(
        vec![
            schema::blueprint_name(),
            schema::graph_name(),
            (
                "struct_path",
                schema::string("Struct asset path, e.g. '/Game/Structs/MyStruct.MyStruct'"),
            ),
        ],
        &["blueprint_name", "function_or_graph_name", "struct_path"],
    )
}

// ── Variables and components ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddVariableGetNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub variable_name: String,
}

impl BlueprintCommand for AddVariableGetNode {
    const NAME: &'static str = "add_variable_get_node";
    const DESCRIPTION: &'static str =
        "Add a node that reads a Blueprint member variable. Returns the new node's ID.";

    fn input_schema() -> Value {
        variable_schema()
    }

    fn summary(&self) -> String {
        format!(
            "Adding variable get node for '{}' to blueprint '{}'",
            self.variable_name, self.blueprint_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddVariableSetNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub variable_name: String,
}

impl BlueprintCommand for AddVariableSetNode {
    const NAME: &'static str = "add_variable_set_node";
    const DESCRIPTION: &'static str =
        "Add a node that writes a Blueprint member variable. Returns the new node's ID.";

    fn input_schema() -> Value {
        variable_schema()
    }

    fn summary(&self) -> String {
        format!(
            "Adding variable set node for '{}' to blueprint '{}'",
            self.variable_name, self.blueprint_name
        )
    }
}

fn variable_schema() -> Value {
    schema::tool_input(
        vec![
            schema::blueprint_name(),
            schema::graph_name(),
            ("variable_name", schema::string("Name of an existing member variable")),
        ],
        &["blueprint_name", "function_or_graph_name", "variable_name"],
    )
}

/// Add an "Add Component" node spawning a component of `component_class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddComponentNode {
    pub blueprint_name: String,
    pub function_or_graph_name: String,
    pub component_class: String,
}

impl BlueprintCommand for AddComponentNode {
    const NAME: &'static str = "add_component_node";
    const DESCRIPTION: &'static str =
        "Add a node that adds a component of the given class at runtime. Returns the new node's ID.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                schema::graph_name(),
                ("component_class", schema::string("Component class, e.g. 'StaticMeshComponent'")),
            ],
            &["blueprint_name", "function_or_graph_name", "component_class"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding component node for '{}' to blueprint '{}'",
            self.component_class, self.blueprint_name
        )
    }
}
