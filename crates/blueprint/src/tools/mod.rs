pub mod blueprint;
pub mod events;
pub mod graph;
pub mod nodes;

pub use blueprint::{AddBlueprintVariable, CompileBlueprint, CreateBlueprint};
pub use events::{AddBlueprintEventNode, AddBlueprintInputActionNode, FindEventNodeByName};
pub use graph::{
    ConnectBlueprintNodes, FindBlueprintNodes, GetAllNodes, GetNodePins, SetNodePinDefaultValue,
};
pub use nodes::{
    AddBlueprintFunctionNode, AddBlueprintGetSelfComponentReference, AddBlueprintSelfReference,
    AddBreakStructNode, AddComponentNode, AddControlNode, AddEnumSwitchNode, AddFunctionCallNode,
    AddMakeStructNode, AddMathNode, AddSelectNode, AddSequenceNode, AddVariableGetNode,
    AddVariableSetNode,
};
