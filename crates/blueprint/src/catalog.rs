use std::sync::Arc;

use tracing::debug;
use unreal_engine_link::CommandSink;
use unreal_tool_runtime::{RegistryError, ToolRegistry};

use crate::command::{BlueprintCommand, CommandTool};
use crate::tools::*;

/// Tool names in registration order.
pub const TOOL_NAMES: &[&str] = &[
    CreateBlueprint::NAME,
    AddFunctionCallNode::NAME,
    AddBlueprintEventNode::NAME,
    AddBlueprintInputActionNode::NAME,
    ConnectBlueprintNodes::NAME,
    AddBlueprintVariable::NAME,
    AddBlueprintGetSelfComponentReference::NAME,
    AddBlueprintSelfReference::NAME,
    FindBlueprintNodes::NAME,
    AddBlueprintFunctionNode::NAME,
    AddMathNode::NAME,
    AddControlNode::NAME,
    AddSequenceNode::NAME,
    AddSelectNode::NAME,
    AddEnumSwitchNode::NAME,
    AddMakeStructNode::NAME,
    AddBreakStructNode::NAME,
    FindEventNodeByName::NAME,
    GetNodePins::NAME,
    SetNodePinDefaultValue::NAME,
    GetAllNodes::NAME,
    CompileBlueprint::NAME,
    AddVariableGetNode::NAME,
    AddVariableSetNode::NAME,
    AddComponentNode::NAME,
];

/// Register every Blueprint tool against one shared command sink.
pub fn register_blueprint_tools(
    registry: &mut ToolRegistry,
    sink: Arc<dyn CommandSink>,
) -> Result<(), RegistryError> {
    fn add<C: BlueprintCommand>(
        registry: &mut ToolRegistry,
        sink: &Arc<dyn CommandSink>,
    ) -> Result<(), RegistryError> {
        registry.register(CommandTool::<C>::new(Arc::clone(sink)))
    }

    add::<CreateBlueprint>(registry, &sink)?;
    add::<AddFunctionCallNode>(registry, &sink)?;
    add::<AddBlueprintEventNode>(registry, &sink)?;
    add::<AddBlueprintInputActionNode>(registry, &sink)?;
    add::<ConnectBlueprintNodes>(registry, &sink)?;
    add::<AddBlueprintVariable>(registry, &sink)?;
    add::<AddBlueprintGetSelfComponentReference>(registry, &sink)?;
    add::<AddBlueprintSelfReference>(registry, &sink)?;
    add::<FindBlueprintNodes>(registry, &sink)?;
    add::<AddBlueprintFunctionNode>(registry, &sink)?;
    add::<AddMathNode>(registry, &sink)?;
    add::<AddControlNode>(registry, &sink)?;
    add::<AddSequenceNode>(registry, &sink)?;
    add::<AddSelectNode>(registry, &sink)?;
    add::<AddEnumSwitchNode>(registry, &sink)?;
    add::<AddMakeStructNode>(registry, &sink)?;
    add::<AddBreakStructNode>(registry, &sink)?;
    add::<FindEventNodeByName>(registry, &sink)?;
    add::<GetNodePins>(registry, &sink)?;
    add::<SetNodePinDefaultValue>(registry, &sink)?;
    add::<GetAllNodes>(registry, &sink)?;
    add::<CompileBlueprint>(registry, &sink)?;
    add::<AddVariableGetNode>(registry, &sink)?;
    add::<AddVariableSetNode>(registry, &sink)?;
    add::<AddComponentNode>(registry, &sink)?;

    debug!(count = TOOL_NAMES.len(), "registered blueprint tools");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use serde_json::{json, Value};
    use unreal_tool_runtime::ToolContext;

    fn registry(sink: Arc<RecordingSink>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_blueprint_tools(&mut registry, sink).unwrap();
        registry
    }

    #[test]
    fn test_registers_every_tool_in_order() {
        let registry = registry(RecordingSink::replying(json!({})));
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, TOOL_NAMES);
        assert_eq!(registry.len(), 25);
    }

    #[test]
    fn test_registering_twice_is_rejected() {
        let sink = RecordingSink::replying(json!({}));
        let mut registry = ToolRegistry::new();
        register_blueprint_tools(&mut registry, sink.clone()).unwrap();
        let err = register_blueprint_tools(&mut registry, sink).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "create_blueprint"));
    }

    #[test]
    fn test_schemas_are_objects() {
        let registry = registry(RecordingSink::replying(json!({})));
        for def in registry.list() {
            assert_eq!(def.input_schema["type"], "object", "{}", def.name);
            assert!(def.input_schema["required"].is_array(), "{}", def.name);
            assert!(!def.description.is_empty(), "{}", def.name);
        }
    }

    /// Smallest valid argument object for each tool.
    fn minimal_arguments(name: &str) -> Value {
        let schema = {
            let registry = registry(RecordingSink::replying(json!({})));
            registry.get(name).unwrap().definition().input_schema
        };
        let mut args = serde_json::Map::new();
        for field in schema["required"].as_array().unwrap() {
            let field = field.as_str().unwrap();
            args.insert(field.to_string(), json!("x"));
        }
        Value::Object(args)
    }

    #[tokio::test]
    async fn test_unreachable_engine_fails_every_tool_uniformly() {
        let sink = RecordingSink::unreachable();
        let registry = registry(sink.clone());

        for name in TOOL_NAMES {
            let tool = registry.get(name).unwrap();
            let result = tool
                .execute(minimal_arguments(name), &ToolContext::new("t"))
                .await
                .unwrap();
            assert!(result.is_error, "{name}");
            let body: Value = serde_json::from_str(&result.content).unwrap();
            assert_eq!(
                body,
                json!({"success": false, "message": "Failed to connect to Unreal Engine"}),
                "{name}"
            );
        }
        assert_eq!(sink.calls().len(), TOOL_NAMES.len());
    }

    #[tokio::test]
    async fn test_empty_reply_is_no_response_for_every_tool() {
        let registry = registry(RecordingSink::replying(json!({})));
        for name in TOOL_NAMES {
            let result = registry
                .get(name)
                .unwrap()
                .execute(minimal_arguments(name), &ToolContext::default())
                .await
                .unwrap();
            let body: Value = serde_json::from_str(&result.content).unwrap();
            assert_eq!(body["message"], "No response from Unreal Engine", "{name}");
        }
    }
}
