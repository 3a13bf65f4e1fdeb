//! Blueprint-level commands: create, compile, add variables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::BlueprintCommand;
use crate::params::null_as_default;
use crate::schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBlueprint {
    pub name: String,
    pub parent_class: String,
}

impl BlueprintCommand for CreateBlueprint {
    const NAME: &'static str = "create_blueprint";
    const DESCRIPTION: &'static str = "Create a new Blueprint class deriving from a parent class (e.g. 'Actor').";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                ("name", schema::string("Name of the Blueprint to create, e.g. 'BP_Test'")),
                ("parent_class", schema::string("Parent class, e.g. 'Actor' or 'Pawn'")),
            ],
            &["name", "parent_class"],
        )
    }

    fn summary(&self) -> String {
        format!("Creating blueprint '{}' from '{}'", self.name, self.parent_class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileBlueprint {
    pub blueprint_name: String,
}

impl BlueprintCommand for CompileBlueprint {
    const NAME: &'static str = "compile_blueprint";
    const DESCRIPTION: &'static str = "Compile a Blueprint so graph edits take effect.";

    fn input_schema() -> Value {
        schema::tool_input(vec![schema::blueprint_name()], &["blueprint_name"])
    }

    fn summary(&self) -> String {
        format!("Compiling blueprint '{}'", self.blueprint_name)
    }
}

/// Add a member variable. `is_exposed` defaults to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBlueprintVariable {
    pub blueprint_name: String,
    pub variable_name: String,
    pub variable_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_exposed: bool,
}

impl BlueprintCommand for AddBlueprintVariable {
    const NAME: &'static str = "add_blueprint_variable";
    const DESCRIPTION: &'static str = "Add a variable to a Blueprint.";

    fn input_schema() -> Value {
        schema::tool_input(
            vec![
                schema::blueprint_name(),
                ("variable_name", schema::string("Name of the variable")),
                (
                    "variable_type",
                    schema::string("Type of the variable (Boolean, Integer, Float, Vector, ...)"),
                ),
                (
                    "is_exposed",
                    schema::boolean("Whether to expose the variable to the editor (default false)"),
                ),
            ],
            &["blueprint_name", "variable_name", "variable_type"],
        )
    }

    fn summary(&self) -> String {
        format!(
            "Adding variable '{}' to blueprint '{}'",
            self.variable_name, self.blueprint_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_exposure_defaults_to_false() {
        let cmd = AddBlueprintVariable::from_arguments(json!({
            "blueprint_name": "BP",
            "variable_name": "Health",
            "variable_type": "Float"
        }))
        .unwrap();
        assert_eq!(
            Value::Object(cmd.to_params().unwrap()),
            json!({"blueprint_name": "BP", "variable_name": "Health", "variable_type": "Float", "is_exposed": false})
        );
    }

    #[test]
    fn test_create_blueprint_params() {
        let cmd = CreateBlueprint::from_arguments(json!({"name": "BP_Test", "parent_class": "Actor"})).unwrap();
        assert_eq!(
            Value::Object(cmd.to_params().unwrap()),
            json!({"name": "BP_Test", "parent_class": "Actor"})
        );
    }

    #[test]
    fn test_compile_requires_blueprint_name() {
        assert!(CompileBlueprint::from_arguments(json!({"name": "BP"})).is_err());
    }
}
