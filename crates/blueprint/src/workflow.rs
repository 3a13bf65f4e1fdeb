//! Scripted end-to-end run: a Blueprint that prints a string on BeginPlay.
//!
//! Steps, each sent as one command:
//!
//! 1. `create_blueprint`
//! 2. `add_function_call_node` for `UKismetSystemLibrary::PrintString`
//! 3. `set_node_pin_default_value` for `InString`, then `bPrintToLog`
//! 4. `find_event_node_by_name` for `ReceiveBeginPlay`
//! 5. `get_node_pins` on the event node, then the print node
//! 6. `connect_blueprint_nodes` from `then` to `execute`
//! 7. `compile_blueprint`
//! 8. `get_all_nodes`
//!
//! Every step after the first must answer `status: "success"`; the first one
//! that does not aborts the run. Nothing is rolled back. An editor-side
//! failure of `create_blueprint` is only logged so the run can be repeated
//! against an existing Blueprint.

use serde_json::{json, Value};
use tracing::{info, warn};
use unreal_engine_link::CommandSink;

use crate::command::{dispatch, BlueprintCommand};
use crate::envelope::Outcome;
use crate::params::{NodePosition, ParamMap};
use crate::tools::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("workflow step '{step}' failed: {response}")]
pub struct WorkflowError {
    /// Command name of the failing step.
    pub step: &'static str,
    /// What that step returned, verbatim or as a failure envelope.
    pub response: Value,
}

/// Node IDs and the final graph listing of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReport {
    pub print_node_id: String,
    pub event_node_id: String,
    pub event_pins: Value,
    pub print_pins: Value,
    pub nodes: Value,
}

#[derive(Debug, Clone)]
pub struct PrintStringWorkflow {
    pub blueprint_name: String,
    pub parent_class: String,
    pub graph: String,
    pub message: String,
}

impl Default for PrintStringWorkflow {
    fn default() -> Self {
        Self {
            blueprint_name: "BP_PrintString".into(),
            parent_class: "Actor".into(),
            graph: "EventGraph".into(),
            message: "Hello, Unreal MCP!".into(),
        }
    }
}

impl PrintStringWorkflow {
    pub fn run_description(&self) -> String {
        format!(
            "PrintString('{}') on BeginPlay in {}:{}",
            self.message, self.blueprint_name, self.graph
        )
    }

    pub async fn run(&self, sink: &dyn CommandSink) -> Result<WorkflowReport, WorkflowError> {
        info!(workflow = %self.run_description(), "starting workflow");

        let created = dispatch(
            sink,
            &CreateBlueprint {
                name: self.blueprint_name.clone(),
                parent_class: self.parent_class.clone(),
            },
        )
        .await;
        match created {
            Outcome::Response(reply) => {
                if !is_success(&reply) {
                    warn!(response = %reply, "create_blueprint did not succeed, continuing");
                }
            }
            failed => {
                return Err(WorkflowError {
                    step: CreateBlueprint::NAME,
                    response: failed.into_value(),
                })
            }
        }

        let print_node = self
            .step(
                sink,
                &AddFunctionCallNode {
                    blueprint_name: self.blueprint_name.clone(),
                    function_or_graph_name: self.graph.clone(),
                    target_class: "UKismetSystemLibrary".into(),
                    target_function: "PrintString".into(),
                    params: ParamMap::new(),
                    node_position: NodePosition::default(),
                },
            )
            .await?;
        let print_node_id = node_id(AddFunctionCallNode::NAME, print_node)?;

        self.set_pin(sink, &print_node_id, "InString", json!(self.message))
            .await?;
        self.set_pin(sink, &print_node_id, "bPrintToLog", json!("false"))
            .await?;

        let event_node = self
            .step(
                sink,
                &FindEventNodeByName {
                    blueprint_name: self.blueprint_name.clone(),
                    function_or_graph_name: self.graph.clone(),
                    event_name: "ReceiveBeginPlay".into(),
                },
            )
            .await?;
        let event_node_id = node_id(FindEventNodeByName::NAME, event_node)?;

        let event_pins = self.pins(sink, &event_node_id).await?;
        let print_pins = self.pins(sink, &print_node_id).await?;

        self.step(
            sink,
            &ConnectBlueprintNodes {
                blueprint_name: self.blueprint_name.clone(),
                source_node_id: event_node_id.clone(),
                source_pin_name: "then".into(),
                target_node_id: print_node_id.clone(),
                target_pin_name: "execute".into(),
                function_or_graph_name: Some(self.graph.clone()),
            },
        )
        .await?;

        self.step(
            sink,
            &CompileBlueprint {
                blueprint_name: self.blueprint_name.clone(),
            },
        )
        .await?;

        let nodes = self
            .step(
                sink,
                &GetAllNodes {
                    blueprint_name: self.blueprint_name.clone(),
                    function_or_graph_name: self.graph.clone(),
                },
            )
            .await?;

        info!(%print_node_id, %event_node_id, "workflow finished");
        Ok(WorkflowReport {
            print_node_id,
            event_node_id,
            event_pins,
            print_pins,
            nodes,
        })
    }

    async fn set_pin(
        &self,
        sink: &dyn CommandSink,
        node_id: &str,
        pin_name: &str,
        default_value: Value,
    ) -> Result<Value, WorkflowError> {
        self.step(
            sink,
            &SetNodePinDefaultValue {
                blueprint_name: self.blueprint_name.clone(),
                function_or_graph_name: self.graph.clone(),
                node_id: node_id.to_string(),
                pin_name: pin_name.to_string(),
                default_value,
            },
        )
        .await
    }

    async fn pins(&self, sink: &dyn CommandSink, node_id: &str) -> Result<Value, WorkflowError> {
        self.step(
            sink,
            &GetNodePins {
                blueprint_name: self.blueprint_name.clone(),
                function_or_graph_name: self.graph.clone(),
                node_id: node_id.to_string(),
            },
        )
        .await
    }

    async fn step<C: BlueprintCommand>(
        &self,
        sink: &dyn CommandSink,
        command: &C,
    ) -> Result<Value, WorkflowError> {
        info!(step = C::NAME, "{}", command.summary());
        match dispatch(sink, command).await {
            Outcome::Response(reply) if is_success(&reply) => Ok(reply),
            outcome => {
                let response = outcome.into_value();
                warn!(step = C::NAME, %response, "workflow step failed");
                Err(WorkflowError {
                    step: C::NAME,
                    response,
                })
            }
        }
    }
}

fn is_success(reply: &Value) -> bool {
    reply.get("status").and_then(Value::as_str) == Some("success")
}

/// `result.node_id` of a successful reply, as an opaque string.
fn node_id(step: &'static str, reply: Value) -> Result<String, WorkflowError> {
    match reply.pointer("/result/node_id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(WorkflowError {
            step,
            response: reply,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use unreal_engine_link::EngineError;

    fn scripted_engine() -> std::sync::Arc<RecordingSink> {
        RecordingSink::with_handler(|command, params| {
            Ok(match command {
                "add_function_call_node" => {
                    json!({"status": "success", "result": {"node_id": "PRINT-1"}})
                }
                "find_event_node_by_name" => {
                    json!({"status": "success", "result": {"node_id": "BEGIN-1"}})
                }
                "get_node_pins" => {
                    json!({"status": "success", "result": {"node_id": params["node_id"], "pins": []}})
                }
                "get_all_nodes" => json!({"status": "success", "result": {"nodes": ["BEGIN-1", "PRINT-1"]}}),
                _ => json!({"status": "success"}),
            })
        })
    }

    #[tokio::test]
    async fn test_full_run_threads_node_ids() {
        let sink = scripted_engine();
        let report = PrintStringWorkflow::default().run(sink.as_ref()).await.unwrap();

        assert_eq!(report.print_node_id, "PRINT-1");
        assert_eq!(report.event_node_id, "BEGIN-1");
        assert_eq!(report.print_pins["result"]["node_id"], "PRINT-1");

        let calls = sink.calls();
        let names: Vec<&str> = calls.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            [
                "create_blueprint",
                "add_function_call_node",
                "set_node_pin_default_value",
                "set_node_pin_default_value",
                "find_event_node_by_name",
                "get_node_pins",
                "get_node_pins",
                "connect_blueprint_nodes",
                "compile_blueprint",
                "get_all_nodes",
            ]
        );

        let connect = &calls[7].1;
        assert_eq!(connect["source_node_id"], "BEGIN-1");
        assert_eq!(connect["target_node_id"], "PRINT-1");
        assert_eq!(connect["source_pin_name"], "then");
        assert_eq!(connect["target_pin_name"], "execute");
        assert_eq!(connect["function_or_graph_name"], "EventGraph");

        assert_eq!(calls[2].1["default_value"], "Hello, Unreal MCP!");
        assert_eq!(calls[3].1["pin_name"], "bPrintToLog");
        assert_eq!(calls[3].1["default_value"], "false");
    }

    #[tokio::test]
    async fn test_first_failing_step_aborts() {
        let sink = RecordingSink::with_handler(|command, _| {
            Ok(match command {
                "add_function_call_node" => {
                    json!({"status": "success", "result": {"node_id": "PRINT-1"}})
                }
                "find_event_node_by_name" => json!({"status": "error", "error": "no such event"}),
                _ => json!({"status": "success"}),
            })
        });

        let err = PrintStringWorkflow::default().run(sink.as_ref()).await.unwrap_err();
        assert_eq!(err.step, "find_event_node_by_name");
        assert_eq!(err.response["error"], "no such event");
        assert_eq!(sink.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_existing_blueprint_is_tolerated() {
        let sink = RecordingSink::with_handler(|command, _| {
            Ok(match command {
                "create_blueprint" => json!({"success": false, "error": "Blueprint already exists"}),
                "add_function_call_node" | "find_event_node_by_name" => {
                    json!({"status": "success", "result": {"node_id": "N"}})
                }
                _ => json!({"status": "success"}),
            })
        });
        assert!(PrintStringWorkflow::default().run(sink.as_ref()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_engine_stops_at_create() {
        let sink = RecordingSink::unreachable();
        let err = PrintStringWorkflow::default().run(sink.as_ref()).await.unwrap_err();
        assert_eq!(err.step, "create_blueprint");
        assert_eq!(err.response["message"], "Failed to connect to Unreal Engine");
        assert_eq!(sink.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_node_id_fails_step() {
        let sink = RecordingSink::with_handler(|_, _| Ok(json!({"status": "success", "result": {}})));
        let err = PrintStringWorkflow::default().run(sink.as_ref()).await.unwrap_err();
        assert_eq!(err.step, "add_function_call_node");
    }

    #[tokio::test]
    async fn test_dropped_connection_mid_run() {
        let sink = RecordingSink::with_handler(|command, _| match command {
            "compile_blueprint" => Err(EngineError::Decode("connection closed".into())),
            "add_function_call_node" | "find_event_node_by_name" => {
                Ok(json!({"status": "success", "result": {"node_id": "N"}}))
            }
            _ => Ok(json!({"status": "success"})),
        });
        let err = PrintStringWorkflow::default().run(sink.as_ref()).await.unwrap_err();
        assert_eq!(err.step, "compile_blueprint");
        assert_eq!(err.response["message"], "No response from Unreal Engine");
    }
}
