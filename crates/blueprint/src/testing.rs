use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};
use unreal_engine_link::{CommandSink, EngineError};

type Handler = Box<dyn Fn(&str, &Map<String, Value>) -> Result<Value, EngineError> + Send + Sync>;

/// Records every command and answers through a handler.
pub(crate) struct RecordingSink {
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
    handler: Handler,
}

impl RecordingSink {
    pub(crate) fn with_handler(
        handler: impl Fn(&str, &Map<String, Value>) -> Result<Value, EngineError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        })
    }

    pub(crate) fn replying(reply: Value) -> Arc<Self> {
        Self::with_handler(move |_, _| Ok(reply.clone()))
    }

    pub(crate) fn unreachable() -> Arc<Self> {
        Self::with_handler(|_, _| {
            Err(EngineError::Connect {
                address: "127.0.0.1:55557".into(),
                reason: "connection refused".into(),
            })
        })
    }

    pub(crate) fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// The params of the only recorded call.
    pub(crate) fn single_params(&self) -> Value {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one command, got {calls:?}");
        Value::Object(calls[0].1.clone())
    }
}

#[async_trait]
impl CommandSink for RecordingSink {
    async fn send_command(
        &self,
        command: &str,
        params: Map<String, Value>,
    ) -> Result<Value, EngineError> {
        let reply = (self.handler)(command, &params);
        self.calls.lock().unwrap().push((command.to_string(), params));
        reply
    }
}
