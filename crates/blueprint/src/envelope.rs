//! Uniform success/failure envelopes at the tool boundary.
//!
//! Connection failures and missing replies are reported as
//! `{"success": false, "message": ...}`. Anything the editor actually
//! answered, including its own error reports, is passed through untouched.

use serde_json::{json, Value};
use tracing::error;
use unreal_engine_link::EngineError;

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to Unreal Engine";
pub const NO_RESPONSE_MESSAGE: &str = "No response from Unreal Engine";

/// `{"success": false, "message": <message>}`
pub fn failure(message: impl Into<String>) -> Value {
    json!({
        "success": false,
        "message": message.into(),
    })
}

/// Whether a reply carries nothing at all.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as no reply.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Whether the editor reported success, via `status` or `success`.
pub fn reports_success(value: &Value) -> bool {
    value.get("status").and_then(Value::as_str) == Some("success")
        || value.get("success").and_then(Value::as_bool) == Some(true)
}

/// What a tool hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The editor's reply, verbatim.
    Response(Value),
    /// No listener was reachable.
    ConnectFailed(Value),
    /// The command was sent (or attempted) but no usable reply came back.
    NoResponse(Value),
}

impl Outcome {
    pub fn value(&self) -> &Value {
        match self {
            Outcome::Response(v) | Outcome::ConnectFailed(v) | Outcome::NoResponse(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Outcome::Response(v) | Outcome::ConnectFailed(v) | Outcome::NoResponse(v) => v,
        }
    }

    /// True for envelopes produced at the tool boundary.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Outcome::Response(_))
    }
}

/// Map a send result onto the tool-level taxonomy.
pub fn normalize(result: Result<Value, EngineError>) -> Outcome {
    match result {
        Err(e) if e.is_connect_failure() => {
            error!(error = %e, "{CONNECT_FAILED_MESSAGE}");
            Outcome::ConnectFailed(failure(CONNECT_FAILED_MESSAGE))
        }
        Err(e) => {
            error!(error = %e, "{NO_RESPONSE_MESSAGE}");
            Outcome::NoResponse(failure(NO_RESPONSE_MESSAGE))
        }
        Ok(value) if is_absent(&value) => {
            error!("{NO_RESPONSE_MESSAGE}");
            Outcome::NoResponse(failure(NO_RESPONSE_MESSAGE))
        }
        Ok(value) => Outcome::Response(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_connect_failure_envelope() {
        let outcome = normalize(Err(EngineError::Connect {
            address: "127.0.0.1:55557".into(),
            reason: "refused".into(),
        }));
        assert!(outcome.is_failure());
        assert_eq!(
            outcome.into_value(),
            json!({"success": false, "message": "Failed to connect to Unreal Engine"})
        );
    }

    #[test]
    fn test_transport_errors_become_no_response() {
        for err in [
            EngineError::Decode("connection closed before any response data".into()),
            EngineError::ReadTimeout(Duration::from_secs(1)),
            EngineError::ResponseTooLarge { limit: 10 },
        ] {
            let outcome = normalize(Err(err));
            assert!(matches!(outcome, Outcome::NoResponse(_)));
            assert_eq!(outcome.value()["message"], NO_RESPONSE_MESSAGE);
        }
    }

    #[test]
    fn test_empty_reply_counts_as_no_response() {
        for reply in [json!(null), json!({}), json!([]), json!(""), json!(false), json!(0)] {
            assert!(normalize(Ok(reply)).is_failure());
        }
    }

    #[test]
    fn test_engine_errors_pass_through_verbatim() {
        let reply = json!({"success": false, "error": "Blueprint not found: BP_Missing"});
        let outcome = normalize(Ok(reply.clone()));
        assert!(!outcome.is_failure());
        assert_eq!(outcome.into_value(), reply);
    }

    #[test]
    fn test_reports_success() {
        assert!(reports_success(&json!({"status": "success", "result": {}})));
        assert!(reports_success(&json!({"success": true})));
        assert!(!reports_success(&json!({"status": "error", "error": "nope"})));
        assert!(!reports_success(&json!({"success": false})));
    }
}
