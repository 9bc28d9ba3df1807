//! JSON-RPC 2.0 envelopes.
//!
//! Requests always use the `call` method with `[namespace, method, params]`
//! as parameters:
//!
//! ```json
//! {"id":1,"jsonrpc":"2.0","method":"call",
//!  "params":["database_api","get_dynamic_global_properties",[]]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope<'a> {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: (&'a str, &'a str, Vec<Value>),
}

impl<'a> RequestEnvelope<'a> {
    pub fn call(id: u64, namespace: &'a str, method: &'a str, params: Vec<Value>) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION,
            method: "call",
            params: (namespace, method, params),
        }
    }
}

/// Error object inside a failed response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Incoming response envelope. Either `result` or `error` is set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

impl ResponseEnvelope {
    /// Whether the echoed id is `expected`. Some nodes echo ids as strings.
    pub fn id_matches(&self, expected: u64) -> bool {
        match &self.id {
            Some(Value::Number(n)) => n.as_u64() == Some(expected),
            Some(Value::String(s)) => s.parse::<u64>().ok() == Some(expected),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_layout() {
        let env = RequestEnvelope::call(
            7,
            "database_api",
            "get_accounts",
            vec![json!(["alice"])],
        );
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({
                "id": 7,
                "jsonrpc": "2.0",
                "method": "call",
                "params": ["database_api", "get_accounts", [["alice"]]]
            })
        );
    }

    #[test]
    fn test_error_envelope() {
        let env: ResponseEnvelope = serde_json::from_str(
            r#"{"id":3,"error":{"code":-32000,"message":"boom","data":{"stack":[]}}}"#,
        )
        .unwrap();
        let err = env.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "boom");
        assert_eq!(err.data, Some(json!({"stack": []})));
        assert!(env.result.is_none());
    }

    #[test]
    fn test_id_matching() {
        let numeric: ResponseEnvelope = serde_json::from_str(r#"{"id":5,"result":1}"#).unwrap();
        assert!(numeric.id_matches(5));
        assert!(!numeric.id_matches(6));

        let text: ResponseEnvelope = serde_json::from_str(r#"{"id":"5","result":1}"#).unwrap();
        assert!(text.id_matches(5));

        let missing: ResponseEnvelope = serde_json::from_str(r#"{"result":1}"#).unwrap();
        assert!(!missing.id_matches(5));
    }
}
