use serde::Deserialize;
use serde_json::Value;

/// Error body produced by the backend for non-success responses.
///
/// `detail` is a plain string for auth failures and a list of objects for
/// request validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    pub detail: Value,
}

impl BackendErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => item.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
