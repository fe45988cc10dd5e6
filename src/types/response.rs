use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by `POST /analyze`, for both success and error statuses.
/// Fields stay untyped so non-string values still render.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl AnalyzeResponse {
    /// Any JSON value except `null` is accepted; non-object bodies carry no fields.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Null => Err(serde::de::Error::custom("response body is null")),
            Value::Object(mut fields) => Ok(Self {
                response: fields.remove("response"),
                error: fields.remove("error"),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// Text to show on success: strings verbatim, `null` or absent as empty,
    /// anything else as its JSON text
    pub fn response_text(&self) -> String {
        match &self.response {
            None | Some(Value::Null) => String::new(),
            Some(value) => value_text(value),
        }
    }

    /// Server error message, if it carries one worth showing
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            value => Some(value_text(value)),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Body returned by `GET /ping`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
