use serde::{Deserialize, Serialize};

/// `detail` is a plain message for handled errors and a list of field
/// violations when request validation fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Violations(Vec<FieldViolation>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Message(message) => Some(message.clone()),
            ErrorDetail::Violations(violations) if violations.is_empty() => None,
            ErrorDetail::Violations(violations) => Some(
                violations
                    .iter()
                    .map(|v| v.msg.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ErrorDetail::Other(serde_json::Value::Null) => None,
            ErrorDetail::Other(value) => Some(value.to_string()),
        }
    }
}
