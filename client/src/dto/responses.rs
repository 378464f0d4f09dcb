use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ClientError;

/// Message the backend puts in a successful envelope.
pub const SUCCESS_MESSAGE: &str = "success";

/// Response wrapper every backend endpoint answers with.
///
/// Callers branch on `status` and `message` carried in the body rather than
/// on the HTTP status line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// `201` with the `"success"` message: the creation endpoints' success signal.
    pub fn is_created(&self) -> bool {
        self.status == 201 && self.message == SUCCESS_MESSAGE
    }

    /// `200`: the read endpoints' success signal.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Follow a JSON pointer (`/post_id`, `/user/username`) into `data`.
    pub fn field(&self, pointer: &str) -> Option<&Value> {
        self.data.pointer(pointer)
    }

    pub fn str_field(&self, pointer: &str) -> Option<&str> {
        self.field(pointer).and_then(Value::as_str)
    }

    /// Decode the value under `pointer` into `T`.
    pub fn decode_field<T: DeserializeOwned>(&self, pointer: &str) -> Result<T, ClientError> {
        let value = self
            .field(pointer)
            .ok_or_else(|| ClientError::decode(format!("missing `{pointer}` in response data")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| ClientError::decode(format!("`{pointer}`: {e}")))
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
