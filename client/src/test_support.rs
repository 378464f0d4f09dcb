//! In-memory gateway for exercising services, forms and pages without a
//! backend.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use crate::{dto::Envelope, errors::ClientError, gateway::Gateway};

/// One call observed by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<Value>,
}

/// What the next call answers with.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// A JSON envelope (decoded for JSON calls, serialised for text calls).
    Json(Value),
    /// A raw body, only meaningful for text calls.
    Text(String),
    /// A non-2xx HTTP status.
    Fail(StatusCode),
}

/// Gateway that records every call and answers from a script.
///
/// Each reply yields to the scheduler once before resolving, so two
/// submissions driven together genuinely overlap.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: ScriptedReply) -> Self {
        let gateway = Self::new();
        gateway.push(reply);
        gateway
    }

    pub fn push(&self, reply: ScriptedReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }

    async fn answer(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<&Value>,
    ) -> Result<ScriptedReply, ClientError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method,
                path: path.to_owned(),
                query: query
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
                payload: payload.cloned(),
            });
        tokio::task::yield_now().await;

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match reply {
            Some(ScriptedReply::Fail(status)) => Err(ClientError::Status {
                status,
                message: String::new(),
            }),
            Some(reply) => Ok(reply),
            None => Err(ClientError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "no scripted reply".to_owned(),
            }),
        }
    }

    async fn answer_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<&Value>,
    ) -> Result<Envelope, ClientError> {
        match self.answer(method, path, query, payload).await? {
            ScriptedReply::Json(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::decode(format!("scripted envelope: {e}"))),
            ScriptedReply::Text(text) => serde_json::from_str(&text)
                .map_err(|e| ClientError::decode(format!("response is not an envelope: {e}"))),
            ScriptedReply::Fail(status) => Err(ClientError::Status {
                status,
                message: String::new(),
            }),
        }
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope, ClientError> {
        self.answer_json(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError> {
        self.answer_json(Method::POST, path, &[], Some(payload)).await
    }

    async fn patch(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError> {
        self.answer_json(Method::PATCH, path, &[], Some(payload)).await
    }

    async fn delete(&self, path: &str, payload: Option<&Value>) -> Result<Envelope, ClientError> {
        self.answer_json(Method::DELETE, path, &[], payload).await
    }

    async fn post_text(&self, path: &str, payload: &Value) -> Result<String, ClientError> {
        match self.answer(Method::POST, path, &[], Some(payload)).await? {
            ScriptedReply::Json(value) => Ok(value.to_string()),
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Fail(status) => Err(ClientError::Status {
                status,
                message: String::new(),
            }),
        }
    }
}

/// `{status: 201, message: "success", data}`
pub fn created(data: Value) -> ScriptedReply {
    ScriptedReply::Json(json!({"status": 201, "message": "success", "data": data}))
}

/// `{status: 200, message: "success", data}`
pub fn ok(data: Value) -> ScriptedReply {
    ScriptedReply::Json(json!({"status": 200, "message": "success", "data": data}))
}

/// `{status: 500}`
pub fn server_error() -> ScriptedReply {
    ScriptedReply::Json(json!({"status": 500}))
}

/// The sample communities the listing page used to hard-code.
pub fn sample_communities() -> Value {
    json!([
        {"name": "Science", "description": "This community is a place to share and discuss new scientific research. Read about the latest advances in astronomy, biology, medicine, physics, social science, and more. Find and submit new publications and popular science coverage of current research."},
        {"name": "Subreddit 2", "description": "empty description"},
        {"name": "Subreddit 3", "description": "empty description"},
        {"name": "Subreddit 4", "description": "empty description"}
    ])
}
