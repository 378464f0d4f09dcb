use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::{
    dto::Envelope,
    errors::ClientError,
    gateway::{Gateway, resource_path},
};

const USER_PATH: &str = "user";
const LOGIN_PATH: &str = "login";

#[derive(Clone)]
pub struct UsersService {
    gateway: Arc<dyn Gateway>,
}

impl UsersService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// POST /user
    /// Body: { "username": "...", "password": "..." }
    pub async fn signup(&self, username: &str, password: &str) -> Result<Envelope, ClientError> {
        info!("Signing up {}", username);
        self.gateway
            .post(USER_PATH, &json!({"username": username, "password": password}))
            .await
    }

    /// POST /login, answered as raw text.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        self.gateway
            .post_text(LOGIN_PATH, &json!({"username": username, "password": password}))
            .await
    }

    /// DELETE /user/:username
    pub async fn delete(&self, username: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(USER_PATH, username)?;
        self.gateway.delete(&path, None).await
    }
}
