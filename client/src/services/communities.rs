use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::{
    dto::Envelope,
    errors::ClientError,
    gateway::{Gateway, resource_path},
};

const COMMUNITY_PATH: &str = "community";

#[derive(Clone)]
pub struct CommunitiesService {
    gateway: Arc<dyn Gateway>,
}

impl CommunitiesService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// POST /community
    /// Body: { "name": "...", "description": "..." }
    pub async fn create(&self, name: &str, description: &str) -> Result<Envelope, ClientError> {
        info!("Creating community {}", name);
        let payload = if description.is_empty() {
            json!({"name": name})
        } else {
            json!({"name": name, "description": description})
        };
        self.gateway.post(COMMUNITY_PATH, &payload).await
    }

    /// DELETE /community/:name
    /// Body: { "username": "...", "name": "..." }
    pub async fn delete(&self, username: &str, name: &str) -> Result<Envelope, ClientError> {
        info!("Deleting community {} as {}", name, username);
        let path = resource_path(COMMUNITY_PATH, name)?;
        self.gateway
            .delete(&path, Some(&json!({"username": username, "name": name})))
            .await
    }

    /// GET /community?key=value
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Envelope, ClientError> {
        self.gateway.get(COMMUNITY_PATH, query).await
    }

    /// GET /community/:name
    pub async fn get(&self, name: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(COMMUNITY_PATH, name)?;
        self.gateway.get(&path, &[]).await
    }
}
