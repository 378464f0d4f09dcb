use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::{
    dto::Envelope,
    errors::ClientError,
    gateway::{Gateway, resource_path},
};

const POST_PATH: &str = "post";
const POSTS_PATH: &str = "posts";

#[derive(Clone)]
pub struct PostsService {
    gateway: Arc<dyn Gateway>,
}

impl PostsService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// POST /post
    /// Body: { "username": "...", "community": "...", "title": "...", "body": "..." }
    pub async fn create(
        &self,
        username: &str,
        community: &str,
        title: &str,
        body: &str,
    ) -> Result<Envelope, ClientError> {
        info!("New post in {} by {}: {}", community, username, title);
        self.gateway
            .post(
                POST_PATH,
                &json!({
                    "username": username,
                    "community": community,
                    "title": title,
                    "body": body,
                }),
            )
            .await
    }

    /// GET /post/:id
    pub async fn get(&self, id: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(POST_PATH, id)?;
        self.gateway.get(&path, &[]).await
    }

    /// GET /posts
    pub async fn list(&self) -> Result<Envelope, ClientError> {
        self.gateway.get(POSTS_PATH, &[]).await
    }

    /// PATCH /post/:id
    /// Body: { "title": "...", "body": "..." }
    pub async fn update(&self, id: &str, title: &str, body: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(POST_PATH, id)?;
        self.gateway
            .patch(&path, &json!({"title": title, "body": body}))
            .await
    }

    /// DELETE /post/:id
    pub async fn delete(&self, id: &str) -> Result<Envelope, ClientError> {
        info!("Deleting post {}", id);
        let path = resource_path(POST_PATH, id)?;
        self.gateway.delete(&path, None).await
    }
}
