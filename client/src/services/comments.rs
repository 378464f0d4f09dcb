use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::{
    dto::Envelope,
    errors::ClientError,
    gateway::{Gateway, resource_path},
};

const COMMENT_PATH: &str = "comment";
const POST_COMMENTS_PATH: &str = "comments/post";

#[derive(Clone)]
pub struct CommentsService {
    gateway: Arc<dyn Gateway>,
}

impl CommentsService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// GET /comments/post/:postid
    pub async fn list_for_post(&self, post_id: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(POST_COMMENTS_PATH, post_id)?;
        self.gateway.get(&path, &[]).await
    }

    /// POST /comment
    /// Body: { "post_id": "...", "username": "...", "text": "..." }
    pub async fn create(
        &self,
        post_id: &str,
        username: &str,
        text: &str,
    ) -> Result<Envelope, ClientError> {
        info!("New comment on {} by {}", post_id, username);
        self.gateway
            .post(
                COMMENT_PATH,
                &json!({"post_id": post_id, "username": username, "text": text}),
            )
            .await
    }

    /// DELETE /comment/:id
    pub async fn delete(&self, id: &str) -> Result<Envelope, ClientError> {
        info!("Deleting comment {}", id);
        let path = resource_path(COMMENT_PATH, id)?;
        self.gateway.delete(&path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingGateway, created, ok};
    use reqwest::Method;

    #[tokio::test]
    async fn lists_under_the_post() {
        let gateway = Arc::new(RecordingGateway::replying(ok(json!({"comments": []}))));
        let comments = CommentsService::new(gateway.clone());

        comments.list_for_post("p1").await.expect("reply");

        let call = gateway.last_call().expect("one call");
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path, "comments/post/p1");
    }

    #[tokio::test]
    async fn create_posts_all_three_fields() {
        let gateway = Arc::new(RecordingGateway::replying(created(json!({}))));
        let comments = CommentsService::new(gateway.clone());

        comments.create("p1", "bob", "Nice").await.expect("reply");

        let call = gateway.last_call().expect("one call");
        assert_eq!(call.path, "comment");
        assert_eq!(
            call.payload,
            Some(json!({"post_id": "p1", "username": "bob", "text": "Nice"}))
        );
    }

    #[tokio::test]
    async fn delete_escapes_the_id() {
        let gateway = Arc::new(RecordingGateway::replying(ok(json!({}))));
        let comments = CommentsService::new(gateway.clone());

        comments.delete("c1/../x").await.expect("reply");

        let call = gateway.last_call().expect("one call");
        assert_eq!(call.method, Method::DELETE);
        assert_eq!(call.path, "comment/c1%2F..%2Fx");
    }
}
