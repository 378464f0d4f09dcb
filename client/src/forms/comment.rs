use crate::{
    dto::CreateCommentRequest,
    errors::SubmitError,
    feedback::Feedback,
    routes::Route,
    session::Session,
    states::ClientState,
};

use super::status::{FormPhase, FormStatus, conclude, submit_with};

/// Reply box under a post.
#[derive(Debug, Default)]
pub struct NewCommentForm {
    fields: CreateCommentRequest,
    status: FormStatus,
}

impl NewCommentForm {
    /// Bound to `post_id`, with the logged-in username filled in.
    pub fn new(post_id: impl Into<String>, session: &Session) -> Self {
        Self {
            fields: CreateCommentRequest {
                post_id: post_id.into(),
                username: session.current_user().unwrap_or_default(),
                text: String::new(),
            },
            status: FormStatus::default(),
        }
    }

    pub fn fields(&self) -> &CreateCommentRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut CreateCommentRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// POST /comment, then back to the post it belongs to.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state
                .comments
                .create(&fields.post_id, &fields.username, &fields.text)
                .await;
            conclude(
                "Comment creation",
                result,
                "Failed to add comment.",
                |envelope| {
                    envelope.is_created().then(|| {
                        Feedback::success("Comment added.")
                            .then(Route::Post(fields.post_id.clone()))
                    })
                },
            )
        })
        .await
    }
}

/// DELETE /comment/:id, staying on the post.
pub async fn delete_comment(state: &ClientState, post_id: &str, comment_id: &str) -> Feedback {
    let result = state.comments.delete(comment_id).await;
    conclude(
        "Comment deletion",
        result,
        "Error deleting comment.",
        |envelope| {
            matches!(envelope.status, 200 | 204).then(|| {
                Feedback::success("Comment deleted.").then(Route::Post(post_id.to_owned()))
            })
        },
    )
}
