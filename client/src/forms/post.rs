use crate::{
    dto::{CreatePostRequest, UpdatePostRequest},
    errors::SubmitError,
    feedback::Feedback,
    models::{Community, Post},
    routes::Route,
    session::Session,
    states::ClientState,
};

use super::status::{FormPhase, FormStatus, conclude, submit_with};

/// New post form. The community picker is filled from the live listing.
#[derive(Debug, Default)]
pub struct NewPostForm {
    fields: CreatePostRequest,
    communities: Vec<Community>,
    status: FormStatus,
}

impl NewPostForm {
    /// Starts with the logged-in username filled in.
    pub fn new(session: &Session) -> Self {
        Self {
            fields: CreatePostRequest {
                username: session.current_user().unwrap_or_default(),
                ..CreatePostRequest::default()
            },
            communities: Vec::new(),
            status: FormStatus::default(),
        }
    }

    pub fn fields(&self) -> &CreatePostRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut CreatePostRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    pub fn set_communities(&mut self, communities: Vec<Community>) {
        self.communities = communities;
    }

    /// Pick the community at `index` in the loaded listing.
    pub fn choose_community(&mut self, index: usize) -> Option<&Community> {
        let community = self.communities.get(index)?;
        self.fields.community.clone_from(&community.name);
        self.status.dismiss();
        Some(community)
    }

    /// POST /post, then on to the new post's page.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state
                .posts
                .create(
                    &fields.username,
                    &fields.community,
                    &fields.title,
                    &fields.body,
                )
                .await;
            conclude(
                "Post creation",
                result,
                "Failed to create new post",
                |envelope| {
                    let post_id = envelope.str_field("/post_id")?;
                    envelope.is_created().then(|| {
                        Feedback::success("New post created.")
                            .then(Route::Post(post_id.to_owned()))
                    })
                },
            )
        })
        .await
    }
}

#[derive(Debug, Default)]
pub struct EditPostForm {
    fields: UpdatePostRequest,
    status: FormStatus,
}

impl EditPostForm {
    /// Starts from the post as it currently reads.
    pub fn new(id: impl Into<String>, post: &Post) -> Self {
        Self {
            fields: UpdatePostRequest {
                id: id.into(),
                title: post.title.clone(),
                body: post.body.clone(),
            },
            status: FormStatus::default(),
        }
    }

    pub fn fields(&self) -> &UpdatePostRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut UpdatePostRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// PATCH /post/:id, then back to the post.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state
                .posts
                .update(&fields.id, &fields.title, &fields.body)
                .await;
            conclude("Post update", result, "Error updating post.", |envelope| {
                envelope.is_ok().then(|| {
                    Feedback::success("Post updated.").then(Route::Post(fields.id.clone()))
                })
            })
        })
        .await
    }
}

/// DELETE /post/:id, then home.
pub async fn delete_post(state: &ClientState, id: &str) -> Feedback {
    let result = state.posts.delete(id).await;
    conclude("Post deletion", result, "Error deleting post.", |envelope| {
        matches!(envelope.status, 200 | 204)
            .then(|| Feedback::success("Post deleted.").then(Route::Home))
    })
}
