//! Read-only pages. Each issues one GET and either yields its content or the
//! failure feedback to show instead.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{
    dto::Envelope,
    errors::ClientError,
    feedback::Feedback,
    models::{Comment, Community, Post, Profile},
    states::ClientState,
};

/// Home feed: every post, newest first when the backend dates them.
pub async fn home_feed(state: &ClientState) -> Result<Vec<Post>, Feedback> {
    let mut posts: Vec<Post> = read(
        "Home feed",
        state.posts.list().await,
        "/posts",
        "Failed to load posts.",
    )?;
    posts.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
    Ok(posts)
}

/// Community listing, as fed to the subreddits page and the post form.
pub async fn communities(state: &ClientState) -> Result<Vec<Community>, Feedback> {
    read(
        "Community listing",
        state.communities.list(&[]).await,
        "/communities",
        "Failed to load communities.",
    )
}

pub async fn community(state: &ClientState, name: &str) -> Result<Community, Feedback> {
    read(
        "Community page",
        state.communities.get(name).await,
        "/community",
        "Community not found.",
    )
}

/// A post together with its comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// The post, then its comments oldest first. A thread that fails to load
/// leaves the post readable with no comments listed.
pub async fn post(state: &ClientState, id: &str) -> Result<PostPage, Feedback> {
    let post = post_content(state, id).await?;
    let comments = comments(state, id).await.unwrap_or_default();
    Ok(PostPage { post, comments })
}

/// Just the post, as the edit form starts from it.
pub async fn post_content(state: &ClientState, id: &str) -> Result<Post, Feedback> {
    read(
        "Post page",
        state.posts.get(id).await,
        "/post",
        "Post not found.",
    )
}

pub async fn comments(state: &ClientState, post_id: &str) -> Result<Vec<Comment>, Feedback> {
    let mut comments: Vec<Comment> = read(
        "Comment thread",
        state.comments.list_for_post(post_id).await,
        "/comments",
        "Failed to load comments.",
    )?;
    comments.sort_by(|a, b| a.creation_date.cmp(&b.creation_date));
    Ok(comments)
}

/// Profile of the logged-in user. Nothing is requested without a session.
pub async fn profile(state: &ClientState) -> Result<Profile, Feedback> {
    let Some(username) = state.session.current_user() else {
        warn!("Profile requested without a session");
        return Err(Feedback::failure("Log in to view your profile."));
    };

    let envelope = accept("Profile", state.profiles.get(&username).await, "Failed to load profile.")?;
    let field = |pointer: &str| envelope.str_field(pointer).unwrap_or_default().to_owned();
    let profile = Profile {
        username: field("/user/username"),
        firstname: field("/post/firstname"),
        lastname: field("/post/lastname"),
        email: field("/post/email"),
    };

    if profile.username.is_empty() {
        warn!("Profile reply carried no username");
        return Err(Feedback::failure("Failed to load profile."));
    }
    Ok(profile)
}

fn accept(
    page: &str,
    result: Result<Envelope, ClientError>,
    failure: &str,
) -> Result<Envelope, Feedback> {
    match result {
        Ok(envelope) if envelope.is_ok() => Ok(envelope),
        Ok(envelope) => {
            warn!(
                "{} rejected: status {} message {:?}",
                page, envelope.status, envelope.message
            );
            Err(Feedback::failure(failure))
        }
        Err(e) => {
            warn!("{} failed: {}", page, e);
            Err(Feedback::failure(failure))
        }
    }
}

fn read<T: DeserializeOwned>(
    page: &str,
    result: Result<Envelope, ClientError>,
    pointer: &str,
    failure: &str,
) -> Result<T, Feedback> {
    accept(page, result, failure)?
        .decode_field(pointer)
        .map_err(|e| {
            warn!("{} undecodable: {}", page, e);
            Feedback::failure(failure)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::test_support::{RecordingGateway, ok, sample_communities, server_error};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn state(gateway: &Arc<RecordingGateway>, session: Session) -> ClientState {
        ClientState::new(gateway.clone(), session)
    }

    #[rstest]
    #[tokio::test]
    async fn listing_decodes_communities() {
        let gateway = Arc::new(RecordingGateway::replying(ok(
            json!({"communities": sample_communities()}),
        )));

        let communities = communities(&state(&gateway, Session::new()))
            .await
            .expect("listing loads");

        assert_eq!(communities.len(), 4);
        assert_eq!(communities[0].name, "Science");
        assert_eq!(gateway.last_call().map(|c| c.path), Some("community".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_failure_becomes_feedback() {
        let gateway = Arc::new(RecordingGateway::replying(server_error()));

        let feedback = communities(&state(&gateway, Session::new()))
            .await
            .expect_err("listing fails");

        assert!(feedback.notification.is_failure());
    }

    #[rstest]
    #[tokio::test]
    async fn profile_without_session_stays_offline() {
        let gateway = Arc::new(RecordingGateway::new());

        let feedback = profile(&state(&gateway, Session::new()))
            .await
            .expect_err("no session");

        assert!(feedback.notification.is_failure());
        assert_eq!(gateway.call_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn profile_reads_user_and_post_sections() {
        let gateway = Arc::new(RecordingGateway::replying(ok(json!({
            "user": {"username": "alice"},
            "post": {"firstname": "Alice", "lastname": "Liddell", "email": "alice@example.com"}
        }))));
        let session = Session::new();
        session.login("alice", None);

        let profile = profile(&state(&gateway, session)).await.expect("profile loads");

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.full_name(), "Alice Liddell");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(gateway.last_call().map(|c| c.path), Some("profile/alice".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn post_page_lists_comments_oldest_first() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push(ok(json!({"post": {"Post_id": "p1", "Title": "Hello"}})));
        gateway.push(ok(json!({"comments": [
            {"Id": "c2", "Text": "second", "Creation_date": "2022-06-01T00:00:00Z"},
            {"Id": "c1", "Text": "first", "Creation_date": "2022-01-01T00:00:00Z"}
        ]})));

        let page = post(&state(&gateway, Session::new()), "p1")
            .await
            .expect("post loads");

        assert_eq!(page.post.title, "Hello");
        let texts: Vec<&str> = page.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        let paths: Vec<String> = gateway.calls().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, ["post/p1", "comments/post/p1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn post_stays_readable_when_comments_fail() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push(ok(json!({"post": {"Post_id": "p1", "Title": "Hello"}})));
        gateway.push(server_error());

        let page = post(&state(&gateway, Session::new()), "p1")
            .await
            .expect("post loads");

        assert_eq!(page.post.title, "Hello");
        assert!(page.comments.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_post_skips_the_thread() {
        let gateway = Arc::new(RecordingGateway::replying(server_error()));

        let feedback = post(&state(&gateway, Session::new()), "p1")
            .await
            .expect_err("post fails");

        assert_eq!(feedback.notification.message, "Post not found.");
        assert_eq!(gateway.call_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn feed_is_sorted_newest_first() {
        let gateway = Arc::new(RecordingGateway::replying(ok(json!({"posts": [
            {"Title": "old", "Creation_date": "2022-01-01T00:00:00Z"},
            {"Title": "new", "Creation_date": "2022-06-01T00:00:00Z"}
        ]}))));

        let posts = home_feed(&state(&gateway, Session::new()))
            .await
            .expect("feed loads");

        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "old"]);
    }
}
