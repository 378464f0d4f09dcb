use tracing::info;

use crate::{
    dto::{CreateCommunityRequest, DeleteCommunityRequest},
    errors::SubmitError,
    feedback::Feedback,
    routes::Route,
    session::Session,
    states::ClientState,
};

use super::status::{FormPhase, FormStatus, conclude, submit_with};

#[derive(Debug, Default)]
pub struct NewCommunityForm {
    fields: CreateCommunityRequest,
    status: FormStatus,
}

impl NewCommunityForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &CreateCommunityRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut CreateCommunityRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// POST /community, then on to the new community's page.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state
                .communities
                .create(&fields.name, &fields.description)
                .await;
            conclude(
                "Community creation",
                result,
                "Error creating community.",
                |envelope| {
                    envelope.is_created().then(|| {
                        Feedback::success("New community created.")
                            .then(Route::Community(fields.name.clone()))
                    })
                },
            )
        })
        .await
    }
}

/// Deletion is fire-and-forget: any reply the backend gets to send counts as
/// "requested", only a failed request is reported as an error.
#[derive(Debug, Default)]
pub struct DeleteCommunityForm {
    fields: DeleteCommunityRequest,
    status: FormStatus,
}

impl DeleteCommunityForm {
    /// Starts with the logged-in username filled in.
    pub fn new(session: &Session) -> Self {
        Self {
            fields: DeleteCommunityRequest {
                username: session.current_user().unwrap_or_default(),
                name: String::new(),
            },
            status: FormStatus::default(),
        }
    }

    pub fn fields(&self) -> &DeleteCommunityRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut DeleteCommunityRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// DELETE /community/:name
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state.communities.delete(&fields.username, &fields.name).await;
            conclude(
                "Community deletion",
                result,
                "Error deleting community.",
                |envelope| {
                    info!(
                        "Community deletion answered: status {} message {:?}",
                        envelope.status, envelope.message
                    );
                    Some(Feedback::info(format!(
                        "Deletion of {} requested.",
                        fields.name
                    )))
                },
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingGateway, ScriptedReply, created, server_error};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(gateway: &Arc<RecordingGateway>, session: Session) -> ClientState {
        ClientState::new(gateway.clone(), session)
    }

    #[tokio::test]
    async fn created_community_opens_its_page() {
        let gateway = Arc::new(RecordingGateway::replying(created(json!({}))));
        let state = state_with(&gateway, Session::new());
        let mut form = NewCommunityForm::new();
        form.fields_mut().name = "Science".to_owned();

        let feedback = form.submit(&state).await.expect("valid form");

        assert_eq!(feedback.notification.message, "New community created.");
        assert_eq!(
            feedback.redirect.map(|route| route.path()),
            Some("/r/Science".to_owned())
        );
    }

    #[tokio::test]
    async fn unnamed_community_is_not_sent() {
        let gateway = Arc::new(RecordingGateway::new());
        let state = state_with(&gateway, Session::new());

        let result = NewCommunityForm::new().submit(&state).await;

        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_creation_stays_put() {
        let gateway = Arc::new(RecordingGateway::replying(server_error()));
        let state = state_with(&gateway, Session::new());
        let mut form = NewCommunityForm::new();
        form.fields_mut().name = "Science".to_owned();

        let feedback = form.submit(&state).await.expect("valid form");

        assert!(feedback.notification.is_failure());
        assert_eq!(feedback.redirect, None);
    }

    #[tokio::test]
    async fn delete_form_is_prefilled_from_the_session() {
        let session = Session::new();
        session.login("alice", None);

        let form = DeleteCommunityForm::new(&session);

        assert_eq!(form.fields().username, "alice");
        assert!(form.fields().name.is_empty());
    }

    #[tokio::test]
    async fn any_reply_to_a_deletion_counts_as_requested() {
        let gateway = Arc::new(RecordingGateway::replying(server_error()));
        let session = Session::new();
        session.login("alice", None);
        let state = state_with(&gateway, session.clone());
        let mut form = DeleteCommunityForm::new(&session);
        form.fields_mut().name = "Science".to_owned();

        let feedback = form.submit(&state).await.expect("valid form");

        assert!(!feedback.notification.is_failure());
        assert_eq!(feedback.redirect, None);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_deletion_request_is_reported() {
        let gateway = Arc::new(RecordingGateway::replying(ScriptedReply::Fail(
            StatusCode::FORBIDDEN,
        )));
        let session = Session::new();
        session.login("alice", None);
        let state = state_with(&gateway, session.clone());
        let mut form = DeleteCommunityForm::new(&session);
        form.fields_mut().name = "Science".to_owned();

        let feedback = form.submit(&state).await.expect("valid form");

        assert!(feedback.notification.is_failure());
        assert_eq!(feedback.notification.message, "Error deleting community.");
    }
}
