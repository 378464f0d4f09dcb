use crate::{
    dto::SignupRequest, errors::SubmitError, feedback::Feedback, routes::Route,
    states::ClientState,
};

use super::status::{FormPhase, FormStatus, conclude, submit_with};

#[derive(Debug, Default)]
pub struct SignupForm {
    fields: SignupRequest,
    status: FormStatus,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &SignupRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut SignupRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// POST /user, then on to the login page.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let result = state.users.signup(&fields.username, &fields.password).await;
            conclude("Signup", result, "Error creating user.", |envelope| {
                envelope
                    .is_created()
                    .then(|| Feedback::success("User created successfully.").then(Route::Login))
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::test_support::{RecordingGateway, created, server_error};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn filled(username: &str, password: &str) -> SignupForm {
        let mut form = SignupForm::new();
        form.fields_mut().username = username.to_owned();
        form.fields_mut().password = password.to_owned();
        form
    }

    #[rstest]
    #[case("", "Abcdefg1")]
    #[case("alice", "")]
    #[case("alice", "abcdefg1")]
    #[tokio::test]
    async fn invalid_form_never_calls_out(#[case] username: &str, #[case] password: &str) {
        let gateway = Arc::new(RecordingGateway::replying(created(json!({}))));
        let state = ClientState::new(gateway.clone(), Session::new());

        let result = filled(username, password).submit(&state).await;

        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn created_envelope_redirects_to_login() {
        let gateway = Arc::new(RecordingGateway::replying(created(json!({}))));
        let state = ClientState::new(gateway, Session::new());
        let form = filled("alice", "Abcdefg1");

        let feedback = form.submit(&state).await.expect("valid form");

        assert!(feedback.is_success());
        assert_eq!(feedback.notification.message, "User created successfully.");
        assert_eq!(feedback.redirect, Some(Route::Login));
        assert_eq!(form.phase(), FormPhase::Succeeded);
    }

    #[tokio::test]
    async fn other_envelope_keeps_the_entered_values() {
        let gateway = Arc::new(RecordingGateway::replying(server_error()));
        let state = ClientState::new(gateway, Session::new());
        let form = filled("alice", "Abcdefg1");

        let feedback = form.submit(&state).await.expect("valid form");

        assert!(feedback.notification.is_failure());
        assert_eq!(feedback.redirect, None);
        assert_eq!(form.phase(), FormPhase::Failed);
        assert_eq!(form.fields().username, "alice");
    }
}
