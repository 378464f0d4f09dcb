use tracing::{info, warn};

use crate::{
    auth::parse_login_reply, dto::LoginRequest, errors::SubmitError, feedback::Feedback,
    routes::Route, states::ClientState,
};

use super::status::{FormPhase, FormStatus, submit_with};

/// The only writer of the session besides logout.
#[derive(Debug, Default)]
pub struct LoginForm {
    fields: LoginRequest,
    status: FormStatus,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &LoginRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut LoginRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// POST /login; a `200` envelope in the text reply starts the session.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        submit_with(&self.status, fields, async {
            let reply = state
                .users
                .login(&fields.username, &fields.password)
                .await
                .and_then(|text| parse_login_reply(&text, &fields.username));

            match reply {
                Ok((username, data)) => {
                    info!("User logged in: {}", username);
                    let message = format!("Logged in as {username}.");
                    state.session.login(username, data.token);
                    Feedback::success(message).then(Route::Home)
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    Feedback::failure("Login failed.")
                }
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::test_support::{RecordingGateway, ScriptedReply, ok};
    use serde_json::json;
    use std::sync::Arc;

    fn filled() -> LoginForm {
        let mut form = LoginForm::new();
        form.fields_mut().username = "alice".to_owned();
        form.fields_mut().password = "Abcdefg1".to_owned();
        form
    }

    #[tokio::test]
    async fn successful_login_starts_the_session() {
        let gateway = Arc::new(RecordingGateway::replying(ok(
            json!({"token": "jwt", "username": "alice"}),
        )));
        let session = Session::new();
        let state = ClientState::new(gateway, session.clone());
        assert!(!session.is_authenticated());

        let feedback = filled().submit(&state).await.expect("valid form");

        assert!(feedback.is_success());
        assert_eq!(feedback.redirect, Some(Route::Home));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().as_deref(), Some("alice"));
        assert_eq!(session.token().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_empty() {
        let gateway = Arc::new(RecordingGateway::replying(ScriptedReply::Text(
            r#"{"status":401,"message":"Invalid username or password"}"#.to_owned(),
        )));
        let session = Session::new();
        let state = ClientState::new(gateway, session.clone());

        let feedback = filled().submit(&state).await.expect("valid form");

        assert!(feedback.notification.is_failure());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn empty_password_is_not_sent() {
        let gateway = Arc::new(RecordingGateway::new());
        let state = ClientState::new(gateway.clone(), Session::new());
        let mut form = filled();
        form.fields_mut().password.clear();

        assert!(matches!(
            form.submit(&state).await,
            Err(SubmitError::Invalid(_))
        ));
        assert_eq!(gateway.call_count(), 0);
    }
}
