use validator::{ValidationError, ValidationErrors};

use crate::{
    dto::DeleteAccountRequest, errors::SubmitError, feedback::Feedback, routes::Route,
    states::ClientState,
};

use super::status::{FormPhase, FormStatus, conclude, submit_with};

/// Account removal. The typed username must match the logged-in user.
#[derive(Debug, Default)]
pub struct DeleteAccountForm {
    fields: DeleteAccountRequest,
    status: FormStatus,
}

impl DeleteAccountForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &DeleteAccountRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut DeleteAccountRequest {
        self.status.dismiss();
        &mut self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.status.phase()
    }

    /// DELETE /user/:username, then log out and go home.
    pub async fn submit(&self, state: &ClientState) -> Result<Feedback, SubmitError> {
        let fields = &self.fields;
        if state.session.current_user().as_deref() != Some(fields.username.as_str()) {
            let mut errors = ValidationErrors::new();
            errors.add(
                "username",
                ValidationError::new("confirmation")
                    .with_message("Type the username you are logged in as".into()),
            );
            return Err(SubmitError::Invalid(errors));
        }

        submit_with(&self.status, fields, async {
            let result = state.users.delete(&fields.username).await;
            let feedback = conclude(
                "Account deletion",
                result,
                "Error deleting account.",
                |envelope| {
                    matches!(envelope.status, 200 | 204)
                        .then(|| Feedback::success("Account deleted.").then(Route::Home))
                },
            );
            if feedback.is_success() {
                state.session.logout();
            }
            feedback
        })
        .await
    }
}
