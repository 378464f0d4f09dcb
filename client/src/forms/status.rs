use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tracing::warn;
use validator::Validate;

use crate::{dto::Envelope, errors::ClientError, errors::SubmitError, feedback::Feedback};

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// Submit-cycle state shared by every form.
#[derive(Debug, Default)]
pub struct FormStatus {
    phase: Mutex<FormPhase>,
}

impl FormStatus {
    pub fn phase(&self) -> FormPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the form for one submission.
    ///
    /// # Errors
    ///
    /// [`SubmitError::InFlight`] while a previous submission has not resolved.
    pub fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase == FormPhase::Submitting {
            return Err(SubmitError::InFlight);
        }
        *phase = FormPhase::Submitting;
        Ok(InFlight {
            status: self,
            settled: false,
        })
    }

    /// Dismiss the last notification and go back to editing.
    pub fn dismiss(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != FormPhase::Submitting {
            *phase = FormPhase::Editing;
        }
    }

    fn set(&self, next: FormPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

/// A claimed submission. Dropping it unsettled returns the form to editing.
#[must_use]
pub struct InFlight<'a> {
    status: &'a FormStatus,
    settled: bool,
}

impl InFlight<'_> {
    pub fn settle(mut self, feedback: &Feedback) {
        self.settled = true;
        self.status.set(if feedback.notification.is_failure() {
            FormPhase::Failed
        } else {
            FormPhase::Succeeded
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.status.set(FormPhase::Editing);
        }
    }
}

/// Validate, then run `call` under the in-flight guard.
///
/// `call` is not polled unless the form is valid and idle, so a rejected
/// submission never reaches the network.
pub(crate) async fn submit_with(
    status: &FormStatus,
    fields: &impl Validate,
    call: impl Future<Output = Feedback>,
) -> Result<Feedback, SubmitError> {
    let in_flight = status.begin()?;
    fields.validate()?;
    let feedback = call.await;
    in_flight.settle(&feedback);
    Ok(feedback)
}

/// Collapse a service reply into feedback: `accept` picks the success case,
/// everything else becomes the generic `failure` message.
pub(crate) fn conclude(
    action: &str,
    result: Result<Envelope, ClientError>,
    failure: &str,
    accept: impl FnOnce(&Envelope) -> Option<Feedback>,
) -> Feedback {
    match result {
        Ok(envelope) => accept(&envelope).unwrap_or_else(|| {
            warn!(
                "{} rejected: status {} message {:?}",
                action, envelope.status, envelope.message
            );
            Feedback::failure(failure)
        }),
        Err(e) => {
            warn!("{} failed: {}", action, e);
            Feedback::failure(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn starts_editing() {
        assert_eq!(FormStatus::default().phase(), FormPhase::Editing);
    }

    #[rstest]
    fn second_claim_is_refused_while_in_flight() {
        let status = FormStatus::default();
        let first = status.begin().expect("idle form");

        assert!(matches!(status.begin(), Err(SubmitError::InFlight)));
        assert_eq!(status.phase(), FormPhase::Submitting);

        first.settle(&Feedback::success("done"));
        assert_eq!(status.phase(), FormPhase::Succeeded);
    }

    #[rstest]
    fn failure_settles_as_failed_and_dismiss_returns_to_editing() {
        let status = FormStatus::default();
        status.begin().expect("idle form").settle(&Feedback::failure("nope"));
        assert_eq!(status.phase(), FormPhase::Failed);

        status.dismiss();
        assert_eq!(status.phase(), FormPhase::Editing);
    }

    #[rstest]
    fn abandoned_submission_returns_to_editing() {
        let status = FormStatus::default();
        drop(status.begin().expect("idle form"));
        assert_eq!(status.phase(), FormPhase::Editing);
    }

    #[rstest]
    fn dismiss_does_not_cancel_an_in_flight_submission() {
        let status = FormStatus::default();
        let _claim = status.begin().expect("idle form");
        status.dismiss();
        assert_eq!(status.phase(), FormPhase::Submitting);
    }

    #[rstest]
    fn conclude_maps_errors_to_failure() {
        let feedback = conclude(
            "test",
            Err(ClientError::NotLoggedIn),
            "Something broke.",
            |_| Some(Feedback::success("unreachable")),
        );
        assert!(feedback.notification.is_failure());
        assert_eq!(feedback.notification.message, "Something broke.");
        assert_eq!(feedback.redirect, None);
    }
}
