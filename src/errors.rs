use crate::wizard::WizardError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

// User-facing failures carry a short static message; whatever caused them is
// logged where it happened and never echoed back.

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Unknown intake session.")]
    UnknownSession,
    #[error("Please choose an answer before continuing.")]
    ValidationBlocked,
    #[error("That question is not the one currently being asked.")]
    QuestionMismatch,
    #[error("Your case is being analyzed. Please wait.")]
    SubmissionInFlight,
    #[error("This intake is already complete. Start a new case to make changes.")]
    SessionComplete,
    #[error("The analysis is not ready yet.")]
    ResultNotReady,
    #[error("The report could not be generated. Please try again.")]
    ReportFailed,
    #[error("Something went wrong. Please try again.")]
    Internal,
}

impl From<WizardError> for IntakeError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::ValidationBlocked => IntakeError::ValidationBlocked,
            WizardError::QuestionMismatch { .. } => IntakeError::QuestionMismatch,
            WizardError::SubmissionInFlight => IntakeError::SubmissionInFlight,
            WizardError::NotEditing => IntakeError::SessionComplete,
        }
    }
}

impl From<actix::MailboxError> for IntakeError {
    fn from(err: actix::MailboxError) -> Self {
        log::error!("Actor mailbox error: {}", err);
        IntakeError::Internal
    }
}

impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::UnknownSession => StatusCode::NOT_FOUND,
            IntakeError::ValidationBlocked | IntakeError::QuestionMismatch => {
                StatusCode::BAD_REQUEST
            }
            IntakeError::SubmissionInFlight
            | IntakeError::SessionComplete
            | IntakeError::ResultNotReady => StatusCode::CONFLICT,
            IntakeError::ReportFailed | IntakeError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
