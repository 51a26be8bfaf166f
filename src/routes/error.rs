//! HTTP error responses.
//!
//! Every service error maps onto one [`ApiError`], rendered as
//! `{code, message, retryable, fields?}` with the matching status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::ErrorCode;
use crate::services::ai::AiError;
use crate::services::campaign::CampaignError;
use crate::services::messaging::MessagingError;
use crate::services::profile::ProfileError;
use crate::services::scrape::ScrapeError;
use crate::services::session::SessionError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
    pub fields: Option<Vec<FieldError>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl ApiError {
    fn from_code(status: StatusCode, err: &impl ErrorCode) -> Self {
        Self {
            status,
            code: err.error_code(),
            message: err.to_string(),
            retryable: err.retryable(),
            fields: None,
        }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "E_UNAUTHENTICATED",
            message: "sign in required".into(),
            retryable: false,
            fields: None,
        }
    }

    #[must_use]
    pub fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: "E_FORBIDDEN",
            message: message.to_owned(),
            retryable: false,
            fields: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
            retryable: self.retryable,
            fields: self.fields.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "E_VALIDATION",
            message: errors.to_string(),
            retryable: false,
            fields: Some(errors.0),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(errors) => errors.into(),
            SessionError::UnknownSession => Self::from_code(StatusCode::UNAUTHORIZED, &e),
        }
    }
}

impl From<CampaignError> for ApiError {
    fn from(e: CampaignError) -> Self {
        let e = match e {
            CampaignError::Validation(errors) => return errors.into(),
            other => other,
        };
        let status = match &e {
            CampaignError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CampaignError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CampaignError::Forbidden(_) => StatusCode::FORBIDDEN,
            CampaignError::NotFound(_) => StatusCode::NOT_FOUND,
            CampaignError::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
            CampaignError::Database(db) => {
                error!(error = %db, "campaign store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::from_code(status, &e)
    }
}

impl From<ProfileError> for ApiError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::Validation(errors) => errors.into(),
            ProfileError::NoRole => Self::from_code(StatusCode::FORBIDDEN, &e),
        }
    }
}

impl From<MessagingError> for ApiError {
    fn from(e: MessagingError) -> Self {
        match e {
            MessagingError::Validation(errors) => errors.into(),
            MessagingError::ChatNotFound(_) => Self::from_code(StatusCode::NOT_FOUND, &e),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(e: AiError) -> Self {
        let e = match e {
            AiError::Validation(errors) => return errors.into(),
            other => other,
        };
        let status = match &e {
            AiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AiError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AiError::Llm(_) | AiError::InvalidOutput(_) => StatusCode::BAD_GATEWAY,
            AiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        };
        Self::from_code(status, &e)
    }
}

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        let status = match &e {
            ScrapeError::MissingUsername => {
                return ValidationErrors::single("username", "Username is required.").into();
            }
            ScrapeError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ScrapeError::Timeout { .. } | ScrapeError::PollExhausted { .. } => StatusCode::GATEWAY_TIMEOUT,
            ScrapeError::Request(_)
            | ScrapeError::Response { .. }
            | ScrapeError::Parse(_)
            | ScrapeError::RunFailed { .. } => StatusCode::BAD_GATEWAY,
        };
        Self::from_code(status, &e)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
