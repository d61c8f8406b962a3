//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`UserError`] HTTP-agnostic while letting Actix handlers
//! return it directly. A missing user maps to 404; every other failure,
//! storage faults included, maps to 400 with the error message in the body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, UserError>;

/// JSON body returned for failed requests.
///
/// Example JSON: `{"error":"user does not exist"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    #[schema(example = "user does not exist")]
    pub error: String,
}

impl From<&UserError> for ErrorBody {
    fn from(value: &UserError) -> Self {
        Self {
            error: value.to_string(),
        }
    }
}

fn status_for(error: &UserError) -> StatusCode {
    match error {
        UserError::UserDoesNotExist => StatusCode::NOT_FOUND,
        UserError::InvalidUserData
        | UserError::InvalidEmail
        | UserError::UserAlreadyExists
        | UserError::StorageFailure
        | UserError::SerializationFailure
        | UserError::DeserializationFailure
        | UserError::CreateFailure
        | UserError::UpdateFailure
        | UserError::DeleteFailure => StatusCode::BAD_REQUEST,
    }
}

impl ResponseError for UserError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::from(self))
    }
}
