use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::WaitlistError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("waitlist error: {0}")]
    Waitlist(#[from] WaitlistError),

    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, ClientError::MethodNotAllowed),
            Error::Waitlist(waitlist_er) => waitlist_er.status_code_and_client_error(),
            Error::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::Unexpected),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The errors a client gets to see. The `Display` output is the exact message sent back.
#[derive(Debug, AsRefStr, derive_more::Display, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    #[display("Email is required")]
    EmailRequired,
    #[display("Invalid email format")]
    InvalidEmailFormat,
    #[display("Database error. Please try again.")]
    DatabaseError,
    #[display("An unexpected error occurred")]
    Unexpected,
    #[display("Method not allowed")]
    MethodNotAllowed,
}

impl ClientError {
    /// JSON body sent to the client.
    pub fn body(&self) -> Value {
        match self {
            ClientError::MethodNotAllowed => json!({ "error": self.to_string() }),
            _ => json!({ "success": false, "error": self.to_string() }),
        }
    }
}
