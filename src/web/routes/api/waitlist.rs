use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    database::{NewWaitlistEntry, StoreError},
    web::{
        types::{self, DataParsingError, JoinResponse, SignupSource, ValidEmail},
        ClientError, WebResult,
    },
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    #[error("email missing from the request body")]
    EmailRequired,

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl WaitlistError {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            WaitlistError::EmailRequired => (StatusCode::BAD_REQUEST, ClientError::EmailRequired),
            WaitlistError::DataParsing(_) => {
                (StatusCode::BAD_REQUEST, ClientError::InvalidEmailFormat)
            }
            WaitlistError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::DatabaseError),
        }
    }
}

// ###################################
// ->   API
// ###################################

/// Puts an email on the waitlist.
///
/// A body that isn't JSON, or whose `email` isn't a non-empty string, is answered with
/// `Email is required`. Submitting an address that's already stored succeeds with
/// `alreadyRegistered` and doesn't send the welcome email again.
/// The welcome email is best-effort: its failure is logged and the signup still succeeds.
#[tracing::instrument(name = "Joining the waitlist", skip_all)]
pub async fn waitlist_join(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> WebResult<Json<JoinResponse>> {
    let body = payload
        .inspect_err(|rejection| debug!(%rejection, "rejected request body"))
        .map(|Json(body)| body)
        .ok();
    let raw_email = body
        .as_ref()
        .and_then(types::raw_email)
        .ok_or(WaitlistError::EmailRequired)?;

    let email = ValidEmail::parse(raw_email).map_err(WaitlistError::DataParsing)?;
    let entry = NewWaitlistEntry::new(email, SignupSource::LandingHero);

    let outcome = app_state
        .store
        .insert(&entry)
        .await
        .map_err(WaitlistError::Store)?;

    if !outcome.created {
        info!("email already on the waitlist");
        return Ok(Json(JoinResponse::already_registered()));
    }

    if let Err(er) = app_state.notifier.send_welcome(&entry.email).await {
        error!(error = %er, "failed to send the welcome email");
    }

    info!("SUCCESS");
    Ok(Json(JoinResponse::joined()))
}
