//! Most of the structs in `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use lazy_regex::regex_is_match;
use serde::Serialize;
use serde_json::Value;
use strum_macros::AsRefStr;

// ###################################
// ->   STRUCTS
// ###################################

/// Validated and normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    /// Trims and lower-cases the input, then checks it has the shape `local@domain.tld`:
    /// exactly one `@`, at least one `.` after it and no whitespace anywhere.
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let normalized = value.as_ref().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", &normalized) {
            Ok(ValidEmail(normalized))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// Returns whether `raw` is a syntactically valid email address after normalization.
pub fn is_valid_email(raw: &str) -> bool {
    ValidEmail::parse(raw).is_ok()
}

/// Pulls the raw `email` field out of a JSON body.
/// Anything but a non-empty JSON string counts as missing.
pub fn raw_email(body: &Value) -> Option<&str> {
    body.get("email")
        .and_then(Value::as_str)
        .filter(|email| !email.is_empty())
}

/// The UI surface a signup came from, stored alongside the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum SignupSource {
    #[strum(serialize = "landing_hero")]
    LandingHero,
}

/// Body of a successful `POST /api/waitlist`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_registered: Option<bool>,
    pub message: &'static str,
}

impl JoinResponse {
    pub fn joined() -> Self {
        Self {
            success: true,
            already_registered: None,
            message: "Successfully joined the waitlist!",
        }
    }

    pub fn already_registered() -> Self {
        Self {
            success: true,
            already_registered: Some(true),
            message: "This email is already on the waitlist",
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email empty")]
    EmailEmpty,
    #[error("email invalid")]
    EmailInvalid,
}
