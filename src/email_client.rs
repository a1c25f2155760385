use derive_more::Display;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::web::types::{DataParsingError, ValidEmail};

/// The `from` value of outgoing emails.
/// Accepts a bare address or the `Display Name <address>` form, the address part gets validated.
#[derive(Debug, Clone, Display)]
pub struct Sender(String);

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Sender {
    pub fn parse<S>(value: S) -> core::result::Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        let address = match (value.rfind('<'), value.strip_suffix('>')) {
            (Some(start), Some(without_bracket)) => &without_bracket[start + 1..],
            _ => value,
        };
        if address.contains(['<', '>']) {
            return Err(DataParsingError::EmailInvalid);
        }
        ValidEmail::parse(address)?;

        Ok(Sender(value.to_owned()))
    }
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub sender: Sender,
    auth_token: SecretString,
}

impl EmailClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        sender: Sender,
        auth_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(EmailClient {
            http_client,
            url,
            sender,
            auth_token,
        })
    }

    /// Sends a single email through the provider's `/emails` endpoint.
    /// Any non-2xx response is returned as an error.
    pub async fn send_email<S>(
        &self,
        recipient: &ValidEmail,
        subject: S,
        html_content: S,
        text_content: S,
    ) -> Result<()>
    where
        S: AsRef<str>,
    {
        let url = self
            .url
            .join("emails")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let email_content = EmailContent {
            from: self.sender.as_ref(),
            to: [recipient.as_ref()],
            subject: subject.as_ref(),
            html: html_content.as_ref(),
            text: text_content.as_ref(),
        };

        let _resp = self
            .http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(&email_content)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Serialize)]
pub struct EmailContent<'a> {
    pub from: &'a str,
    pub to: [&'a str; 1],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
