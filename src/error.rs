use crate::{config, database, email_client};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("email client error: {0}")]
    EmailClient(#[from] email_client::Error),
    #[error("database error: {0}")]
    Database(#[from] database::Error),
    #[error("template error: {0}")]
    Templates(#[from] tera::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
