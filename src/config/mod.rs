//! Builds an `AppConfig` from layered sources:
//! `config/base.toml`, then `config/{environment}.toml`, then `APP_`-prefixed env variables
//! (`__` separates nested keys), then the provider-specific variables
//! `RESEND_API_KEY`, `RESEND_FROM_EMAIL` and, in production, `DATABASE_URL`.

mod error;
mod types;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::SecretString;
use tracing::info;

pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, DbConfig, EmailConfig, Environment, NetConfig, SslMode};

pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const RESEND_API_KEY_VAR: &str = "RESEND_API_KEY";
pub const RESEND_FROM_EMAIL_VAR: &str = "RESEND_FROM_EMAIL";

impl AppConfig {
    /// Loads the configuration from the `config` directory inside the current working directory.
    /// The environment is read from `APP_ENVIRONMENT` and defaults to `local`.
    pub fn load() -> ConfigResult<Self> {
        info!("{:<20} - Initializing the configuration", "AppConfig::load");

        let config_dir = std::env::current_dir()?.join("config");
        let environment: Environment = std::env::var(ENVIRONMENT_VAR)
            .unwrap_or_else(|_| "local".into())
            .parse()?;

        let mut config = Self::from_dir(&config_dir, environment)?;
        config.apply_provider_env(environment)?;

        Ok(config)
    }

    /// Merges `base.toml`, `{environment}.toml` and the `APP_` prefixed env variables.
    pub fn from_dir(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let environment_filename = format!("{}.toml", environment.as_ref());

        let config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").ignore(&["ENVIRONMENT"]).split("__"))
            .extract()?;

        Ok(config)
    }

    /// Overrides with the variables the hosting provider and the email provider hand out.
    fn apply_provider_env(&mut self, environment: Environment) -> ConfigResult<()> {
        if let Some(api_key) = env_var(RESEND_API_KEY_VAR)? {
            self.email_config.auth_token = SecretString::from(api_key);
        }
        if let Some(sender) = env_var(RESEND_FROM_EMAIL_VAR)? {
            self.email_config.sender_addr = sender;
        }

        if matches!(environment, Environment::Production) {
            if let Some(database_url) = env_var(DATABASE_URL_VAR)? {
                let migrate_on_startup = self.db_config.migrate_on_startup;
                self.db_config = DbConfig::from_database_url(&database_url)?;
                self.db_config.migrate_on_startup = migrate_on_startup;
            }
        }

        Ok(())
    }
}

/// Reads an env variable, treating an unset or empty variable as absent.
fn env_var(name: &'static str) -> ConfigResult<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::EnvNotUnicode { name }),
    }
}
