//! Runs against a local Postgres configured in `config/local.toml`:
//! `cargo test -- --ignored`

use std::{path::Path, sync::Arc};

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use waitlist::{
    config::{AppConfig, Environment},
    database::{DbManager, NewWaitlistEntry, WaitlistStore},
    web::types::{SignupSource, ValidEmail},
};
use wiremock::{matchers::path, Mock, ResponseTemplate};

use crate::helpers::TestApp;

async fn test_db() -> Result<DbManager> {
    let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
    let config = AppConfig::from_dir(&config_dir, Environment::Local)?;
    let dm = DbManager::test_init(&config.db_config).await?;
    Ok(dm)
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn store_insert_then_duplicate() -> Result<()> {
    let dm = test_db().await?;
    let entry = NewWaitlistEntry::new(
        ValidEmail::parse("Test@Example.com")?,
        SignupSource::LandingHero,
    );

    assert!(dm.insert(&entry).await?.created);
    assert!(!dm.insert(&entry).await?.created);

    let (email, source): (String, String) =
        sqlx::query_as("SELECT email, source FROM waitlist")
            .fetch_one(dm.db())
            .await?;
    assert_eq!("test@example.com", email);
    assert_eq!("landing_hero", source);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn store_surfaces_schema_errors() -> Result<()> {
    let dm = test_db().await?;
    sqlx::query("DROP TABLE waitlist").execute(dm.db()).await?;

    let entry = NewWaitlistEntry::new(
        ValidEmail::parse("ursula@example.com")?,
        SignupSource::LandingHero,
    );

    assert!(dm.insert(&entry).await.is_err());

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn join_persists_one_row_per_email() -> Result<()> {
    let dm = test_db().await?;
    let app = TestApp::spawn_with_store(Arc::new(dm.clone())).await?;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    for email in ["Ursula@Example.com", "ursula@example.com "] {
        let res = app.post_waitlist(&json!({ "email": email })).await?;
        assert_eq!(StatusCode::OK, res.status());
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist")
        .fetch_one(dm.db())
        .await?;
    assert_eq!(1, count);

    Ok(())
}
