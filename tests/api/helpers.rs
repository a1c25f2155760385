use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, Response};
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use waitlist::{
    database::{InsertOutcome, NewWaitlistEntry, StoreError, StoreResult, WaitlistStore},
    email_client::Sender,
    notifier::EmailNotifier,
    templ_manager::TemplateManager,
    App, AppState, EmailClient,
};
use wiremock::MockServer;

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    pub email_server: MockServer,
}

impl TestApp {
    /// Spawns the app backed by an empty in-memory store.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_store(Arc::new(MemoryStore::default())).await
    }

    /// Spawns the app on a random port with the given store and a real `EmailNotifier`
    /// that talks to a `wiremock` server instead of the email provider.
    pub async fn spawn_with_store(store: Arc<dyn WaitlistStore>) -> Result<Self> {
        let email_server = MockServer::start().await;
        let email_client = EmailClient::new(
            email_server.uri(),
            Sender::parse("Rhetix <hello@rhetix.app>")?,
            SecretString::from("re_test_key"),
            Duration::from_millis(200),
        )?;
        let notifier = EmailNotifier::new(email_client, TemplateManager::init()?);
        let app_state = AppState::new(store, Arc::new(notifier));

        let listener = TcpListener::bind(&TEST_SOCK_ADDR).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(waitlist::serve(App::new(app_state, listener)));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(TestApp {
            addr,
            http_client,
            email_server,
        })
    }

    pub fn waitlist_url(&self) -> String {
        format!("http://{}/api/waitlist", self.addr)
    }

    pub async fn post_waitlist(&self, body: &Value) -> reqwest::Result<Response> {
        self.http_client
            .post(self.waitlist_url())
            .json(body)
            .send()
            .await
    }

    pub async fn post_waitlist_raw(&self, body: &'static str) -> reqwest::Result<Response> {
        self.http_client
            .post(self.waitlist_url())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
    }

    pub async fn request_waitlist(&self, method: Method) -> reqwest::Result<Response> {
        self.http_client
            .request(method, self.waitlist_url())
            .send()
            .await
    }

    /// Number of emails the mocked provider received.
    pub async fn sent_emails(&self) -> usize {
        self.email_server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

// ###################################
// ->   STORE FAKES
// ###################################

/// Unique-keyed in-memory store, mirrors the unique constraint of the real table.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WaitlistStore for MemoryStore {
    async fn insert(&self, entry: &NewWaitlistEntry) -> StoreResult<InsertOutcome> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Sqlx(sqlx::Error::PoolClosed))?;

        if entries
            .iter()
            .any(|(email, _)| email == entry.email.as_ref())
        {
            return Ok(InsertOutcome { created: false });
        }

        entries.push((
            entry.email.as_ref().to_string(),
            entry.source.as_ref().to_string(),
        ));
        Ok(InsertOutcome { created: true })
    }
}

/// Every insert fails like an unreachable database would.
pub struct FailingStore;

#[async_trait]
impl WaitlistStore for FailingStore {
    async fn insert(&self, _entry: &NewWaitlistEntry) -> StoreResult<InsertOutcome> {
        Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// Every insert panics.
pub struct PanickingStore;

#[async_trait]
impl WaitlistStore for PanickingStore {
    async fn insert(&self, _entry: &NewWaitlistEntry) -> StoreResult<InsertOutcome> {
        panic!("store blew up")
    }
}
