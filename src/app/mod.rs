use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    database::{DbManager, WaitlistStore},
    notifier::{EmailNotifier, Notifier},
    templ_manager::TemplateManager,
    EmailClient, Result,
};

// re-export
pub use crate::web::serve::serve;

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Builds the provider clients once, wires them into the `AppState` and binds the listener.
    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let sender = config.email_config.valid_sender()?;
        if config.email_config.auth_token.expose_secret().is_empty() {
            warn!("email provider API key is empty, welcome emails will fail to send");
        }

        let dm = DbManager::init(&config.db_config).await?;
        if config.db_config.migrate_on_startup {
            dm.migrate().await?;
        }

        let tm = TemplateManager::init()?;
        let email_timeout = config.email_config.timeout();
        let email_client = EmailClient::new(
            &config.email_config.api_url,
            sender,
            config.email_config.auth_token,
            email_timeout,
        )?;
        let notifier = EmailNotifier::new(email_client, tm);

        let app_state = AppState::new(Arc::new(dm), Arc::new(notifier));

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub store: Arc<dyn WaitlistStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Application state shared by every request.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(store: Arc<dyn WaitlistStore>, notifier: Arc<dyn Notifier>) -> Self {
        AppState(Arc::new(InternalState { store, notifier }))
    }
}
