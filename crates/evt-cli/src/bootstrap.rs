use std::sync::Arc;

use anyhow::Context;
use evt_auth::Session;
use evt_client::GraphqlClient;
use evt_config::EvtConfig;
use figment::providers::Serialized;

use crate::cli::GlobalFlags;
use crate::progress::Spinner;

/// Loaded configuration plus the session of the selected tab.
pub struct AppContext {
    pub config: EvtConfig,
    pub session: Session,
}

impl AppContext {
    /// Load config (flags over env over files) and restore the tab's session.
    /// Does not touch the network.
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config = load_config(flags)?;
        let session = evt_auth::restore_session(&config.session)
            .with_context(|| format!("failed to restore session for tab '{}'", config.session.tab))?;
        tracing::debug!(tab = %config.session.tab, state = ?session.state(), "session restored");
        Ok(Self { config, session })
    }

    /// Build the API client and fetch the anti-forgery cookie.
    pub async fn connect(&self) -> anyhow::Result<Arc<GraphqlClient>> {
        let client = GraphqlClient::new(self.config.api.clone(), self.session.clone())
            .context("failed to build HTTP client")?;
        Spinner::wrap("Connecting…", "Connection failed", client.bootstrap())
            .await
            .with_context(|| format!("could not reach {}", self.config.api.base_url))?;
        Ok(Arc::new(client))
    }
}

fn load_config(flags: &GlobalFlags) -> anyhow::Result<EvtConfig> {
    let config = match &flags.tab {
        Some(tab) => EvtConfig::load_with_overrides(Serialized::default("session.tab", tab)),
        None => EvtConfig::load_with_dotenv(),
    };
    config.context("failed to load configuration")
}
