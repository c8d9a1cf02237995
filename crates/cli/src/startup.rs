use std::sync::Arc;

use anyhow::Result;
use configs::AppConfig;
use service::session::{FileSessionStore, SessionStore};
use service::client::LOGIN_ROUTE;
use service::{ApiClient, ClientError};
use tracing::{debug, info};

use crate::args::Cli;
use crate::commands::{self, Context};

/// Load config, open the session file, build the client and run one command.
pub async fn run(cli: Cli) -> Result<()> {
    let cfg = AppConfig::load_and_validate(cli.config.as_deref())?;
    info!(event = "config_loaded", base_url = %cfg.api.base_url, "configuration ready");

    let session_path = cfg.session_path();
    debug!(path = %session_path.display(), "opening session store");
    let session: Arc<dyn SessionStore> = FileSessionStore::new(session_path).await?;
    let client = ApiClient::new(&cfg.api, session).await?;

    let ctx = Context::new(client, cli.output);
    commands::dispatch(&ctx, cli.command).await.map_err(|e| {
        if e.downcast_ref::<ClientError>().is_some_and(ClientError::is_login_required) {
            e.context(format!("session ended, log in again ({LOGIN_ROUTE})"))
        } else {
            e
        }
    })
}
