use serde_json::json;
use tracing::{info, instrument, warn};

use super::domain::{LoginInput, LoginResponse};
use crate::client::ApiClient;
use crate::errors::ClientError;

/// Login/logout against the API and the local session flag.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self { Self { client } }

    /// Authenticate; the flag is set only when the server hands out a session id.
    ///
    /// Returns whether the user is now logged in.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use service::{auth::AuthService, client::ApiClient, session::mock::MemorySessionStore};
    /// let cfg = configs::ApiConfig::default();
    /// let client = tokio_test::block_on(ApiClient::new(&cfg, Arc::new(MemorySessionStore::default()))).unwrap();
    /// let auth = AuthService::new(client);
    /// let ok = tokio_test::block_on(auth.login("admin", "secret")).unwrap();
    /// assert!(ok);
    /// ```
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, ClientError> {
        let input = LoginInput { username: username.to_string(), password: password.to_string() };
        let resp: LoginResponse = match self.client.post_credentials(&self.client.auth_path("login"), &input).await {
            Ok(resp) => resp,
            Err(ClientError::LoginRequired { .. }) => return Err(ClientError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if resp.session_id.is_empty() {
            warn!("login answered without a session id");
            return Ok(false);
        }
        self.client.remember_session_cookie(&resp.session_id)?;
        self.client.session().set_logged_in(&resp.session_id).await?;
        info!("logged_in");
        Ok(true)
    }

    /// End the session. A server that already forgot the session still counts as logged out.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        match self.client.post_unit(&self.client.auth_path("logout"), &json!({})).await {
            Ok(()) | Err(ClientError::LoginRequired { .. }) => {}
            Err(e) => return Err(e),
        }
        self.client.session().clear().await?;
        info!("logged_out");
        Ok(())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.client.session().is_logged_in().await
    }
}
