use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{multipart::Form, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::ClientError;
use crate::session::{SessionStore, SESSION_COOKIE};

/// Route the user is sent to when the server rejects the session.
pub const LOGIN_ROUTE: &str = "/login";

/// Shared HTTP plumbing for the API services.
///
/// Every request carries credentials (the cookie jar). A 401 or 403 answer
/// clears the local session flag and surfaces as [`ClientError::LoginRequired`];
/// every other failure status is returned as-is. Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    cfg: configs::ApiConfig,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Build a client for the configured API. If the session flag is set, the
    /// stored session cookie is put back into the jar.
    pub async fn new(cfg: &configs::ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let client = Self { http, jar, cfg: cfg.clone(), session };
        if let Some(id) = client.session.session_id().await {
            client.remember_session_cookie(&id)?;
        }
        Ok(client)
    }

    pub fn config(&self) -> &configs::ApiConfig {
        &self.cfg
    }

    pub fn base_url(&self) -> &str {
        &self.cfg.base_url
    }

    /// Absolute URL for an `imageUrl` as returned by the server.
    pub fn image_url(&self, image_url: &str) -> String {
        common::utils::url::join(&self.cfg.image_base_url, image_url)
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        common::utils::url::join(&self.cfg.base_url, path)
    }

    /// Path of an auth endpoint under the configured prefix.
    pub fn auth_path(&self, endpoint: &str) -> String {
        self.cfg.auth_path(endpoint)
    }

    /// Put the session cookie into the jar for the API origin.
    pub fn remember_session_cookie(&self, session_id: &str) -> Result<(), ClientError> {
        let url = Url::parse(&self.cfg.base_url).map_err(|e| ClientError::Network(format!("invalid base url: {e}")))?;
        self.jar.add_cookie_str(&format!("{SESSION_COOKIE}={session_id}; Path=/"), &url);
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send and apply the auth interception policy.
    async fn send(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response, ClientError> {
        self.send_with(method, path, req, true).await
    }

    /// With `intercept` off a 401/403 still maps to `LoginRequired`, but the
    /// session flag is left alone.
    #[instrument(level = "debug", skip(self, req))]
    async fn send_with(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
        intercept: bool,
    ) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if intercept {
                warn!(status = status.as_u16(), redirect = LOGIN_ROUTE, "session rejected by server");
                self.session.clear().await?;
            }
            return Err(ClientError::LoginRequired { status: status.as_u16() });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Http { status: status.as_u16(), body });
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        Self::decode(resp).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path).json(body);
        let resp = self.send(Method::POST, path, req).await?;
        Self::decode(resp).await
    }

    /// POST to a credentials endpoint. A 401/403 here means the credentials were
    /// refused, so the current session flag is kept.
    pub async fn post_credentials<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path).json(body);
        let resp = self.send_with(Method::POST, path, req, false).await?;
        Self::decode(resp).await
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let req = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, req).await?;
        Ok(())
    }

    /// PUT whose response body is ignored.
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let req = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, req).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ClientError> {
        let req = self.request(Method::POST, path).multipart(form);
        let resp = self.send(Method::POST, path, req).await?;
        Self::decode(resp).await
    }
}
