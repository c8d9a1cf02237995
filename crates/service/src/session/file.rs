use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::session::SessionStore;
use crate::storage::json_map_store::JsonMapStore;

const LOGGED_IN: &str = "loggedIn";
const SESSION_ID: &str = "sessionId";

/// File-backed session flag, kept as a small JSON object:
/// `{"loggedIn": "true", "sessionId": "..."}`.
#[derive(Clone)]
pub struct FileSessionStore {
    store: Arc<JsonMapStore<String, String>>,
}

impl FileSessionStore {
    /// Open the store at the given path. The file is created on first login.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ClientError> {
        let store = JsonMapStore::<String, String>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn session_id(&self) -> Option<String> {
        let flagged = self.store.get(&LOGGED_IN.to_string()).await.as_deref() == Some("true");
        if !flagged {
            return None;
        }
        self.store.get(&SESSION_ID.to_string()).await.filter(|id| !id.is_empty())
    }

    async fn set_logged_in(&self, session_id: &str) -> Result<(), ClientError> {
        let id = session_id.to_string();
        self.store
            .update_map(|m| {
                m.insert(LOGGED_IN.to_string(), "true".to_string());
                m.insert(SESSION_ID.to_string(), id);
            })
            .await
    }

    async fn clear(&self) -> Result<(), ClientError> {
        self.store
            .update_map(|m| {
                m.insert(LOGGED_IN.to_string(), "false".to_string());
                m.remove(SESSION_ID);
            })
            .await
    }
}
